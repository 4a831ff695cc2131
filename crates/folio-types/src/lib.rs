//! Shared types for the Folio blog backend.

mod article;
mod contribution;
mod heading;

pub use article::*;
pub use contribution::*;
pub use heading::*;
