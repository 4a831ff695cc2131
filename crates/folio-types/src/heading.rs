use serde::{Deserialize, Serialize};

/// A Markdown heading with its anchor slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 for `#`, up to 6.
    pub level: u8,
    pub text: String,
    /// Anchor id, unique within the document.
    pub slug: String,
}
