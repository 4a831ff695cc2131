//! Shared application state.

use crate::config::Config;
use folio_core::{
    open_contribution_store, ArticleStore, ContributionRecorder, SummaryReader, WriteStrategy,
};

/// Shared application state.
pub struct AppState {
    pub articles: ArticleStore,
    pub contributions: SummaryReader,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> folio_core::Result<Self> {
        let strategy = WriteStrategy::from_capability(config.store.upsert);
        let contribution_store = open_contribution_store(&config.db_path, strategy)?;

        let recorder = ContributionRecorder::new(contribution_store.clone());
        let articles = ArticleStore::open(&config.db_path, recorder)?;
        let contributions = SummaryReader::new(contribution_store);

        Ok(Self {
            articles,
            contributions,
            config,
        })
    }
}
