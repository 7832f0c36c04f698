use std::sync::Arc;

use crate::llm_client::TextCompletion;
use crate::outreach::email_composer::SenderPersona;
use crate::page::PageFetcher;
use crate::portfolio::PortfolioIndex;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated while serving.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextCompletion>,
    pub fetcher: Arc<dyn PageFetcher>,
    /// Loaded before the listener binds.
    pub portfolio: Arc<PortfolioIndex>,
    pub persona: SenderPersona,
}
