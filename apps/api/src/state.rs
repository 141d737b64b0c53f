use std::sync::Arc;

use crate::analysis::extractor::TextExtractor;
use crate::config::Config;
use crate::llm_client::SuggestionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: SuggestionClient,
    /// Pluggable extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
