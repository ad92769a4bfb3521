use std::sync::Arc;

use crate::suggestion::resolver::SuggestionResolver;

/// Shared application state injected into all route handlers via Axum extractors.
/// The resolver is the only shared object; it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<SuggestionResolver>,
}
