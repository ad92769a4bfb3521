//! Axum route handlers for the Suggestion API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestion::resolver::AnswerSet;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Defaults to empty when the field is absent, so a missing `answers`
    /// object is reported as a validation error rather than a parse failure.
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestion: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/suggestions
///
/// Resolves the submitted questionnaire answers into a single remedy
/// suggestion. Empty or all-blank answers never reach the resolver tiers.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let suggestion = state.resolver.resolve(&request.answers).await?;

    Ok(Json(SuggestResponse { suggestion }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::resolver::{OnUpstreamFailure, SuggestionResolver};
    use std::sync::Arc;

    fn fallback_only_state() -> AppState {
        AppState {
            resolver: Arc::new(SuggestionResolver::new(None, OnUpstreamFailure::Fallback)),
        }
    }

    #[tokio::test]
    async fn test_handle_suggest_returns_suggestion() {
        let request = SuggestRequest {
            answers: [("q1".to_string(), "sprained my ankle".to_string())]
                .into_iter()
                .collect(),
        };

        let Json(response) = handle_suggest(State(fallback_only_state()), Json(request))
            .await
            .unwrap();
        assert!(response.suggestion.contains("Arnica montana"));
    }

    #[tokio::test]
    async fn test_handle_suggest_rejects_missing_answers() {
        let request = SuggestRequest {
            answers: AnswerSet::new(),
        };

        let err = handle_suggest(State(fallback_only_state()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
