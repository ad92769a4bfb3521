//! Suggestion Resolver — turns a set of questionnaire answers into one
//! remedy suggestion via a two-tier strategy: generative first (when a
//! client is configured), deterministic rule match otherwise.
//!
//! The resolver is constructed once at startup from explicit configuration.
//! It holds no mutable state, so a single instance serves all requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::{CompletionClient, LlmError};
use crate::suggestion::prompts::{build_suggestion_prompt, SUGGESTION_SYSTEM};
use crate::suggestion::rules;

/// Per-request mapping of question identifiers to free-text answers.
/// The map's key order is the stable concatenation order used for both
/// prompting and keyword matching.
pub type AnswerSet = BTreeMap<String, String>;

/// Substituted when the generative tier returns a well-formed but blank
/// completion.
pub const NO_SUGGESTION_SENTINEL: &str = "No suggestion available.";

/// Appended uniformly to every suggestion, generative or fallback.
pub const DISCLAIMER: &str = "Note: this suggestion is for educational purposes only and is not \
    a substitute for professional medical consultation. Please consult a qualified healthcare \
    provider before taking any remedy.";

const QUOTA_GUIDANCE: &str = "API quota exceeded. Please check your OpenAI account billing and \
    usage limits, then try again.";
const AUTH_GUIDANCE: &str =
    "Invalid API key. Please check the OPENAI_API_KEY environment variable.";

/// What to do when the generative tier fails.
///
/// The two observed behaviors are mutually exclusive policies, chosen once
/// at startup — never mixed per error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnUpstreamFailure {
    /// Surface the failure as an HTTP error with remediation guidance.
    Surface,
    /// Absorb the failure and answer from the rule table.
    Fallback,
}

pub struct SuggestionResolver {
    client: Option<Arc<dyn CompletionClient>>,
    on_upstream_failure: OnUpstreamFailure,
}

impl SuggestionResolver {
    /// `client` is `None` when no credential is configured; the resolver
    /// then answers every request from the rule table.
    pub fn new(
        client: Option<Arc<dyn CompletionClient>>,
        on_upstream_failure: OnUpstreamFailure,
    ) -> Self {
        Self {
            client,
            on_upstream_failure,
        }
    }

    /// Resolves an answer set into exactly one suggestion string, or a
    /// structured error. Every success path carries the disclaimer.
    pub async fn resolve(&self, answers: &AnswerSet) -> Result<String, AppError> {
        let joined = join_answers(answers)?;

        let body = match &self.client {
            Some(client) => self.attempt_generative(client.as_ref(), &joined).await?,
            None => {
                debug!("no generative credential configured, using rule table");
                rules::fallback_suggestion(&joined)
            }
        };

        Ok(with_disclaimer(&body))
    }

    async fn attempt_generative(
        &self,
        client: &dyn CompletionClient,
        joined: &str,
    ) -> Result<String, AppError> {
        let prompt = build_suggestion_prompt(joined);

        match client.complete(SUGGESTION_SYSTEM, &prompt).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    Ok(NO_SUGGESTION_SENTINEL.to_string())
                } else {
                    Ok(text.to_string())
                }
            }
            Err(err) => match self.on_upstream_failure {
                OnUpstreamFailure::Fallback => {
                    warn!("generative tier failed ({err}), answering from rule table");
                    Ok(rules::fallback_suggestion(joined))
                }
                OnUpstreamFailure::Surface => Err(surface_error(err)),
            },
        }
    }
}

/// Maps a classified adapter error to the HTTP error surfaced to the caller,
/// with the remediation guidance the intake UI displays.
fn surface_error(err: LlmError) -> AppError {
    match err {
        LlmError::Auth { .. } => AppError::UpstreamAuth(AUTH_GUIDANCE.to_string()),
        LlmError::Quota { .. } => AppError::UpstreamQuota(QUOTA_GUIDANCE.to_string()),
        other => AppError::Upstream(other.to_string()),
    }
}

/// Validates and concatenates the answer values in stable key order.
/// At least one non-blank value is required for the resolver to run.
fn join_answers(answers: &AnswerSet) -> Result<String, AppError> {
    if answers.values().all(|v| v.trim().is_empty()) {
        return Err(AppError::Validation(
            "No answers provided. Please fill out the form.".to_string(),
        ));
    }

    Ok(answers
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Disclaimer post-processing, applied to both tiers.
fn with_disclaimer(text: &str) -> String {
    format!("{text}\n\n{DISCLAIMER}")
}
