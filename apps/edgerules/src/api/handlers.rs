//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//! All handlers only read the shared `RuleSet`.

use super::{
    AppState,
    types::{CheckRequest, CheckResponse, HealthResponse, MatchedTarget, RulesResponse},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use edgerules_core::RuleSet;

// =============================================================================
// SHARED QUERY
// =============================================================================

/// Run a reachability query and attach the governing rule to each match.
///
/// The only error `check_transformations` returns is `NoMatch`, which becomes
/// a `matched = false` response logged at debug level.
pub fn run_check(rules: &RuleSet, source: &str, targets: &[String]) -> CheckResponse {
    match rules.check_transformations(source, targets) {
        Ok(matches) => {
            let matched = matches
                .iter()
                .filter_map(|target| {
                    rules
                        .resolve(source, target)
                        .map(|(key, rule)| MatchedTarget {
                            target: target.to_string(),
                            rule: key.to_string(),
                            priority: rule.priority.value(),
                            confidence: rule.confidence.value(),
                        })
                })
                .collect();
            CheckResponse::matched(source, matched)
        }
        Err(e) => {
            tracing::debug!(
                source,
                candidates = targets.len(),
                reason = %e,
                "No transformation matches"
            );
            CheckResponse::no_match(source)
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// RULES HANDLERS
// =============================================================================

/// List every validated rule.
pub async fn rules_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(RulesResponse::all(&state.rules)))
}

/// List the rules of one source, highest precedence first.
pub async fn source_rules_handler(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(RulesResponse::for_source(&state.rules, &source)),
    )
}

// =============================================================================
// CHECK HANDLER
// =============================================================================

/// Decide which candidate targets are reachable from a source.
pub async fn check_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> impl IntoResponse {
    if request.source.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(CheckResponse::error("", "source must not be empty")),
        );
    }

    (
        StatusCode::OK,
        Json(run_check(&state.rules, &request.source, &request.targets)),
    )
}
