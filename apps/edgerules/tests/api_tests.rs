//! Integration tests for the edgerules HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use edgerules::api::{
    AppState, CheckRequest, CheckResponse, HealthResponse, RulesResponse, create_router,
};
use edgerules_core::{AssetVocabulary, TransformDocument};
use serde_json::json;
use tower::ServiceExt;

const RULES_YAML: &str = r"
options:
  confidence: 50

transformations:
  FQDN->IPAddress:
    priority: 1
    confidence: 80
  FQDN->DomainRecord:
    priority: 2
  FQDN->ALL:
    exclude: [RIROrg, FQDN]
  IPAddress->Netblock:
    priority: 2
  Netblock->none:
";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn create_state() -> AppState {
    let rules = TransformDocument::from_yaml_str(RULES_YAML)
        .unwrap()
        .into_rule_set(&AssetVocabulary::builtin())
        .unwrap();
    AppState::new(rules)
}

fn create_test_server() -> TestServer {
    TestServer::new(create_router(create_state())).unwrap()
}

fn check(source: &str, targets: &[&str]) -> CheckRequest {
    CheckRequest {
        source: source.to_string(),
        targets: targets.iter().map(|t| (*t).to_string()).collect(),
    }
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// RULES ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_rules_lists_every_rule() {
    let server = create_test_server();

    let response = server.get("/rules").await;

    response.assert_status_ok();
    let listing: RulesResponse = response.json();
    assert_eq!(listing.count, 5);
    assert_eq!(listing.rules.len(), 5);
    assert_eq!(listing.default_confidence, 50);
}

#[tokio::test]
async fn test_rules_preserve_original_keys() {
    let server = create_test_server();

    let listing: RulesResponse = server.get("/rules").await.json();
    let keys: Vec<&str> = listing.rules.iter().map(|r| r.key.as_str()).collect();

    assert!(keys.contains(&"FQDN->ALL"));
    assert!(keys.contains(&"Netblock->none"));
}

#[tokio::test]
async fn test_source_rules_in_precedence_order() {
    let server = create_test_server();

    let response = server.get("/rules/fqdn").await;

    response.assert_status_ok();
    let listing: RulesResponse = response.json();
    let keys: Vec<&str> = listing.rules.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["FQDN->IPAddress", "FQDN->DomainRecord", "FQDN->ALL"]);

    let wildcard = &listing.rules[2];
    assert_eq!(wildcard.target, "all");
    assert_eq!(wildcard.priority, None);
    assert_eq!(wildcard.exclude, vec!["fqdn".to_string(), "rirorg".to_string()]);
}

#[tokio::test]
async fn test_source_rules_unknown_source_is_empty() {
    let server = create_test_server();

    let response = server.get("/rules/Person").await;

    response.assert_status_ok();
    let listing: RulesResponse = response.json();
    assert_eq!(listing.count, 0);
    assert!(listing.rules.is_empty());
}

// =============================================================================
// CHECK ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_check_explicit_and_wildcard_matches() {
    let server = create_test_server();

    let response = server
        .post("/check")
        .json(&check("FQDN", &["IPAddress", "Netblock", "FQDN", "RIROrg"]))
        .await;

    response.assert_status_ok();
    let result: CheckResponse = response.json();
    assert!(result.matched);
    assert!(result.error.is_none());

    let targets: Vec<&str> = result.targets.iter().map(|t| t.target.as_str()).collect();
    assert_eq!(targets, vec!["ipaddress", "netblock"]);
}

#[tokio::test]
async fn test_check_reports_governing_rule() {
    let server = create_test_server();

    let result: CheckResponse = server
        .post("/check")
        .json(&check("fqdn", &["IPAddress", "Netblock"]))
        .await
        .json();

    let ip = result
        .targets
        .iter()
        .find(|t| t.target == "ipaddress")
        .unwrap();
    assert_eq!(ip.rule, "FQDN->IPAddress");
    assert_eq!(ip.priority, Some(1));
    assert_eq!(ip.confidence, 80);

    let netblock = result
        .targets
        .iter()
        .find(|t| t.target == "netblock")
        .unwrap();
    assert_eq!(netblock.rule, "FQDN->ALL");
    assert_eq!(netblock.priority, None);
    assert_eq!(netblock.confidence, 50);
}

#[tokio::test]
async fn test_check_no_match_is_not_an_error() {
    let server = create_test_server();

    let response = server
        .post("/check")
        .json(&check("IPAddress", &["FQDN"]))
        .await;

    response.assert_status_ok();
    let result: CheckResponse = response.json();
    assert!(!result.matched);
    assert!(result.targets.is_empty());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_check_none_rule_blocks_expansion() {
    let server = create_test_server();

    let result: CheckResponse = server
        .post("/check")
        .json(&check("Netblock", &["IPAddress", "Netblock"]))
        .await
        .json();

    assert!(!result.matched);
}

#[tokio::test]
async fn test_check_unknown_source_is_no_match() {
    let server = create_test_server();

    let result: CheckResponse = server
        .post("/check")
        .json(&check("Person", &["FQDN"]))
        .await
        .json();

    assert!(!result.matched);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_check_missing_targets_defaults_to_empty() {
    let server = create_test_server();

    let response = server.post("/check").json(&json!({ "source": "FQDN" })).await;

    response.assert_status_ok();
    let result: CheckResponse = response.json();
    assert!(!result.matched);
}

#[tokio::test]
async fn test_check_blank_targets_answer_without_error() {
    let server = create_test_server();

    let response = server
        .post("/check")
        .json(&check("FQDN", &["", "   "]))
        .await;

    response.assert_status_ok();
    let result: CheckResponse = response.json();
    assert!(!result.matched);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_check_empty_source_rejected() {
    let server = create_test_server();

    let response = server
        .post("/check")
        .json(&json!({ "source": "  ", "targets": ["FQDN"] }))
        .await;

    response.assert_status_bad_request();
    let result: CheckResponse = response.json();
    assert!(!result.matched);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_check_malformed_json_rejected() {
    let router = create_router(create_state());

    let request = Request::builder()
        .method("POST")
        .uri("/check")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"source\": "))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    assert_ne!(response.status(), StatusCode::OK);
}

// =============================================================================
// SHARED STATE TESTS
// =============================================================================

#[tokio::test]
async fn test_concurrent_checks_agree() {
    let state = create_state();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            let targets = vec!["IPAddress".to_string(), "FQDN".to_string()];
            edgerules::api::run_check(&state.rules, "FQDN", &targets)
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.matched);
        assert_eq!(result.targets.len(), 1);
        assert_eq!(result.targets[0].target, "ipaddress");
    }
}
