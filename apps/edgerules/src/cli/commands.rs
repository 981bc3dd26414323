//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, RuleJson, RulesResponse};
use crate::config::ConfigPaths;
use edgerules_core::{RuleSet, TransformError};

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn print_rule(rule: &RuleJson) {
    let priority = rule
        .priority
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    println!(
        "  {:<32} {:<16} -> {:<16} priority={:<4} confidence={}",
        rule.key, rule.source, rule.target, priority, rule.confidence
    );
    if !rule.exclude.is_empty() {
        println!("  {:<32} exclude: {}", "", rule.exclude.join(", "));
    }
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Load and validate the transformation document.
pub fn cmd_validate(
    paths: &ConfigPaths,
    json_mode: bool,
    verbose: bool,
) -> Result<(), TransformError> {
    let rules = paths.load_rule_set()?;

    if json_mode {
        print_json(&serde_json::json!({
            "valid": true,
            "config": paths.document.to_string_lossy(),
            "rules": rules.len(),
            "sources": rules.sources().len(),
            "default_confidence": rules.options().confidence.value(),
        }));
        return Ok(());
    }

    println!("Transformation document is valid");
    println!("================================");
    println!("Config:             {:?}", paths.document);
    println!("Rules:              {}", rules.len());
    println!("Sources:            {}", rules.sources().len());
    println!("Default Confidence: {}", rules.options().confidence.value());

    if verbose {
        println!();
        for rule in RulesResponse::all(&rules).rules {
            print_rule(&rule);
        }
    }

    Ok(())
}

// =============================================================================
// RULES COMMAND
// =============================================================================

/// List validated rules, optionally for one source.
pub fn cmd_rules(
    paths: &ConfigPaths,
    json_mode: bool,
    source: Option<&str>,
) -> Result<(), TransformError> {
    let rules = paths.load_rule_set()?;
    let listing = match source {
        Some(source) => RulesResponse::for_source(&rules, source),
        None => RulesResponse::all(&rules),
    };

    if json_mode {
        print_json(&serde_json::to_value(&listing).unwrap_or_default());
        return Ok(());
    }

    match source {
        Some(source) => println!("Rules for '{}' (highest precedence first)", source),
        None => println!("Transformation Rules"),
    }
    println!("====================");
    if listing.rules.is_empty() {
        println!("  (none)");
    }
    for rule in &listing.rules {
        print_rule(rule);
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Check which targets are reachable from a source.
///
/// No match is reported as a normal result, not as a command failure.
pub fn cmd_check(
    paths: &ConfigPaths,
    json_mode: bool,
    source: &str,
    targets: &[String],
) -> Result<(), TransformError> {
    let rules = paths.load_rule_set()?;
    print_check(&rules, json_mode, source, targets);
    Ok(())
}

fn print_check(rules: &RuleSet, json_mode: bool, source: &str, targets: &[String]) {
    let response = api::run_check(rules, source, targets);

    if json_mode {
        print_json(&serde_json::to_value(&response).unwrap_or_default());
        return;
    }

    if !response.matched {
        println!("No transformations from '{}' to any of: {}", source, targets.join(", "));
        return;
    }

    println!("Transformations from '{}':", source);
    for matched in &response.targets {
        println!(
            "  -> {:<16} via {:<32} confidence={}",
            matched.target, matched.rule, matched.confidence
        );
    }
}

// =============================================================================
// VOCABULARY COMMAND
// =============================================================================

/// List the active entity vocabulary.
pub fn cmd_vocabulary(paths: &ConfigPaths, json_mode: bool) -> Result<(), TransformError> {
    let vocabulary = paths.load_vocabulary()?;

    if json_mode {
        let names: Vec<&str> = vocabulary.names().collect();
        print_json(&serde_json::json!({
            "builtin": paths.vocabulary.is_none(),
            "types": names,
        }));
        return Ok(());
    }

    match &paths.vocabulary {
        Some(path) => println!("Entity Vocabulary ({:?})", path),
        None => println!("Entity Vocabulary (built-in)"),
    }
    println!("=================");
    for name in vocabulary.names() {
        println!("  {}", name);
    }

    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Validate the document, then serve queries over HTTP.
///
/// The server never starts with a rejected document.
pub async fn cmd_serve(paths: &ConfigPaths, host: &str, port: u16) -> Result<(), TransformError> {
    let rules = paths.load_rule_set()?;

    println!("edgerules query server starting...");
    println!();
    println!("Configuration:");
    println!("  Host:   {}", host);
    println!("  Port:   {}", port);
    println!("  Config: {:?}", paths.document);
    println!("  Rules:  {}", rules.len());
    println!();
    println!("Endpoints:");
    println!("  GET  /health         - Health check");
    println!("  GET  /rules          - List validated rules");
    println!("  GET  /rules/{{source}} - Rules of one source");
    println!("  POST /check          - Reachable targets for a source");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, rules).await
}
