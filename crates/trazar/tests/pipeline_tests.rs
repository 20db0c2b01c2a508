//! End-to-end pipeline tests across the public API.
//!
//! Each test exercises the full classify → parse → route → emit path
//! the way an embedding server would.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use trazar::{
    AccessibilityParser, GenerationRequest, TemplateSelector, TestGenerator, TestType,
};

fn generator() -> TestGenerator {
    TestGenerator::new()
}

// ============================================================================
// Routing end to end
// ============================================================================

#[test]
fn specific_api_instruction_produces_exactly_one_case() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Send a GET request to https://api.example.com/users",
            "https://api.example.com/users",
        ))
        .unwrap();

    assert_eq!(outcome.test_cases.len(), 1);
    assert_eq!(outcome.test_cases[0].test_type, TestType::Api);
}

#[test]
fn generic_api_prompt_produces_template_suite() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Test the API",
            "https://api.example.com/users",
        ))
        .unwrap();

    assert!(outcome.test_cases.len() > 1);
    assert!(outcome
        .test_cases
        .iter()
        .all(|c| c.test_type == TestType::Api));
}

#[test]
fn get_without_auth_has_exactly_two_preconditions() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Send a GET request to https://api.example.com/users",
            "https://api.example.com/users",
        ))
        .unwrap();

    assert_eq!(
        outcome.test_cases[0].preconditions,
        vec![
            "API server is running and accessible".to_string(),
            "Endpoint /users is accessible".to_string(),
        ]
    );
}

#[test]
fn post_with_auth_adds_token_and_test_data_preconditions() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Send a POST request to https://api.example.com/users with authentication",
            "https://api.example.com/users",
        ))
        .unwrap();

    let pre = &outcome.test_cases[0].preconditions;
    assert!(pre.contains(&"Valid authentication token is available".to_string()));
    assert!(pre.contains(&"Test data is prepared".to_string()));
}

#[test]
fn ordered_verbs_appear_in_order_in_emitted_code() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Send a GET request to https://api.example.com/users, store the response, count the records, verify the status",
            "https://api.example.com/users",
        ))
        .unwrap();

    let script = &outcome.test_cases[0].automation;
    let body = &script[script.find("test(").unwrap()..];
    let offsets: Vec<usize> = ["// send", "// store", "// count", "// verify"]
        .iter()
        .map(|v| body.find(v).unwrap_or_else(|| panic!("missing {v}")))
        .collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

// ============================================================================
// Accessibility totality
// ============================================================================

#[test]
fn template_selection_is_total_over_degenerate_inputs() {
    let parser = AccessibilityParser::new();
    let selector = TemplateSelector::new();
    let long_input = "b".repeat(600);

    for text in ["", "   ", "a", long_input.as_str()] {
        let requirements = parser.parse_instructions(text, None);
        let result = selector.select_template(&requirements, text);
        assert!(!result.axe_config.tags.is_empty(), "input {text:?}");
    }
}

#[test]
fn degenerate_accessibility_inputs_emit_axe_scan() {
    let long_input = "b".repeat(600);
    for text in ["", "   ", "a", long_input.as_str()] {
        let outcome = generator()
            .generate(
                &GenerationRequest::new(text, "https://example.com")
                    .with_types(vec![TestType::Accessibility]),
            )
            .unwrap();

        assert_eq!(outcome.test_cases.len(), 1, "input {text:?}");
        let script = &outcome.test_cases[0].automation;
        assert!(script.contains("AxeBuilder"), "input {text:?}");
        assert!(script.contains("violations"), "input {text:?}");
        for tag in ["wcag2a", "wcag2aa", "wcag21aa"] {
            assert!(script.contains(tag), "tag {tag} for input {text:?}");
        }
    }
}

#[test]
fn enhanced_parser_flag_propagates_from_keywords() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Verify screen reader support and color contrast",
            "https://example.com",
        ))
        .unwrap();

    assert!(outcome.summary.intent.use_enhanced_accessibility_parser);
    assert!(outcome
        .summary
        .generators_used
        .contains(&TestType::Accessibility));
}

// ============================================================================
// Fallback and aggregation
// ============================================================================

#[test]
fn low_confidence_text_still_yields_results() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "do something good",
            "https://example.com",
        ))
        .unwrap();

    assert!(!outcome.test_cases.is_empty());
    assert!(outcome
        .summary
        .generators_used
        .contains(&TestType::Functional));
}

#[test]
fn every_case_has_a_self_contained_script() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Test the API endpoint and check WCAG contrast",
            "https://api.example.com/users",
        ))
        .unwrap();

    for case in &outcome.test_cases {
        let script = &case.automation;
        assert!(!script.is_empty());
        assert_eq!(script.matches("test(").count(), 1, "case {}", case.title);
        // one import block: all imports precede all other code
        let last_import = script.rfind("import ").unwrap();
        let first_test = script.find("test(").unwrap();
        assert!(last_import < first_test, "case {}", case.title);
    }
}

#[test]
fn merged_scripts_recover_each_body_after_one_import_block() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Test the API",
            "https://api.example.com/users",
        ))
        .unwrap();

    let scripts: Vec<String> = outcome
        .test_cases
        .iter()
        .map(|c| c.automation.clone())
        .collect();
    let merged = trazar::emit::merge_scripts(&scripts);

    assert_eq!(merged.matches("test(").count(), scripts.len());
    assert_eq!(
        merged
            .lines()
            .filter(|l| l.trim_start().starts_with("import "))
            .count(),
        1
    );
    let first_test = merged.find("test(").unwrap();
    let last_import = merged.rfind("import ").unwrap();
    assert!(last_import < first_test);
}

#[test]
fn missing_url_is_the_only_fast_fail() {
    let err = generator()
        .generate(&GenerationRequest::new("click Login", ""))
        .unwrap_err();
    assert!(err.to_string().contains("target URL"));
}

#[test]
fn website_analysis_absence_never_changes_success() {
    let with_none = generator()
        .generate(&GenerationRequest::new(
            "fill the form and submit",
            "https://example.com",
        ))
        .unwrap();
    assert!(!with_none.test_cases.is_empty());
}

#[test]
fn outcome_round_trips_through_json() {
    let outcome = generator()
        .generate(&GenerationRequest::new(
            "Test the API with authentication",
            "https://api.example.com/users",
        ))
        .unwrap();

    let json = serde_json::to_string(&outcome).unwrap();
    let back: trazar::GenerationOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcome);
}
