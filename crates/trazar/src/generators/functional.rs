//! Functional test generation.
//!
//! Specific instructions become exactly one test case mirroring the
//! literal steps; generic requests fall back to the three-scenario
//! template suite from the catalog.

use crate::action::{ActionExtractor, ActionKind};
use crate::catalog::ScenarioCatalog;
use crate::emit::functional as emit;
use crate::instruction::RawInstruction;
use crate::intent::TestType;
use crate::result::TrazarResult;
use crate::specificity::SpecificityDetector;
use crate::testcase::{Priority, TestCase};

/// Functional-domain generator.
#[derive(Debug, Clone, Default)]
pub struct FunctionalGenerator {
    detector: SpecificityDetector,
    extractor: ActionExtractor,
}

impl FunctionalGenerator {
    /// Create the generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate functional test cases for an instruction.
    pub fn generate(
        &self,
        instruction: &RawInstruction,
        catalog: &ScenarioCatalog,
    ) -> TrazarResult<Vec<TestCase>> {
        let actions = self
            .extractor
            .extract(&instruction.text, &instruction.target_url);

        // instruction-based only when the text is specific AND at least
        // one line survived the cascade (actions[0] is the synthesized
        // navigation)
        if self.detector.is_specific(&instruction.text) && actions.len() > 1 {
            let title = flow_title(&instruction.text);
            let steps: Vec<String> = actions.iter().map(|a| a.describe()).collect();
            let validation: Vec<String> = actions
                .iter()
                .filter_map(|a| match &a.kind {
                    ActionKind::Verify { condition } => Some(format!("Confirm {condition}")),
                    _ => None,
                })
                .collect();
            let script = emit::emit_actions(&title, &actions);

            let case = TestCase::new(TestType::Functional, title)
                .description(format!(
                    "Executes the instructed flow against {}",
                    instruction.target_url
                ))
                .priority(Priority::High)
                .preconditions(vec![format!(
                    "Target page {} is reachable",
                    instruction.target_url
                )])
                .steps(steps)
                .expected_result("All steps complete without errors")
                .validation_criteria(validation)
                .automation(script, true);
            return Ok(vec![case]);
        }

        Ok(self.template_suite(instruction, catalog))
    }

    /// The canned three-scenario functional suite.
    fn template_suite(
        &self,
        instruction: &RawInstruction,
        catalog: &ScenarioCatalog,
    ) -> Vec<TestCase> {
        let url = &instruction.target_url;
        let analysis = instruction.website_analysis.as_ref();
        let scenarios = catalog.for_domain(TestType::Functional);

        scenarios
            .iter()
            .map(|scenario| {
                let (script, steps) = match scenario.id {
                    "FN002" => (
                        emit::emit_form_validation(url, analysis),
                        vec![
                            format!("Navigate to {url}"),
                            "Submit the first form without filling any field".to_string(),
                            "Observe validation feedback".to_string(),
                        ],
                    ),
                    "FN003" => (
                        emit::emit_interactive_smoke(url, analysis),
                        vec![
                            format!("Navigate to {url}"),
                            "Locate interactive elements".to_string(),
                            "Confirm they are enabled".to_string(),
                        ],
                    ),
                    _ => (
                        emit::emit_page_load(url),
                        vec![
                            format!("Navigate to {url}"),
                            "Confirm the document title is present".to_string(),
                        ],
                    ),
                };
                TestCase::new(TestType::Functional, scenario.name)
                    .description(scenario.description)
                    .priority(Priority::Medium)
                    .preconditions(vec![format!("Target page {url} is reachable")])
                    .steps(steps)
                    .expected_result(scenario.description)
                    .validation_criteria(vec![format!("Scenario {} holds", scenario.id)])
                    .automation(script, false)
            })
            .collect()
    }
}

fn flow_title(text: &str) -> String {
    let first_line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("instructed flow");
    let mut title: String = first_line.chars().take(60).collect();
    if first_line.chars().count() > 60 {
        title.push('…');
    }
    format!("User flow: {title}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn generate(text: &str) -> Vec<TestCase> {
        FunctionalGenerator::new()
            .generate(
                &RawInstruction::new(text, "https://example.com"),
                &ScenarioCatalog::new(),
            )
            .unwrap()
    }

    #[test]
    fn test_specific_instruction_yields_one_case() {
        let cases = generate("enter username as \"bob\"\nclick Login\nverify dashboard is visible");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].test_type, TestType::Functional);
        assert!(cases[0].steps.len() == 4); // navigate + 3 instructed steps
        assert!(cases[0].automation.contains("test("));
    }

    #[test]
    fn test_generic_request_yields_template_suite() {
        let cases = generate("make sure the site works");
        assert_eq!(cases.len(), 3);
        for case in &cases {
            assert!(!case.automation.is_empty());
        }
    }

    #[test]
    fn test_specific_text_with_no_parsable_lines_falls_back() {
        // "measure" makes it specific, but no line matches a pattern
        let cases = generate("measure how pleasant the page feels");
        assert_eq!(cases.len(), 3);
    }

    #[test]
    fn test_verify_lines_become_validation_criteria() {
        let cases = generate("click Login\nverify the dashboard is visible");
        assert_eq!(cases[0].validation_criteria.len(), 1);
        assert!(cases[0].validation_criteria[0].contains("dashboard"));
    }

    #[test]
    fn test_long_title_truncated() {
        let text = format!("click {}", "x".repeat(100));
        let cases = generate(&text);
        assert!(cases[0].title.chars().count() < 75);
    }
}
