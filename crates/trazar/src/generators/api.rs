//! API test generation.
//!
//! Specific instructions become exactly one test case whose steps and
//! emitted code mirror the instruction's verbs in order. Generic
//! prompts fall back to the fixed per-endpoint suite: success,
//! validation, auth (only when auth is required), schema, performance.

use crate::api::{preconditions, ApiInstructionParser, ApiVerb, ParsedApiInstruction};
use crate::catalog::ScenarioCatalog;
use crate::emit::api as emit;
use crate::instruction::RawInstruction;
use crate::intent::TestType;
use crate::result::TrazarResult;
use crate::specificity::SpecificityDetector;
use crate::testcase::{Priority, TestCase};

/// API-domain generator.
#[derive(Debug, Clone, Default)]
pub struct ApiGenerator {
    parser: ApiInstructionParser,
    detector: SpecificityDetector,
}

impl ApiGenerator {
    /// Create the generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate API test cases for an instruction.
    pub fn generate(
        &self,
        instruction: &RawInstruction,
        catalog: &ScenarioCatalog,
    ) -> TrazarResult<Vec<TestCase>> {
        let parsed = self.parser.parse(&instruction.text, &instruction.target_url);

        if self.detector.is_specific(&instruction.text) {
            return Ok(vec![self.instruction_case(&parsed)]);
        }

        Ok(self.template_suite(&parsed, catalog))
    }

    /// Exactly one case mirroring the instruction.
    fn instruction_case(&self, parsed: &ParsedApiInstruction) -> TestCase {
        let title = format!(
            "{} {} behaves as instructed",
            parsed.method.as_str(),
            parsed.endpoint
        );
        let script = emit::emit_instruction(&title, parsed);

        let verbs: Vec<ApiVerb> = if parsed.verbs.is_empty() {
            vec![ApiVerb::Send, ApiVerb::Verify]
        } else {
            parsed.verbs.clone()
        };
        let steps: Vec<String> = verbs.iter().map(|v| verb_step(*v, parsed)).collect();

        let mut validation = vec![format!(
            "Each instructed operation runs in order against {}",
            parsed.endpoint
        )];
        if let Some(code) = parsed.expected_status {
            validation.push(format!("Response status is {code}"));
        }

        TestCase::new(TestType::Api, title)
            .description(format!(
                "Mirrors the instructed {} call against {}",
                parsed.method.as_str(),
                parsed.endpoint
            ))
            .priority(Priority::High)
            .preconditions(preconditions(
                parsed.method,
                &parsed.endpoint,
                parsed.requires_auth,
            ))
            .steps(steps)
            .expected_result("The instructed operations succeed in order")
            .validation_criteria(validation)
            .automation(script, true)
    }

    /// The fixed per-endpoint suite.
    fn template_suite(
        &self,
        parsed: &ParsedApiInstruction,
        catalog: &ScenarioCatalog,
    ) -> Vec<TestCase> {
        let mut cases = Vec::new();
        for scenario in catalog.for_domain(TestType::Api) {
            let script = match scenario.id {
                "AP001" => emit::emit_success(parsed),
                "AP002" => emit::emit_validation_error(parsed),
                "AP003" => {
                    if !parsed.requires_auth {
                        continue;
                    }
                    emit::emit_auth_failure(parsed)
                }
                "AP004" => emit::emit_schema(parsed),
                _ => emit::emit_performance(parsed),
            };
            let case = TestCase::new(TestType::Api, format!("{}: {}", scenario.name, parsed.endpoint))
                .description(scenario.description)
                .priority(if scenario.id == "AP001" {
                    Priority::Critical
                } else {
                    Priority::Medium
                })
                .preconditions(preconditions(
                    parsed.method,
                    &parsed.endpoint,
                    parsed.requires_auth,
                ))
                .steps(vec![
                    format!("Call {} {}", parsed.method.as_str(), parsed.endpoint),
                    scenario.description.to_string(),
                ])
                .expected_result(scenario.description)
                .validation_criteria(vec![format!("Scenario {} holds", scenario.id)])
                .automation(script, false);
            cases.push(case);
        }
        cases
    }
}

fn verb_step(verb: ApiVerb, parsed: &ParsedApiInstruction) -> String {
    match verb {
        ApiVerb::Send => format!(
            "Send the {} request to {}",
            parsed.method.as_str(),
            parsed.endpoint
        ),
        ApiVerb::Store => "Store the response payload".to_string(),
        ApiVerb::Read => "Read the resource back".to_string(),
        ApiVerb::Compare => "Compare the captured payloads".to_string(),
        ApiVerb::Verify => match parsed.expected_status {
            Some(code) => format!("Verify the response status is {code}"),
            None => "Verify the response status".to_string(),
        },
        ApiVerb::Count => "Count the returned records".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn generate(text: &str) -> Vec<TestCase> {
        ApiGenerator::new()
            .generate(
                &RawInstruction::new(text, "https://api.example.com/users"),
                &ScenarioCatalog::new(),
            )
            .unwrap()
    }

    #[test]
    fn test_specific_instruction_yields_exactly_one_case() {
        let cases = generate("Send a GET request to https://api.example.com/users");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].test_type, TestType::Api);
    }

    #[test]
    fn test_generic_prompt_yields_template_suite() {
        let cases = generate("Test the API");
        assert!(cases.len() > 1);
        // no auth keyword, so the auth-failure scenario is skipped
        assert_eq!(cases.len(), 4);
    }

    #[test]
    fn test_generic_prompt_with_auth_includes_auth_case() {
        let cases = generate("Test the API with authentication");
        assert_eq!(cases.len(), 5);
        assert!(cases.iter().any(|c| c.title.starts_with("Auth failure")));
    }

    #[test]
    fn test_get_without_auth_preconditions() {
        let cases = generate("Send a GET request to https://api.example.com/users");
        assert_eq!(
            cases[0].preconditions,
            vec![
                "API server is running and accessible".to_string(),
                "Endpoint /users is accessible".to_string(),
            ]
        );
    }

    #[test]
    fn test_post_with_auth_preconditions() {
        let cases = generate("Send a POST request to /users with authentication");
        let pre = &cases[0].preconditions;
        assert!(pre.contains(&"Valid authentication token is available".to_string()));
        assert!(pre.contains(&"Test data is prepared".to_string()));
    }

    #[test]
    fn test_steps_mirror_verb_order() {
        let cases =
            generate("Send a GET request, store the response, verify the status code is 200");
        let steps = &cases[0].steps;
        assert!(steps[0].starts_with("Send"));
        assert!(steps[1].starts_with("Store"));
        assert!(steps[2].starts_with("Verify"));
    }
}
