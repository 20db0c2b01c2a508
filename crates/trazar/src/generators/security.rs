//! Security test generation.
//!
//! Template-only: the canned probe suite runs whenever security signal
//! routes here. There is no instruction-based security path.

use crate::catalog::ScenarioCatalog;
use crate::emit::security as emit;
use crate::instruction::RawInstruction;
use crate::intent::TestType;
use crate::result::TrazarResult;
use crate::testcase::{Priority, TestCase};

/// Security-domain generator.
#[derive(Debug, Clone, Default)]
pub struct SecurityGenerator;

impl SecurityGenerator {
    /// Create the generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate the canned probe suite for the target.
    pub fn generate(
        &self,
        instruction: &RawInstruction,
        catalog: &ScenarioCatalog,
    ) -> TrazarResult<Vec<TestCase>> {
        let url = &instruction.target_url;
        let cases = catalog
            .for_domain(TestType::Security)
            .into_iter()
            .map(|scenario| {
                let script = match scenario.id {
                    "SC002" => emit::emit_header_inspection(url),
                    "SC003" => emit::emit_xss_probe(url),
                    "SC004" => emit::emit_sql_error_probe(url),
                    _ => emit::emit_https_check(url),
                };
                TestCase::new(TestType::Security, scenario.name)
                    .description(scenario.description)
                    .priority(Priority::High)
                    .preconditions(vec![format!("Target {url} is reachable")])
                    .steps(vec![
                        format!("Navigate to {url}"),
                        scenario.description.to_string(),
                    ])
                    .expected_result(scenario.description)
                    .validation_criteria(vec![format!("Scenario {} holds", scenario.id)])
                    .automation(script, false)
            })
            .collect();
        Ok(cases)
    }
}
