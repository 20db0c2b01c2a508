//! Accessibility test generation.
//!
//! The enhanced path parses requirements and selects a template; the
//! basic path goes straight to the comprehensive scan. Explicit step
//! sequences (sequencing cues in the text) route through the guided
//! template with the user's steps ahead of the scan.

use crate::accessibility::{AccessibilityParser, AccessibilityRequirements};
use crate::catalog::ScenarioCatalog;
use crate::emit::accessibility as emit;
use crate::instruction::RawInstruction;
use crate::intent::TestType;
use crate::result::TrazarResult;
use crate::templates::{
    AccessibilityTemplate, AxeConfig, TemplateSelectionResult, TemplateSelector,
};
use crate::testcase::{Priority, TestCase};

/// Accessibility-domain generator.
#[derive(Debug, Clone, Default)]
pub struct AccessibilityGenerator {
    parser: AccessibilityParser,
    selector: TemplateSelector,
}

impl AccessibilityGenerator {
    /// Create the generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate accessibility test cases.
    ///
    /// `enhanced` comes from the intent classifier; when false the
    /// requirement parser is skipped and the comprehensive template is
    /// used as-is.
    pub fn generate(
        &self,
        instruction: &RawInstruction,
        enhanced: bool,
        catalog: &ScenarioCatalog,
    ) -> TrazarResult<Vec<TestCase>> {
        let (requirements, selection) = if enhanced {
            let requirements = self
                .parser
                .parse_instructions(&instruction.text, instruction.website_analysis.as_ref());
            let selection = self.selector.select_template(&requirements, &instruction.text);
            (requirements, selection)
        } else {
            (
                AccessibilityRequirements::default(),
                TemplateSelectionResult {
                    template: AccessibilityTemplate::ComprehensiveScan,
                    axe_config: AxeConfig::default(),
                    customizations: Vec::new(),
                },
            )
        };

        let script = if selection.template == AccessibilityTemplate::GuidedSteps {
            let steps = guided_steps(&instruction.text);
            emit::emit_guided(&selection, &instruction.target_url, &steps)
        } else {
            emit::emit_template(&selection, &instruction.target_url)
        };

        let scenario_id = scenario_for(selection.template);
        let scenario = catalog.get(scenario_id);
        let title = scenario.map_or("Accessibility scan", |s| s.name);
        let description = scenario.map_or(
            "Automated accessibility validation of the target page",
            |s| s.description,
        );

        let mut validation: Vec<String> = wcag_criteria(&requirements)
            .into_iter()
            .map(|c| format!("WCAG {c} is satisfied"))
            .collect();
        validation.push("axe-core reports zero violations".to_string());

        let case = TestCase::new(TestType::Accessibility, title)
            .description(description)
            .priority(Priority::High)
            .preconditions(vec![format!(
                "Target page {} is reachable",
                instruction.target_url
            )])
            .steps(steps_for(&selection, &instruction.target_url))
            .expected_result("No accessibility violations are reported")
            .validation_criteria(validation)
            .automation(script, selection.template == AccessibilityTemplate::GuidedSteps);

        Ok(vec![case])
    }
}

/// Collect distinct WCAG criteria across all requirement categories.
fn wcag_criteria(requirements: &AccessibilityRequirements) -> Vec<String> {
    let mut criteria: Vec<String> = requirements
        .dom_inspection
        .iter()
        .chain(&requirements.keyboard_navigation)
        .chain(&requirements.aria_compliance)
        .chain(&requirements.visual_accessibility)
        .chain(&requirements.wcag_guidelines)
        .flat_map(|r| r.wcag_criteria.iter().cloned())
        .collect();
    criteria.sort();
    criteria.dedup();
    criteria
}

/// The instruction lines a guided script replays, in input order.
fn guided_steps(text: &str) -> Vec<String> {
    text.split(['\n', ';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn scenario_for(template: AccessibilityTemplate) -> &'static str {
    match template {
        AccessibilityTemplate::ComprehensiveScan | AccessibilityTemplate::GuidedSteps => "AX001",
        AccessibilityTemplate::KeyboardNavigation => "AX002",
        AccessibilityTemplate::AriaCompliance => "AX003",
        AccessibilityTemplate::VisualContrast => "AX004",
        AccessibilityTemplate::DomStructure => "AX005",
    }
}

fn steps_for(selection: &TemplateSelectionResult, url: &str) -> Vec<String> {
    let mut steps = vec![format!("Navigate to {url}")];
    match selection.template {
        AccessibilityTemplate::KeyboardNavigation => {
            steps.push("Walk the tab order across interactive elements".to_string());
        }
        AccessibilityTemplate::AriaCompliance => {
            steps.push("Inspect controls for accessible names".to_string());
        }
        AccessibilityTemplate::DomStructure => {
            steps.push("Inspect the heading and landmark outline".to_string());
        }
        AccessibilityTemplate::GuidedSteps => {
            steps.push("Replay the instructed keyboard steps".to_string());
        }
        AccessibilityTemplate::ComprehensiveScan | AccessibilityTemplate::VisualContrast => {}
    }
    steps.push("Run the axe-core scan and collect violations".to_string());
    steps
}
