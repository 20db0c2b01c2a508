//! Accessibility template selection.
//!
//! Selection is total by contract: every input — empty, whitespace-only,
//! single characters, very long prose — resolves to a valid template and
//! axe configuration. Internal inconsistency falls back to the
//! comprehensive scan, never an error.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::accessibility::{AccessibilityRequirements, RequirementCategory};

/// The axe-core rule sets every emitted scan must tag.
pub const REQUIRED_TAGS: [&str; 3] = ["wcag2a", "wcag2aa", "wcag21aa"];

/// Code templates for accessibility tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessibilityTemplate {
    /// Full-page axe scan (the safe default)
    ComprehensiveScan,
    /// Tab walk plus focus assertions, then a scan
    KeyboardNavigation,
    /// Accessible-name checks, then a scan
    AriaCompliance,
    /// Contrast-focused scan
    VisualContrast,
    /// Heading/landmark structure checks, then a scan
    DomStructure,
    /// Explicit user-supplied step sequence, then a scan
    GuidedSteps,
}

/// Axe scanner configuration attached to a selected template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxeConfig {
    /// Rule-set tags passed to `withTags`
    pub tags: Vec<String>,
    /// Extra individual rules to emphasize
    pub rules: Vec<String>,
}

impl Default for AxeConfig {
    fn default() -> Self {
        Self {
            tags: REQUIRED_TAGS.iter().map(|t| (*t).to_string()).collect(),
            rules: Vec::new(),
        }
    }
}

/// Outcome of template selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelectionResult {
    /// The selected template
    pub template: AccessibilityTemplate,
    /// Scanner configuration
    pub axe_config: AxeConfig,
    /// Human-readable customizations applied on top of the template
    pub customizations: Vec<String>,
}

/// Deterministic template selector.
#[derive(Debug, Clone)]
pub struct TemplateSelector {
    sequencing_cue: Regex,
}

impl Default for TemplateSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSelector {
    /// Build the selector.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            // explicit step sequences: "press tab", "step 1", numbered lists
            sequencing_cue: Regex::new(
                r"(?i)(?:\bpress\s+(?:tab|enter|escape|arrow)\b|\bstep\s+\d+\b|^\s*\d+[.)]|\n\s*\d+[.)])",
            )
            .expect("static sequencing pattern always compiles"),
        }
    }

    /// Select a template for the parsed requirements and original text.
    ///
    /// Total: returns a valid template and axe config for every input.
    #[must_use]
    pub fn select_template(
        &self,
        requirements: &AccessibilityRequirements,
        text: &str,
    ) -> TemplateSelectionResult {
        if self.sequencing_cue.is_match(text) {
            return TemplateSelectionResult {
                template: AccessibilityTemplate::GuidedSteps,
                axe_config: AxeConfig::default(),
                customizations: vec!["follow explicit instruction steps".to_string()],
            };
        }

        let template = match requirements.dominant_category() {
            Some(RequirementCategory::KeyboardNavigation) => {
                AccessibilityTemplate::KeyboardNavigation
            }
            Some(RequirementCategory::AriaCompliance) => AccessibilityTemplate::AriaCompliance,
            Some(RequirementCategory::VisualAccessibility) => {
                AccessibilityTemplate::VisualContrast
            }
            Some(RequirementCategory::DomInspection) => AccessibilityTemplate::DomStructure,
            Some(RequirementCategory::WcagGuidelines) | None => {
                AccessibilityTemplate::ComprehensiveScan
            }
        };

        let mut config = AxeConfig::default();
        let mut customizations = Vec::new();

        if !requirements.visual_accessibility.is_empty() {
            config.rules.push("color-contrast".to_string());
            customizations.push("emphasize color-contrast rule".to_string());
        }
        if !requirements.aria_compliance.is_empty() {
            config.rules.push("aria-valid-attr".to_string());
            config.rules.push("button-name".to_string());
            customizations.push("emphasize ARIA naming rules".to_string());
        }
        if !requirements.dom_inspection.is_empty() {
            config.rules.push("image-alt".to_string());
            config.rules.push("heading-order".to_string());
            customizations.push("emphasize structure rules".to_string());
        }
        if !requirements.keyboard_navigation.is_empty() {
            customizations.push("include keyboard walk before scan".to_string());
        }

        TemplateSelectionResult {
            template,
            axe_config: config,
            customizations,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::accessibility::AccessibilityParser;

    fn select(text: &str) -> TemplateSelectionResult {
        let parser = AccessibilityParser::new();
        let reqs = parser.parse_instructions(text, None);
        TemplateSelector::new().select_template(&reqs, text)
    }

    #[test]
    fn test_total_on_degenerate_inputs() {
        let long = "a".repeat(600);
        for text in ["", "   ", "a", long.as_str()] {
            let result = select(text);
            assert!(!result.axe_config.tags.is_empty(), "input {text:?}");
        }
    }

    #[test]
    fn test_required_tags_always_present() {
        for text in ["", "check contrast", "press tab through the form", "verify aria"] {
            let result = select(text);
            for tag in REQUIRED_TAGS {
                assert!(result.axe_config.tags.iter().any(|t| t == tag));
            }
        }
    }

    #[test]
    fn test_generic_request_selects_comprehensive() {
        let result = select("check accessibility");
        assert_eq!(result.template, AccessibilityTemplate::ComprehensiveScan);
    }

    #[test]
    fn test_contrast_request_selects_visual() {
        let result = select("check color contrast on the homepage");
        assert_eq!(result.template, AccessibilityTemplate::VisualContrast);
        assert!(result.axe_config.rules.contains(&"color-contrast".to_string()));
    }

    #[test]
    fn test_keyboard_request_selects_keyboard() {
        let result = select("verify keyboard focus through the menu");
        assert_eq!(result.template, AccessibilityTemplate::KeyboardNavigation);
    }

    #[test]
    fn test_sequencing_cue_selects_guided() {
        let result = select("press tab, verify focus on the search field, press enter");
        assert_eq!(result.template, AccessibilityTemplate::GuidedSteps);
    }

    #[test]
    fn test_numbered_steps_select_guided() {
        let result = select("1. open the menu\n2. check focus\n3. close with escape");
        assert_eq!(result.template, AccessibilityTemplate::GuidedSteps);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let a = select("verify aria labels and roles");
        let b = select("verify aria labels and roles");
        assert_eq!(a, b);
    }
}
