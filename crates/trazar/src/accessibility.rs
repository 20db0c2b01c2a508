//! Accessibility requirement parsing.
//!
//! Instruction fragments are classified into five requirement categories
//! via keyword families. Every requirement carries a non-empty WCAG
//! criteria list: explicit dotted references are honored, otherwise the
//! category default applies (keyboard → 2.1.1, aria → 4.1.2, visual →
//! 1.4.3, structure → 1.3.1).

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::instruction::WebsiteAnalysis;

/// Requirement category buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementCategory {
    /// Markup/structure inspection (headings, alt text, landmarks)
    DomInspection,
    /// Keyboard operability and focus management
    KeyboardNavigation,
    /// ARIA attributes and accessible names
    AriaCompliance,
    /// Contrast, color, zoom, text sizing
    VisualAccessibility,
    /// Explicit WCAG/compliance references
    WcagGuidelines,
}

/// One categorized requirement with its WCAG success criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityRequirement {
    /// What must hold
    pub description: String,
    /// Bucket this requirement belongs to
    pub category: RequirementCategory,
    /// Non-empty dotted WCAG criteria (e.g. "2.4.3")
    pub wcag_criteria: Vec<String>,
}

/// The five category lists. A requirement mentioning several concerns
/// appears in several lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityRequirements {
    /// Markup/structure checks
    pub dom_inspection: Vec<AccessibilityRequirement>,
    /// Keyboard operability checks
    pub keyboard_navigation: Vec<AccessibilityRequirement>,
    /// ARIA checks
    pub aria_compliance: Vec<AccessibilityRequirement>,
    /// Visual checks
    pub visual_accessibility: Vec<AccessibilityRequirement>,
    /// Explicit WCAG guideline checks
    pub wcag_guidelines: Vec<AccessibilityRequirement>,
}

impl AccessibilityRequirements {
    /// Total requirement count across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.dom_inspection.len()
            + self.keyboard_navigation.len()
            + self.aria_compliance.len()
            + self.visual_accessibility.len()
            + self.wcag_guidelines.len()
    }

    /// True when no category has requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The category with the most requirements, ties resolved in
    /// declaration order. `None` when empty.
    #[must_use]
    pub fn dominant_category(&self) -> Option<RequirementCategory> {
        let counts = [
            (RequirementCategory::DomInspection, self.dom_inspection.len()),
            (
                RequirementCategory::KeyboardNavigation,
                self.keyboard_navigation.len(),
            ),
            (RequirementCategory::AriaCompliance, self.aria_compliance.len()),
            (
                RequirementCategory::VisualAccessibility,
                self.visual_accessibility.len(),
            ),
            (RequirementCategory::WcagGuidelines, self.wcag_guidelines.len()),
        ];
        let mut best: Option<(RequirementCategory, usize)> = None;
        for (category, count) in counts {
            if count > 0 && best.map_or(true, |(_, n)| count > n) {
                best = Some((category, count));
            }
        }
        best.map(|(c, _)| c)
    }

    fn push(&mut self, requirement: AccessibilityRequirement) {
        match requirement.category {
            RequirementCategory::DomInspection => self.dom_inspection.push(requirement),
            RequirementCategory::KeyboardNavigation => self.keyboard_navigation.push(requirement),
            RequirementCategory::AriaCompliance => self.aria_compliance.push(requirement),
            RequirementCategory::VisualAccessibility => {
                self.visual_accessibility.push(requirement);
            }
            RequirementCategory::WcagGuidelines => self.wcag_guidelines.push(requirement),
        }
    }
}

/// One keyword family mapping matches to a category and default criteria.
#[derive(Debug, Clone)]
struct CategoryFamily {
    category: RequirementCategory,
    pattern: Regex,
    default_criteria: &'static [&'static str],
}

/// Keyword-family parser for accessibility instructions.
#[derive(Debug, Clone)]
pub struct AccessibilityParser {
    families: Vec<CategoryFamily>,
    dotted_criterion: Regex,
}

impl Default for AccessibilityParser {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::expect_used)]
fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static accessibility pattern always compiles")
}

impl AccessibilityParser {
    /// Build the parser with the fixed keyword families.
    #[must_use]
    pub fn new() -> Self {
        Self {
            families: vec![
                CategoryFamily {
                    category: RequirementCategory::KeyboardNavigation,
                    pattern: rx(
                        r"(?i)\b(?:keyboard|tab(?:bing)?|tab\s+order|focus|shortcut|arrow\s+keys?|escape\s+key)\b",
                    ),
                    default_criteria: &["2.1.1"],
                },
                CategoryFamily {
                    category: RequirementCategory::AriaCompliance,
                    pattern: rx(
                        r"(?i)\b(?:aria(?:-\w+)?|role|screen\s+reader|accessible\s+name|label(?:s|led|ling)?|landmark|assistive)\b",
                    ),
                    default_criteria: &["4.1.2"],
                },
                CategoryFamily {
                    category: RequirementCategory::VisualAccessibility,
                    pattern: rx(
                        r"(?i)\b(?:contrast|colou?r|zoom|text\s+siz\w+|font\s+siz\w+|resize|magnif\w+|dark\s+mode)\b",
                    ),
                    default_criteria: &["1.4.3"],
                },
                CategoryFamily {
                    category: RequirementCategory::DomInspection,
                    pattern: rx(
                        r"(?i)\b(?:heading(?:s)?|alt\s+text|alt\s+attribute|image(?:s)?|structure|semantic|html|markup|list(?:s)?|table(?:s)?)\b",
                    ),
                    default_criteria: &["1.3.1"],
                },
                CategoryFamily {
                    category: RequirementCategory::WcagGuidelines,
                    pattern: rx(r"(?i)\b(?:wcag|guideline|compliance|compliant|level\s+aa?|success\s+criteri\w+|a11y|accessibility|accessible)\b"),
                    default_criteria: &["4.1.2"],
                },
            ],
            dotted_criterion: rx(r"\b(\d\.\d{1,2}\.\d{1,2})\b"),
        }
    }

    /// Parse instruction text into categorized requirements.
    ///
    /// Never fails; text with no recognizable fragments resolves to a
    /// single comprehensive-scan requirement so downstream template
    /// selection stays total.
    #[must_use]
    pub fn parse_instructions(
        &self,
        text: &str,
        analysis: Option<&WebsiteAnalysis>,
    ) -> AccessibilityRequirements {
        let mut requirements = AccessibilityRequirements::default();

        for fragment in split_fragments(text) {
            let explicit: Vec<String> = self
                .dotted_criterion
                .captures_iter(&fragment)
                .map(|c| c[1].to_string())
                .collect();

            for family in &self.families {
                if family.pattern.is_match(&fragment) {
                    let criteria = if explicit.is_empty() {
                        family
                            .default_criteria
                            .iter()
                            .map(|s| (*s).to_string())
                            .collect()
                    } else {
                        explicit.clone()
                    };
                    requirements.push(AccessibilityRequirement {
                        description: fragment.clone(),
                        category: family.category,
                        wcag_criteria: criteria,
                    });
                }
            }
        }

        // Snapshot hint: unnamed interactive elements need accessible names
        if let Some(analysis) = analysis {
            let unnamed = analysis.interactive_elements.iter().any(|e| {
                e.aria_label.is_none() && e.text.as_deref().unwrap_or("").trim().is_empty()
            });
            if unnamed {
                requirements.push(AccessibilityRequirement {
                    description: "Interactive elements expose accessible names".to_string(),
                    category: RequirementCategory::AriaCompliance,
                    wcag_criteria: vec!["4.1.2".to_string()],
                });
            }
        }

        if requirements.is_empty() {
            requirements.push(AccessibilityRequirement {
                description: "Full WCAG 2.1 AA rule scan".to_string(),
                category: RequirementCategory::WcagGuidelines,
                wcag_criteria: vec![
                    "1.3.1".to_string(),
                    "1.4.3".to_string(),
                    "2.1.1".to_string(),
                    "4.1.2".to_string(),
                ],
            });
        }

        requirements
    }
}

/// Split instruction text into classifiable fragments.
///
/// Periods split only when followed by whitespace so dotted WCAG
/// references ("2.4.3") survive intact.
fn split_fragments(text: &str) -> Vec<String> {
    text.split(['\n', ';'])
        .flat_map(|s| s.split(". "))
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::instruction::InteractiveElement;

    fn parse(text: &str) -> AccessibilityRequirements {
        AccessibilityParser::new().parse_instructions(text, None)
    }

    #[test]
    fn test_keyboard_fragment_gets_default_criterion() {
        let reqs = parse("check keyboard navigation through the menu");
        assert_eq!(reqs.keyboard_navigation.len(), 1);
        assert_eq!(reqs.keyboard_navigation[0].wcag_criteria, vec!["2.1.1"]);
    }

    #[test]
    fn test_explicit_dotted_reference_wins() {
        let reqs = parse("verify focus order per 2.4.3");
        assert_eq!(reqs.keyboard_navigation.len(), 1);
        assert_eq!(reqs.keyboard_navigation[0].wcag_criteria, vec!["2.4.3"]);
    }

    #[test]
    fn test_fragment_lands_in_multiple_categories() {
        let reqs = parse("check color contrast of headings");
        assert_eq!(reqs.visual_accessibility.len(), 1);
        assert_eq!(reqs.dom_inspection.len(), 1);
    }

    #[test]
    fn test_every_requirement_has_criteria() {
        let reqs = parse(
            "check contrast\nverify aria labels\ntest keyboard access; inspect heading structure",
        );
        assert!(reqs.total() >= 4);
        let all = reqs
            .dom_inspection
            .iter()
            .chain(&reqs.keyboard_navigation)
            .chain(&reqs.aria_compliance)
            .chain(&reqs.visual_accessibility)
            .chain(&reqs.wcag_guidelines);
        for req in all {
            assert!(!req.wcag_criteria.is_empty(), "{req:?}");
        }
    }

    #[test]
    fn test_unrecognized_text_degrades_to_comprehensive_scan() {
        let reqs = parse("just make it nice");
        assert_eq!(reqs.wcag_guidelines.len(), 1);
        assert!(!reqs.wcag_guidelines[0].wcag_criteria.is_empty());
    }

    #[test]
    fn test_empty_text_degrades_to_comprehensive_scan() {
        let reqs = parse("");
        assert_eq!(reqs.total(), 1);
    }

    #[test]
    fn test_dominant_category() {
        let reqs = parse("check contrast; verify color scheme; check keyboard focus");
        assert_eq!(
            reqs.dominant_category(),
            Some(RequirementCategory::VisualAccessibility)
        );
    }

    #[test]
    fn test_snapshot_unnamed_elements_add_aria_requirement() {
        let analysis = WebsiteAnalysis {
            url: String::new(),
            interactive_elements: vec![InteractiveElement {
                tag: "button".to_string(),
                ..Default::default()
            }],
            forms: vec![],
        };
        let reqs =
            AccessibilityParser::new().parse_instructions("check contrast", Some(&analysis));
        assert_eq!(reqs.aria_compliance.len(), 1);
    }
}
