//! Intent classification for free-text testing instructions.
//!
//! The classifier is a pure function of its inputs: immutable per-domain
//! keyword dictionaries are compiled once into a [`ClassifierConfig`] and
//! matched case-insensitively with word-boundary awareness. No global
//! state, no I/O, no randomness.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::instruction::WebsiteAnalysis;

/// Test domain for a generated test case.
///
/// Declaration order is the stable aggregation order used by the router.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// User-flow and UI interaction tests
    Functional,
    /// WCAG/axe-core accessibility tests
    Accessibility,
    /// HTTP API tests
    Api,
    /// Security probes
    Security,
    /// Multi-domain signal; expanded by the router
    Mixed,
}

impl TestType {
    /// The four concrete generator domains, in stable order.
    pub const DOMAINS: [Self; 4] = [
        Self::Functional,
        Self::Accessibility,
        Self::Api,
        Self::Security,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::Accessibility => "accessibility",
            Self::Api => "api",
            Self::Security => "security",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one instruction text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestIntent {
    /// Domain with the strongest signal (or `Mixed`)
    pub primary_type: TestType,
    /// Domains with signal above threshold but below primary
    pub secondary_types: Vec<TestType>,
    /// Classification confidence in [0, 1]
    pub confidence: f32,
    /// Matched keywords per domain
    pub detected_keywords: BTreeMap<TestType, Vec<String>>,
    /// Whether the enhanced accessibility parser should run
    pub use_enhanced_accessibility_parser: bool,
}

impl TestIntent {
    /// Lowest-confidence functional default used for unclassifiable input.
    #[must_use]
    pub fn functional_default() -> Self {
        Self {
            primary_type: TestType::Functional,
            secondary_types: Vec::new(),
            confidence: 0.1,
            detected_keywords: BTreeMap::new(),
            use_enhanced_accessibility_parser: false,
        }
    }

    /// Domains the router should dispatch to, in stable order.
    ///
    /// `Mixed` expands to the secondary types that carried the signal.
    #[must_use]
    pub fn routing_domains(&self) -> Vec<TestType> {
        let mut domains: Vec<TestType> = if self.primary_type == TestType::Mixed {
            self.secondary_types.clone()
        } else {
            let mut d = vec![self.primary_type];
            d.extend(self.secondary_types.iter().copied());
            d
        };
        domains.sort_unstable();
        domains.dedup();
        domains
    }
}

/// One keyword pattern with its weight.
#[derive(Debug, Clone)]
struct KeywordEntry {
    /// Canonical keyword text, reported in `detected_keywords`
    keyword: String,
    /// Compiled word-boundary matcher
    pattern: Regex,
    /// Score contribution on match
    weight: u32,
}

/// Compile a keyword into a case-insensitive, word-boundary regex.
///
/// Multi-word keywords tolerate hyphens and repeated whitespace between
/// words ("color contrast" also matches "color-contrast"). Patterns are
/// escaped literals, so compilation cannot fail.
#[allow(clippy::expect_used)]
fn compile_keyword(keyword: &str, weight: u32) -> KeywordEntry {
    let body = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[\s-]+");
    let pattern = Regex::new(&format!(r"(?i)\b{body}\b"))
        .expect("escaped keyword literal always compiles");
    KeywordEntry {
        keyword: keyword.to_string(),
        pattern,
        weight,
    }
}

/// Immutable keyword dictionary for one domain.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    entries: Vec<KeywordEntry>,
}

impl KeywordSet {
    /// Build a set from `(keyword, weight)` pairs.
    #[must_use]
    pub fn new(keywords: &[(&str, u32)]) -> Self {
        Self {
            entries: keywords
                .iter()
                .map(|(k, w)| compile_keyword(k, *w))
                .collect(),
        }
    }

    /// Matched canonical keywords and their summed weight.
    fn score(&self, text: &str) -> (Vec<String>, u32) {
        let mut matched = Vec::new();
        let mut total = 0;
        for entry in &self.entries {
            if entry.pattern.is_match(text) {
                matched.push(entry.keyword.clone());
                total += entry.weight;
            }
        }
        (matched, total)
    }

    /// Whether any keyword in the set matches.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.pattern.is_match(text))
    }
}

/// Injected configuration tables for the classifier.
///
/// Built once, shared read-only. Substituting a custom table in tests is
/// the supported way to exercise edge cases.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    functional: KeywordSet,
    accessibility: KeywordSet,
    api: KeywordSet,
    security: KeywordSet,
    /// High-specificity accessibility terms forcing the enhanced parser
    enhanced_accessibility: KeywordSet,
    /// Maximum score gap still treated as a tie
    mixed_margin: u32,
    /// Minimum score for a tie candidate or secondary domain
    signal_threshold: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            functional: KeywordSet::new(&[
                ("click", 1),
                ("login", 1),
                ("log in", 1),
                ("logout", 1),
                ("sign up", 1),
                ("register", 1),
                ("form", 1),
                ("submit", 1),
                ("button", 1),
                ("navigate", 1),
                ("navigation", 1),
                ("link", 1),
                ("page", 1),
                ("fill", 1),
                ("field", 1),
                ("input", 1),
                ("enter", 1),
                ("select", 1),
                ("dropdown", 1),
                ("checkbox", 1),
                ("search", 1),
                ("user flow", 2),
                ("workflow", 2),
                ("end to end", 2),
            ]),
            accessibility: KeywordSet::new(&[
                ("accessibility", 2),
                ("accessible", 2),
                ("a11y", 2),
                ("wcag", 2),
                ("aria", 2),
                ("aria-label", 2),
                ("contrast", 1),
                ("color contrast", 2),
                ("screen reader", 2),
                ("keyboard navigation", 2),
                ("tab order", 2),
                ("focus order", 2),
                ("focus indicator", 2),
                ("alt text", 2),
                ("axe", 2),
                ("landmark", 1),
                ("heading structure", 2),
                ("semantic html", 2),
                ("assistive", 1),
                ("skip link", 1),
            ]),
            api: KeywordSet::new(&[
                ("api", 2),
                ("endpoint", 2),
                ("rest", 1),
                ("graphql", 1),
                ("http", 1),
                ("get request", 2),
                ("post request", 2),
                ("put request", 2),
                ("patch request", 2),
                ("delete request", 2),
                ("status code", 2),
                ("response", 1),
                ("request body", 1),
                ("payload", 1),
                ("json", 1),
                ("header", 1),
                ("authentication", 1),
                ("token", 1),
                ("latency", 1),
            ]),
            security: KeywordSet::new(&[
                ("security", 2),
                ("xss", 2),
                ("cross-site scripting", 2),
                ("sql injection", 2),
                ("injection", 1),
                ("csrf", 2),
                ("vulnerability", 2),
                ("vulnerabilities", 2),
                ("https", 1),
                ("secure", 1),
                ("sanitize", 1),
                ("session hijacking", 2),
                ("authentication bypass", 2),
                ("penetration", 1),
                ("cors", 1),
            ]),
            enhanced_accessibility: KeywordSet::new(&[
                ("screen reader", 1),
                ("aria-label", 1),
                ("aria attributes", 1),
                ("wcag", 1),
                ("axe", 1),
                ("color contrast", 1),
                ("keyboard navigation", 1),
                ("tab order", 1),
                ("focus order", 1),
                ("focus indicator", 1),
                ("alt text", 1),
                ("landmark", 1),
                ("semantic html", 1),
                ("assistive technology", 1),
            ]),
            mixed_margin: 1,
            signal_threshold: 2,
        }
    }
}

impl ClassifierConfig {
    /// Build a config with custom dictionaries and default thresholds.
    #[must_use]
    pub fn with_dictionaries(
        functional: KeywordSet,
        accessibility: KeywordSet,
        api: KeywordSet,
        security: KeywordSet,
        enhanced_accessibility: KeywordSet,
    ) -> Self {
        Self {
            functional,
            accessibility,
            api,
            security,
            enhanced_accessibility,
            ..Self::default()
        }
    }

    fn set_for(&self, domain: TestType) -> &KeywordSet {
        match domain {
            TestType::Accessibility => &self.accessibility,
            TestType::Api => &self.api,
            TestType::Security => &self.security,
            // Mixed has no dictionary of its own
            TestType::Functional | TestType::Mixed => &self.functional,
        }
    }
}

/// Rule-based intent classifier.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    config: ClassifierConfig,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the default dictionaries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    /// Create a classifier with injected dictionaries.
    #[must_use]
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify instruction text into a [`TestIntent`].
    ///
    /// Never fails: empty or unmatchable input degrades to the
    /// lowest-confidence functional default.
    #[must_use]
    pub fn classify(&self, text: &str, analysis: Option<&WebsiteAnalysis>) -> TestIntent {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TestIntent::functional_default();
        }

        let mut scores: BTreeMap<TestType, u32> = BTreeMap::new();
        let mut detected: BTreeMap<TestType, Vec<String>> = BTreeMap::new();
        for domain in TestType::DOMAINS {
            let (matched, score) = self.config.set_for(domain).score(trimmed);
            if score > 0 {
                scores.insert(domain, score);
                detected.insert(domain, matched);
            }
        }

        // Snapshot hints only reinforce domains that already have
        // textual signal; they never introduce a domain on their own.
        if let Some(analysis) = analysis {
            if !analysis.forms.is_empty() {
                if let Some(score) = scores.get_mut(&TestType::Functional) {
                    *score += 1;
                }
            }
            let has_aria = analysis
                .interactive_elements
                .iter()
                .any(|e| e.aria_label.is_some() || e.role.is_some());
            if has_aria {
                if let Some(score) = scores.get_mut(&TestType::Accessibility) {
                    *score += 1;
                }
            }
        }

        if scores.is_empty() {
            return TestIntent::functional_default();
        }

        // Rank by score, ties broken by stable domain order.
        let mut ranked: Vec<(TestType, u32)> =
            scores.iter().map(|(d, s)| (*d, *s)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let (top_domain, top_score) = ranked[0];
        let threshold = self.config.signal_threshold;

        let tied: Vec<TestType> = ranked
            .iter()
            .filter(|(_, s)| *s >= threshold && top_score - *s <= self.config.mixed_margin)
            .map(|(d, _)| *d)
            .collect();
        let strong_count = ranked.iter().filter(|(_, s)| *s >= threshold).count();
        let is_mixed = tied.len() >= 2 || strong_count >= 3;

        let (primary, secondaries) = if is_mixed {
            let contributors: Vec<TestType> = ranked
                .iter()
                .filter(|(_, s)| *s >= threshold)
                .map(|(d, _)| *d)
                .collect();
            (TestType::Mixed, sorted_domains(contributors))
        } else {
            let secondaries: Vec<TestType> = ranked
                .iter()
                .skip(1)
                .filter(|(_, s)| *s >= threshold)
                .map(|(d, _)| *d)
                .collect();
            (top_domain, sorted_domains(secondaries))
        };

        let confidence = compute_confidence(top_score, scores.values().sum(), is_mixed);

        let accessibility_in_play = primary == TestType::Accessibility
            || primary == TestType::Mixed
            || secondaries.contains(&TestType::Accessibility);
        let use_enhanced = accessibility_in_play
            && self.config.enhanced_accessibility.matches(trimmed);

        TestIntent {
            primary_type: primary,
            secondary_types: secondaries,
            confidence,
            detected_keywords: detected,
            use_enhanced_accessibility_parser: use_enhanced,
        }
    }
}

fn sorted_domains(mut domains: Vec<TestType>) -> Vec<TestType> {
    domains.sort_unstable();
    domains.dedup();
    domains
}

/// Confidence from hit strength and domain dominance, clamped to [0, 1].
fn compute_confidence(top_score: u32, total_score: u32, is_mixed: bool) -> f32 {
    if total_score == 0 {
        return 0.1;
    }
    let dominance = top_score as f32 / total_score as f32;
    let strength = (top_score as f32 / 5.0).min(1.0);
    let raw = if is_mixed {
        // Competing domains cap dominance but the signal itself is real.
        0.3 + 0.3 * strength
    } else {
        0.3 + 0.4 * dominance + 0.3 * strength
    };
    raw.clamp(0.0, 1.0)
}
