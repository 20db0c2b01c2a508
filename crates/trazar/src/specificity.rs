//! Specificity detection: concrete instruction vs. generic request.
//!
//! A text is "specific" iff it contains at least one imperative action
//! verb from a fixed lexicon. The flag drives the binary generation-path
//! choice in every domain: instruction-based (one test case mirroring
//! literal steps) or the template-based canned suite.

use regex::Regex;

/// Imperative verbs that mark an instruction as specific.
const ACTION_VERBS: [&str; 20] = [
    "send", "store", "read", "verify", "count", "expect", "measure", "click", "enter", "fill",
    "type", "select", "press", "submit", "navigate", "hover", "scroll", "upload", "choose",
    "assert",
];

/// Detects whether instruction text is a concrete action list.
#[derive(Debug, Clone)]
pub struct SpecificityDetector {
    pattern: Regex,
}

impl Default for SpecificityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecificityDetector {
    /// Build the detector with the fixed verb lexicon.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn new() -> Self {
        let body = ACTION_VERBS.join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{body})\b"))
            .expect("static verb alternation always compiles");
        Self { pattern }
    }

    /// True iff the text contains at least one imperative action verb.
    #[must_use]
    pub fn is_specific(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}
