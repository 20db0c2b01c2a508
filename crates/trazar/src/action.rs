//! Action extraction: instruction lines to an ordered action sequence.
//!
//! Each line runs through an ordered, mutually exclusive pattern cascade;
//! the first matching family wins. Lines matching no family are silently
//! dropped — a documented precision trade-off. Output order always equals
//! input order, and step numbers are 1-based and gapless.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Scroll destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollTarget {
    /// Top of the page
    Top,
    /// Bottom of the page
    Bottom,
    /// A named element
    Element(String),
}

/// A parsed browser action, one variant per action family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionKind {
    /// Navigate to a URL
    Navigate {
        /// Destination URL
        url: String,
    },
    /// Click an element
    Click {
        /// Element description (button/link text or field name)
        target: String,
    },
    /// Type a value into a field
    Type {
        /// Canonical field name
        field: String,
        /// Literal value to enter
        value: String,
    },
    /// Choose an option from a dropdown
    Select {
        /// Dropdown field name
        field: String,
        /// Option to choose
        value: String,
    },
    /// Toggle a checkbox on
    Check {
        /// Checkbox description
        target: String,
    },
    /// Assert a condition
    Verify {
        /// Condition text, verbatim from the instruction
        condition: String,
    },
    /// Hover over an element
    Hover {
        /// Element description
        target: String,
    },
    /// Scroll the page
    Scroll {
        /// Scroll destination
        target: ScrollTarget,
    },
}

/// One step of an instruction-based test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAction {
    /// 1-based, gapless, in instruction order
    pub step_number: u32,
    /// The action itself
    #[serde(flatten)]
    pub kind: ActionKind,
    /// The instruction line this was parsed from
    pub original_line: String,
}

impl ParsedAction {
    /// Human-readable step description for test-case step lists.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.kind {
            ActionKind::Navigate { url } => format!("Navigate to {url}"),
            ActionKind::Click { target } => format!("Click '{target}'"),
            ActionKind::Type { field, value } => {
                format!("Enter \"{value}\" into the {field} field")
            }
            ActionKind::Select { field, value } => {
                format!("Select \"{value}\" from the {field} dropdown")
            }
            ActionKind::Check { target } => format!("Check the {target}"),
            ActionKind::Verify { condition } => format!("Verify that {condition}"),
            ActionKind::Hover { target } => format!("Hover over {target}"),
            ActionKind::Scroll { target } => match target {
                ScrollTarget::Top => "Scroll to the top of the page".to_string(),
                ScrollTarget::Bottom => "Scroll to the bottom of the page".to_string(),
                ScrollTarget::Element(e) => format!("Scroll to {e}"),
            },
        }
    }
}

/// Compiled pattern families for the extraction cascade.
#[derive(Debug, Clone)]
pub struct ActionExtractor {
    entry_verb: Regex,
    quoted_value: Regex,
    unquoted_value: Regex,
    value_then_field: Regex,
    generic_field: Regex,
    select_from: Regex,
    select_as: Regex,
    check_target: Regex,
    // Common misspellings of "click" are accepted on purpose
    click_target: Regex,
    verify_condition: Regex,
    check_that: Regex,
    hover_target: Regex,
    scroll_verb: Regex,
    scroll_element: Regex,
    leading_number: Regex,
}

impl Default for ActionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::expect_used)]
fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static action pattern always compiles")
}

impl ActionExtractor {
    /// Compile the cascade's pattern families.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entry_verb: rx(r"(?i)\b(?:enter|type|fill(?:\s+in)?|input)\b"),
            quoted_value: rx(r#"(?i)\b(?:as|to|with|=)\s*["']([^"']*)["']"#),
            unquoted_value: rx(r"(?i)\b(?:as|to|with)\s+(\S+)\s*$"),
            value_then_field: rx(
                r#"(?i)\b(?:enter|type|fill(?:\s+in)?|input)\s+["']([^"']*)["']\s+(?:in(?:to)?|on)\s+(?:the\s+)?(.+?)(?:\s+(?:field|box|input))?\s*$"#,
            ),
            generic_field: rx(
                r"(?i)\b(?:enter|type|fill(?:\s+in)?|input)\s+(?:the\s+)?(.+?)\s+(?:as|to|with|=)",
            ),
            select_from: rx(
                r#"(?i)\b(?:select|choose|pick)\s+["']?([^"']+?)["']?\s+(?:from|in)\s+(?:the\s+)?(.+?)(?:\s+(?:dropdown|list|menu))?\s*$"#,
            ),
            select_as: rx(
                r#"(?i)\b(?:select|choose|pick)\s+(?:the\s+)?(.+?)\s+(?:as|to)\s+["']?([^"']+?)["']?\s*$"#,
            ),
            check_target: rx(r"(?i)\b(?:check|tick)\s+(?:the\s+)?(.+?)(?:\s+checkbox)?\s*$"),
            click_target: rx(
                r"(?i)\b(?:click|clcik|cilck|press|tap)(?:\s+(?:on|the)\b)*\s*(.*?)\s*(?:\s(?:button|link)\b)?\s*$",
            ),
            verify_condition: rx(
                r"(?i)\b(?:verify|assert|ensure|confirm|validate)\b(?:\s+that)?\s*(.*)",
            ),
            check_that: rx(r"(?i)\bcheck\s+(?:that|if|whether)\s+(.*)"),
            hover_target: rx(r"(?i)\bhover\s*(?:over|on)?\s*(?:the\s+)?(.+)"),
            scroll_verb: rx(r"(?i)\bscroll\b"),
            scroll_element: rx(r"(?i)\bscroll\s+(?:down\s+)?to\s+(?:the\s+)?(.+)"),
            leading_number: rx(r"(?i)^\s*(?:step\s+\d+\s*[:.)-]?|\d+\s*[.):])\s*"),
        }
    }

    /// Extract the ordered action sequence from instruction text.
    ///
    /// A synthesized "navigate to base URL" action is always step 1.
    #[must_use]
    pub fn extract(&self, text: &str, base_url: &str) -> Vec<ParsedAction> {
        let mut actions = vec![ParsedAction {
            step_number: 1,
            kind: ActionKind::Navigate {
                url: base_url.to_string(),
            },
            original_line: String::new(),
        }];

        for line in self.split_lines(text) {
            if let Some(kind) = self.parse_line(&line) {
                actions.push(ParsedAction {
                    step_number: 0,
                    kind,
                    original_line: line,
                });
            }
        }

        for (i, action) in actions.iter_mut().enumerate() {
            action.step_number = (i + 1) as u32;
        }
        actions
    }

    /// Split on newline/semicolon/comma/leading-number delimiters.
    ///
    /// Commas inside double-quoted spans do not split, so
    /// `enter name as "Doe, John"` survives as one line.
    #[must_use]
    pub fn split_lines(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        for raw in text.split(['\n', ';']) {
            let mut current = String::new();
            let mut in_quotes = false;
            for ch in raw.chars() {
                match ch {
                    '"' => {
                        in_quotes = !in_quotes;
                        current.push(ch);
                    }
                    ',' if !in_quotes => {
                        segments.push(std::mem::take(&mut current));
                    }
                    _ => current.push(ch),
                }
            }
            segments.push(current);
        }

        segments
            .into_iter()
            .map(|s| self.leading_number.replace(&s, "").trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Run one line through the ordered cascade. `None` means the line
    /// matched no family and is dropped.
    #[must_use]
    pub fn parse_line(&self, line: &str) -> Option<ActionKind> {
        self.parse_field_entry(line)
            .or_else(|| self.parse_select(line))
            .or_else(|| self.parse_check(line))
            .or_else(|| self.parse_click(line))
            .or_else(|| self.parse_verify(line))
            .or_else(|| self.parse_hover(line))
            .or_else(|| self.parse_scroll(line))
    }

    fn parse_field_entry(&self, line: &str) -> Option<ActionKind> {
        if !self.entry_verb.is_match(line) {
            return None;
        }

        // `enter "value" into the X field` puts the value first
        if let Some(caps) = self.value_then_field.captures(line) {
            let value = caps[1].to_string();
            let field = canonical_field(line)
                .unwrap_or_else(|| normalize_field_name(&caps[2]));
            return Some(ActionKind::Type { field, value });
        }

        let value = self
            .quoted_value
            .captures(line)
            .map(|c| c[1].to_string())
            .or_else(|| {
                self.unquoted_value
                    .captures(line)
                    .map(|c| c[1].trim_matches(['"', '\'']).to_string())
            })?;

        let field = canonical_field(line).or_else(|| {
            self.generic_field
                .captures(line)
                .map(|c| normalize_field_name(&c[1]))
        })?;

        Some(ActionKind::Type { field, value })
    }

    fn parse_select(&self, line: &str) -> Option<ActionKind> {
        if let Some(caps) = self.select_from.captures(line) {
            return Some(ActionKind::Select {
                field: normalize_field_name(&caps[2]),
                value: caps[1].trim().to_string(),
            });
        }
        if let Some(caps) = self.select_as.captures(line) {
            return Some(ActionKind::Select {
                field: normalize_field_name(&caps[1]),
                value: caps[2].trim().to_string(),
            });
        }
        None
    }

    fn parse_check(&self, line: &str) -> Option<ActionKind> {
        // "check that/if/whether ..." is an assertion, handled later
        if self.check_that.is_match(line) {
            return None;
        }
        let caps = self.check_target.captures(line)?;
        let target = caps[1].trim().to_string();
        if target.is_empty() {
            return None;
        }
        Some(ActionKind::Check { target })
    }

    fn parse_click(&self, line: &str) -> Option<ActionKind> {
        let caps = self.click_target.captures(line)?;
        let target = caps[1].trim().trim_matches(['"', '\'']).to_string();
        if target.is_empty() {
            return None;
        }
        Some(ActionKind::Click { target })
    }

    fn parse_verify(&self, line: &str) -> Option<ActionKind> {
        let condition = self
            .verify_condition
            .captures(line)
            .map(|c| c[1].to_string())
            .or_else(|| self.check_that.captures(line).map(|c| c[1].to_string()))?;
        let condition = condition.trim().to_string();
        if condition.is_empty() {
            return None;
        }
        Some(ActionKind::Verify { condition })
    }

    fn parse_hover(&self, line: &str) -> Option<ActionKind> {
        let caps = self.hover_target.captures(line)?;
        let target = caps[1].trim().to_string();
        if target.is_empty() {
            return None;
        }
        Some(ActionKind::Hover { target })
    }

    fn parse_scroll(&self, line: &str) -> Option<ActionKind> {
        if !self.scroll_verb.is_match(line) {
            return None;
        }
        let lower = line.to_lowercase();
        if lower.contains("top") {
            return Some(ActionKind::Scroll {
                target: ScrollTarget::Top,
            });
        }
        if lower.contains("bottom") {
            return Some(ActionKind::Scroll {
                target: ScrollTarget::Bottom,
            });
        }
        if let Some(caps) = self.scroll_element.captures(line) {
            return Some(ActionKind::Scroll {
                target: ScrollTarget::Element(caps[1].trim().to_string()),
            });
        }
        // bare "scroll down" / "scroll"
        Some(ActionKind::Scroll {
            target: if lower.contains("up") {
                ScrollTarget::Top
            } else {
                ScrollTarget::Bottom
            },
        })
    }
}

/// Canonical field synonyms. An explicit "email" mention always pre-empts
/// the looser "user"/"username" match.
fn canonical_field(line: &str) -> Option<String> {
    let lower = line.to_lowercase();
    if lower.contains("email") || lower.contains("e-mail") {
        return Some("email".to_string());
    }
    if lower.contains("username") || lower.contains("user name") || lower.contains("user") {
        return Some("username".to_string());
    }
    if lower.contains("phone") || lower.contains("telephone") || lower.contains("mobile") {
        return Some("phone".to_string());
    }
    if lower.contains("password") {
        return Some("password".to_string());
    }
    None
}

/// Lowercase, strip articles and trailing "field"/"box"/"input" nouns.
fn normalize_field_name(raw: &str) -> String {
    let mut name = raw.trim().trim_matches(['"', '\'']).to_lowercase();
    for suffix in [" field", " box", " input", " dropdown"] {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
        }
    }
    name.trim_start_matches("the ").trim().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Vec<ParsedAction> {
        ActionExtractor::new().extract(text, "https://example.com")
    }

    mod splitting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_newline_and_semicolon_split() {
            let lines = ActionExtractor::new()
                .split_lines("click Login\nenter password as \"x\"; verify dashboard loads");
            assert_eq!(lines.len(), 3);
        }

        #[test]
        fn test_comma_split_respects_quotes() {
            let lines =
                ActionExtractor::new().split_lines("enter name as \"Doe, John\", click Save");
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0], "enter name as \"Doe, John\"");
        }

        #[test]
        fn test_leading_numbers_stripped() {
            let lines = ActionExtractor::new()
                .split_lines("1. click Login\n2) enter username as \"bob\"\nstep 3: verify title");
            assert_eq!(lines[0], "click Login");
            assert_eq!(lines[1], "enter username as \"bob\"");
            assert_eq!(lines[2], "verify title");
        }

        #[test]
        fn test_empty_segments_dropped() {
            let lines = ActionExtractor::new().split_lines("click Login\n\n;;  \n");
            assert_eq!(lines.len(), 1);
        }
    }

    mod cascade {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_navigate_is_always_step_one() {
            let actions = extract("click Login");
            assert_eq!(actions[0].step_number, 1);
            assert_eq!(
                actions[0].kind,
                ActionKind::Navigate {
                    url: "https://example.com".to_string()
                }
            );
        }

        #[test]
        fn test_step_numbers_gapless_in_input_order() {
            let actions = extract(
                "enter username as \"bob\"\nnonsense line with no pattern\nclick Login\nverify dashboard is shown",
            );
            let numbers: Vec<u32> = actions.iter().map(|a| a.step_number).collect();
            assert_eq!(numbers, vec![1, 2, 3, 4]);
            assert!(matches!(actions[1].kind, ActionKind::Type { .. }));
            assert!(matches!(actions[2].kind, ActionKind::Click { .. }));
            assert!(matches!(actions[3].kind, ActionKind::Verify { .. }));
        }

        #[test]
        fn test_unmatched_lines_silently_dropped() {
            let actions = extract("the weather is nice today");
            assert_eq!(actions.len(), 1); // navigate only
        }

        #[test]
        fn test_field_synonym_username() {
            let actions = extract("enter user as \"alice\"");
            assert_eq!(
                actions[1].kind,
                ActionKind::Type {
                    field: "username".to_string(),
                    value: "alice".to_string()
                }
            );
        }

        #[test]
        fn test_email_preempts_username() {
            let actions = extract("enter the user email as \"a@b.com\"");
            assert_eq!(
                actions[1].kind,
                ActionKind::Type {
                    field: "email".to_string(),
                    value: "a@b.com".to_string()
                }
            );
        }

        #[test]
        fn test_field_synonym_phone() {
            let actions = extract("type the telephone number as \"555-0100\"");
            assert!(matches!(
                &actions[1].kind,
                ActionKind::Type { field, .. } if field == "phone"
            ));
        }

        #[test]
        fn test_generic_field_catch_all() {
            let actions = extract("enter discount code as \"SAVE10\"");
            assert_eq!(
                actions[1].kind,
                ActionKind::Type {
                    field: "discount code".to_string(),
                    value: "SAVE10".to_string()
                }
            );
        }

        #[test]
        fn test_value_then_field_order() {
            let actions = extract("type \"hello\" into the search field");
            assert_eq!(
                actions[1].kind,
                ActionKind::Type {
                    field: "search".to_string(),
                    value: "hello".to_string()
                }
            );
        }

        #[test]
        fn test_malformed_field_entry_yields_nothing() {
            // entry verb present but no value: dropped, not fatal
            let actions = extract("fill in the login form");
            assert_eq!(actions.len(), 1);
        }

        #[test]
        fn test_select_from_dropdown() {
            let actions = extract("select \"Canada\" from the country dropdown");
            assert_eq!(
                actions[1].kind,
                ActionKind::Select {
                    field: "country".to_string(),
                    value: "Canada".to_string()
                }
            );
        }

        #[test]
        fn test_check_checkbox() {
            let actions = extract("check the Remember me checkbox");
            assert_eq!(
                actions[1].kind,
                ActionKind::Check {
                    target: "Remember me".to_string()
                }
            );
        }

        #[test]
        fn test_check_that_is_an_assertion() {
            let actions = extract("check that the dashboard is visible");
            assert_eq!(
                actions[1].kind,
                ActionKind::Verify {
                    condition: "the dashboard is visible".to_string()
                }
            );
        }

        #[test]
        fn test_click_with_typo() {
            let actions = extract("clcik the Submit button");
            assert_eq!(
                actions[1].kind,
                ActionKind::Click {
                    target: "Submit".to_string()
                }
            );
        }

        #[test]
        fn test_click_strips_decoration() {
            let actions = extract("click on the \"Sign up\" link");
            assert_eq!(
                actions[1].kind,
                ActionKind::Click {
                    target: "Sign up".to_string()
                }
            );
        }

        #[test]
        fn test_hover() {
            let actions = extract("hover over the profile menu");
            assert_eq!(
                actions[1].kind,
                ActionKind::Hover {
                    target: "profile menu".to_string()
                }
            );
        }

        #[test]
        fn test_scroll_to_bottom() {
            let actions = extract("scroll to the bottom of the page");
            assert_eq!(
                actions[1].kind,
                ActionKind::Scroll {
                    target: ScrollTarget::Bottom
                }
            );
        }

        #[test]
        fn test_scroll_to_element() {
            let actions = extract("scroll down to the pricing section");
            assert_eq!(
                actions[1].kind,
                ActionKind::Scroll {
                    target: ScrollTarget::Element("pricing section".to_string())
                }
            );
        }

        #[test]
        fn test_output_order_equals_input_order() {
            let text = "scroll to the footer\nclick Login\nenter username as \"zed\"";
            let actions = extract(text);
            assert!(matches!(actions[1].kind, ActionKind::Scroll { .. }));
            assert!(matches!(actions[2].kind, ActionKind::Click { .. }));
            assert!(matches!(actions[3].kind, ActionKind::Type { .. }));
        }
    }

    mod describe {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_describe_type() {
            let action = ParsedAction {
                step_number: 2,
                kind: ActionKind::Type {
                    field: "username".to_string(),
                    value: "bob".to_string(),
                },
                original_line: "enter username as \"bob\"".to_string(),
            };
            assert_eq!(action.describe(), "Enter \"bob\" into the username field");
        }

        #[test]
        fn test_describe_navigate() {
            let action = ParsedAction {
                step_number: 1,
                kind: ActionKind::Navigate {
                    url: "https://example.com".to_string(),
                },
                original_line: String::new(),
            };
            assert_eq!(action.describe(), "Navigate to https://example.com");
        }
    }
}
