//! Element targeting with ordered selector fallback.
//!
//! Every named field or button resolves to an ordered candidate list
//! (id → name attribute → data-testid → generic type match). Emitters
//! join the candidates into one locator union and default to `.first()`
//! unless the instruction names a position explicitly.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of element being targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Text-entry input
    Input,
    /// Button or submit control
    Button,
    /// Dropdown/select control
    Select,
    /// Checkbox
    Checkbox,
    /// Anchor/link
    Link,
    /// Anything else, matched by text
    Generic,
}

/// Which match to use when several elements satisfy the union selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// First match (the default)
    First,
    /// Last match
    Last,
    /// Zero-based n-th match
    Nth(usize),
}

impl Position {
    /// Detect an explicit position mention ("first", "last", "second",
    /// "3rd", ...). Absent mentions default to `First`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("last") {
            return Self::Last;
        }
        for (word, index) in [
            ("second", 1),
            ("third", 2),
            ("fourth", 3),
            ("fifth", 4),
        ] {
            if lower.contains(word) {
                return Self::Nth(index);
            }
        }
        #[allow(clippy::expect_used)]
        let ordinal = Regex::new(r"\b(\d+)(?:st|nd|rd|th)\b")
            .expect("static ordinal pattern always compiles");
        if let Some(caps) = ordinal.captures(&lower) {
            if let Ok(n) = caps[1].parse::<usize>() {
                return Self::Nth(n.saturating_sub(1));
            }
        }
        Self::First
    }
}

/// A resolved element target: ordered selector candidates plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTarget {
    /// Kind of element
    pub element_type: ElementType,
    /// Ordered selector candidates, most specific first
    pub selector_candidates: Vec<String>,
    /// The text the candidates were derived from
    pub search_text: String,
    /// Which match to use
    pub position: Position,
    /// Targeting confidence in [0, 1]
    pub confidence: f32,
}

impl ElementTarget {
    /// Target a named form field.
    ///
    /// Known field names get a type-specific generic candidate
    /// (email → `input[type="email"]`), arbitrary names fall back to a
    /// placeholder match.
    #[must_use]
    pub fn for_field(name: &str) -> Self {
        let slug = slugify(name);
        let generic = match name {
            "email" => r#"input[type="email"]"#.to_string(),
            "password" => r#"input[type="password"]"#.to_string(),
            "phone" => r#"input[type="tel"]"#.to_string(),
            _ => format!(r#"input[placeholder*="{}" i]"#, escape_attr(name)),
        };
        let confidence = if matches!(name, "email" | "password" | "phone" | "username") {
            0.9
        } else {
            0.7
        };
        Self {
            element_type: ElementType::Input,
            selector_candidates: ordered_candidates(&slug, generic),
            search_text: name.to_string(),
            position: Position::First,
            confidence,
        }
    }

    /// Target a button or submit control by its visible text.
    #[must_use]
    pub fn for_button(text: &str) -> Self {
        let slug = slugify(text);
        let escaped = escape_attr(text);
        Self {
            element_type: ElementType::Button,
            selector_candidates: ordered_candidates(
                &slug,
                format!(r#"button:has-text("{escaped}")"#),
            ),
            search_text: text.to_string(),
            position: Position::from_text(text),
            confidence: 0.7,
        }
    }

    /// Target a select/dropdown control.
    #[must_use]
    pub fn for_select(name: &str) -> Self {
        let slug = slugify(name);
        Self {
            element_type: ElementType::Select,
            selector_candidates: ordered_candidates(&slug, "select".to_string()),
            search_text: name.to_string(),
            position: Position::First,
            confidence: 0.7,
        }
    }

    /// Target a checkbox by its label text.
    #[must_use]
    pub fn for_checkbox(text: &str) -> Self {
        let slug = slugify(text);
        Self {
            element_type: ElementType::Checkbox,
            selector_candidates: ordered_candidates(&slug, r#"input[type="checkbox"]"#.to_string()),
            search_text: text.to_string(),
            position: Position::First,
            confidence: 0.6,
        }
    }

    /// Target any element by its text content.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        let escaped = escape_attr(text);
        Self {
            element_type: ElementType::Generic,
            selector_candidates: vec![format!(r#"text="{escaped}""#)],
            search_text: text.to_string(),
            position: Position::from_text(text),
            confidence: 0.5,
        }
    }

    /// The union of all candidates, tried in order by the runtime.
    #[must_use]
    pub fn union_selector(&self) -> String {
        self.selector_candidates.join(", ")
    }
}

/// The spec'd fallback order: id → name attribute → data-testid → generic.
fn ordered_candidates(slug: &str, generic: String) -> Vec<String> {
    vec![
        format!("#{slug}"),
        format!(r#"[name="{slug}"]"#),
        format!(r#"[data-testid="{slug}"]"#),
        generic,
    ]
}

/// Lowercase, non-alphanumerics collapsed to single dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Escape a value for embedding inside a double-quoted CSS attribute.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}
