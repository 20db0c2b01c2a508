//! Request-side data model: raw instructions and page-structure snapshots.
//!
//! These types mirror the JSON contracts of the surrounding HTTP layer
//! (camelCase on the wire) but carry no transport logic themselves. A
//! [`RawInstruction`] is immutable once built; every pipeline stage takes
//! it by reference and produces fresh output.

use serde::{Deserialize, Serialize};

use crate::intent::TestType;

/// A single interactive element observed on the target page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveElement {
    /// HTML tag name (e.g. "button", "input")
    pub tag: String,
    /// `type` attribute, when present
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    /// Visible text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `aria-label` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    /// ARIA role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A form field observed inside a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field name attribute
    pub name: String,
    /// Input type (text, email, password, ...)
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    /// Whether the field is marked required
    #[serde(default)]
    pub required: bool,
}

fn default_field_type() -> String {
    "text".to_string()
}

/// A form observed on the target page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    /// CSS selector locating the form
    #[serde(default)]
    pub selector: String,
    /// Fields inside the form
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// Optional page-structure snapshot supplied by an external analyzer.
///
/// Every generator must degrade gracefully when this is absent; the
/// helpers on this type return non-null defaults so call sites never
/// branch on `Option` internals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteAnalysis {
    /// URL the snapshot was taken from
    #[serde(default)]
    pub url: String,
    /// Interactive elements found on the page
    #[serde(default)]
    pub interactive_elements: Vec<InteractiveElement>,
    /// Forms found on the page
    #[serde(default)]
    pub forms: Vec<FormInfo>,
}

impl WebsiteAnalysis {
    /// Elements matching a tag name, case-insensitively.
    #[must_use]
    pub fn elements_with_tag(&self, tag: &str) -> Vec<&InteractiveElement> {
        self.interactive_elements
            .iter()
            .filter(|e| e.tag.eq_ignore_ascii_case(tag))
            .collect()
    }

    /// All form fields across every observed form.
    #[must_use]
    pub fn all_form_fields(&self) -> Vec<&FormField> {
        self.forms.iter().flat_map(|f| f.fields.iter()).collect()
    }
}

/// An immutable free-text testing instruction plus its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInstruction {
    /// The instruction text, verbatim
    pub text: String,
    /// URL of the system under test
    pub target_url: String,
    /// Optional page-structure snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_analysis: Option<WebsiteAnalysis>,
}

impl RawInstruction {
    /// Create an instruction without a page snapshot.
    #[must_use]
    pub fn new(text: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_url: target_url.into(),
            website_analysis: None,
        }
    }

    /// Attach a page-structure snapshot.
    #[must_use]
    pub fn with_analysis(mut self, analysis: WebsiteAnalysis) -> Self {
        self.website_analysis = Some(analysis);
        self
    }

    /// Path component of the target URL ("/" when absent or unparseable).
    #[must_use]
    pub fn endpoint_path(&self) -> String {
        endpoint_path_of(&self.target_url)
    }
}

/// Extract the path component of a URL without a full URL parser.
///
/// "https://api.example.com/users?id=1" -> "/users". Anything without a
/// scheme/host split degrades to "/".
#[must_use]
pub fn endpoint_path_of(url: &str) -> String {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    let after_host = match without_scheme.find('/') {
        Some(idx) => &without_scheme[idx..],
        None => "/",
    };
    let path = after_host
        .split(['?', '#'])
        .next()
        .filter(|p| !p.is_empty())
        .unwrap_or("/");
    path.to_string()
}

/// A full generation request: instruction plus an optional explicit
/// test-type override.
///
/// When `test_types` is present it fully bypasses classification; the
/// router never blends explicit types with inferred secondary types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The instruction to compile
    #[serde(flatten)]
    pub instruction: RawInstruction,
    /// Explicit test types, overriding classification entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_types: Option<Vec<TestType>>,
}

impl GenerationRequest {
    /// Create a request from text and target URL.
    #[must_use]
    pub fn new(text: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            instruction: RawInstruction::new(text, target_url),
            test_types: None,
        }
    }

    /// Set an explicit test-type override.
    #[must_use]
    pub fn with_types(mut self, types: Vec<TestType>) -> Self {
        self.test_types = Some(types);
        self
    }

    /// Attach a page-structure snapshot.
    #[must_use]
    pub fn with_analysis(mut self, analysis: WebsiteAnalysis) -> Self {
        self.instruction.website_analysis = Some(analysis);
        self
    }
}
