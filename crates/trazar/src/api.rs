//! API instruction parsing.
//!
//! Turns "send a POST request to /users with authentication" into a
//! structured intent: method, endpoint, auth requirement, payload
//! fields, and the ordered operation verbs the emitted code must mirror.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::instruction::endpoint_path_of;

/// HTTP method of the parsed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET (the default)
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Uppercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Playwright `request` fixture method name.
    #[must_use]
    pub fn fixture_call(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Whether requests with this method carry a body.
    #[must_use]
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

/// Operation verbs whose order the emitted code must preserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVerb {
    /// Issue the request
    Send,
    /// Capture the response payload
    Store,
    /// Fetch the resource again
    Read,
    /// Compare captured payloads
    Compare,
    /// Assert on the response
    Verify,
    /// Count returned records
    Count,
}

impl ApiVerb {
    /// The instruction word this verb was parsed from.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Store => "store",
            Self::Read => "read",
            Self::Compare => "compare",
            Self::Verify => "verify",
            Self::Count => "count",
        }
    }
}

/// One payload field detected in the instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiField {
    /// Field name
    pub name: String,
    /// Literal value from the instruction
    pub value: String,
}

/// Structured API intent parsed from one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedApiInstruction {
    /// Inferred HTTP method
    pub method: HttpMethod,
    /// Full request URL
    pub url: String,
    /// Path component of the URL
    pub endpoint: String,
    /// Whether an auth keyword was present
    pub requires_auth: bool,
    /// Payload fields named in the instruction
    pub fields: Vec<ApiField>,
    /// Operation verbs in instruction order
    pub verbs: Vec<ApiVerb>,
    /// Explicit status code mentioned, if any
    pub expected_status: Option<u16>,
}

/// Regex families for API instruction parsing.
#[derive(Debug, Clone)]
pub struct ApiInstructionParser {
    explicit_method: Regex,
    url_in_text: Regex,
    auth_keyword: Regex,
    ordered_verb: Regex,
    status_code: Regex,
    field_pair: Regex,
}

impl Default for ApiInstructionParser {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::expect_used)]
fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static api pattern always compiles")
}

impl ApiInstructionParser {
    /// Compile the parser's pattern families.
    #[must_use]
    pub fn new() -> Self {
        Self {
            explicit_method: rx(
                r"(?i)\b(?:send\s+(?:a|an)?\s*(get|post|put|patch|delete)\b|(get|post|put|patch|delete)\s+request)",
            ),
            url_in_text: rx(r#"https?://[^\s"'<>]+"#),
            auth_keyword: rx(
                r"(?i)\b(?:auth|authentication|authenticated|authorization|token|bearer|api\s+key|credentials|logged\s+in)\b",
            ),
            ordered_verb: rx(r"(?i)\b(send|store|read|compare|verify|count)\b"),
            status_code: rx(r"\b([2345]\d{2})\b"),
            field_pair: rx(r#"(?i)\b(\w+)\s*(?:=|:|\s+as)\s*"([^"]*)""#),
        }
    }

    /// Parse instruction text against a target URL.
    #[must_use]
    pub fn parse(&self, text: &str, target_url: &str) -> ParsedApiInstruction {
        let url = self
            .url_in_text
            .find(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',']).to_string())
            .unwrap_or_else(|| target_url.to_string());
        let endpoint = endpoint_path_of(&url);

        let method = self.infer_method(text);
        let requires_auth = self.auth_keyword.is_match(text);

        let mut verbs: Vec<(usize, ApiVerb)> = self
            .ordered_verb
            .captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(1)?;
                let verb = match m.as_str().to_lowercase().as_str() {
                    "send" => ApiVerb::Send,
                    "store" => ApiVerb::Store,
                    "read" => ApiVerb::Read,
                    "compare" => ApiVerb::Compare,
                    "verify" => ApiVerb::Verify,
                    "count" => ApiVerb::Count,
                    _ => return None,
                };
                Some((m.start(), verb))
            })
            .collect();
        verbs.sort_by_key(|(offset, _)| *offset);

        let expected_status = self
            .status_code
            .captures(text)
            .and_then(|c| c[1].parse::<u16>().ok());

        let fields = self
            .field_pair
            .captures_iter(text)
            .map(|c| ApiField {
                name: c[1].to_lowercase(),
                value: c[2].to_string(),
            })
            .collect();

        ParsedApiInstruction {
            method,
            url,
            endpoint,
            requires_auth,
            fields,
            verbs: verbs.into_iter().map(|(_, v)| v).collect(),
            expected_status,
        }
    }

    /// Explicit "send a GET request" phrasing wins over generic verb
    /// mapping, which wins over the GET default.
    fn infer_method(&self, text: &str) -> HttpMethod {
        if let Some(caps) = self.explicit_method.captures(text) {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_lowercase());
            match name.as_deref() {
                Some("post") => return HttpMethod::Post,
                Some("put") => return HttpMethod::Put,
                Some("patch") => return HttpMethod::Patch,
                Some("delete") => return HttpMethod::Delete,
                Some("get") => return HttpMethod::Get,
                _ => {}
            }
        }

        let lower = text.to_lowercase();
        for (verbs, method) in [
            (&["create", "add"][..], HttpMethod::Post),
            (&["update", "replace"][..], HttpMethod::Put),
            (&["modify", "change"][..], HttpMethod::Patch),
            (&["delete", "remove"][..], HttpMethod::Delete),
        ] {
            if verbs.iter().any(|v| contains_word(&lower, v)) {
                return method;
            }
        }
        HttpMethod::Get
    }
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.split(|c: char| !c.is_ascii_alphanumeric()).any(|w| w == word)
}

/// Precondition list for an API test. Pure: a function of method, path,
/// and auth requirement only.
#[must_use]
pub fn preconditions(method: HttpMethod, endpoint: &str, requires_auth: bool) -> Vec<String> {
    let mut out = vec![
        "API server is running and accessible".to_string(),
        format!("Endpoint {endpoint} is accessible"),
    ];
    if requires_auth {
        out.push("Valid authentication token is available".to_string());
    }
    if method.has_body() {
        out.push("Test data is prepared".to_string());
    }
    out
}
