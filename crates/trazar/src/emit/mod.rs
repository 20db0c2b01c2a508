//! Script emission: structured IR in, executable Playwright text out.
//!
//! This layer is deliberately narrow: it never parses instruction text
//! and the parsers never format code. Every interpolated literal passes
//! through an escaping function before insertion so emitted syntax can
//! never break on quotes or control characters in instruction values.

pub mod accessibility;
pub mod api;
pub mod functional;
pub mod security;

use std::collections::HashMap;

use crate::selector::{ElementTarget, Position};

/// Import line shared by every emitted browser test.
pub const IMPORT_PLAYWRIGHT: &str = "import { test, expect } from '@playwright/test';";

/// Import line for axe-core accessibility scans.
pub const IMPORT_AXE: &str = "import AxeBuilder from '@axe-core/playwright';";

/// Escape a value for a single-quoted TypeScript string literal.
#[must_use]
pub fn escape_single(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str(r"\\"),
            '\'' => out.push_str(r"\'"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '\t' => out.push_str(r"\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for a double-quoted TypeScript string literal.
#[must_use]
pub fn escape_double(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '\t' => out.push_str(r"\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Per-base-name counters so repeated action types never collide on
/// variable names within one script.
#[derive(Debug, Default)]
pub struct VarNamer {
    used: HashMap<String, usize>,
}

impl VarNamer {
    /// Create an empty namer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `base` on first use, then `base2`, `base3`, ...
    pub fn next(&mut self, base: &str) -> String {
        let count = self.used.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base.to_string()
        } else {
            format!("{base}{count}")
        }
    }
}

/// Render a camelCase identifier from free text ("discount code" →
/// "discountCode"). Empty input degrades to "element".
#[must_use]
pub fn camel_ident(text: &str) -> String {
    let mut ident = String::new();
    for (i, word) in text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let lower = word.to_ascii_lowercase();
        if i == 0 {
            ident.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                ident.push(first.to_ascii_uppercase());
                ident.push_str(chars.as_str());
            }
        }
    }
    if ident.is_empty() {
        "element".to_string()
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("el{ident}")
    } else {
        ident
    }
}

/// Render a locator expression for an element target: the escaped
/// candidate union plus the position suffix (`.first()` by default).
#[must_use]
pub fn locator_expr(target: &ElementTarget) -> String {
    let union = escape_single(&target.union_selector());
    let suffix = match target.position {
        Position::First => ".first()".to_string(),
        Position::Last => ".last()".to_string(),
        Position::Nth(n) => format!(".nth({n})"),
    };
    format!("page.locator('{union}'){suffix}")
}

/// Header comment for an emitted script. The timestamp is supplied by
/// the caller (the core itself never reads the clock).
#[must_use]
pub fn generated_header(generated_at: Option<&str>) -> String {
    match generated_at {
        Some(ts) => format!("// Generated by trazar v{} on {ts}\n", env!("CARGO_PKG_VERSION")),
        None => format!("// Generated by trazar v{}\n", env!("CARGO_PKG_VERSION")),
    }
}

/// Wrap body lines in a `test(...)` function using the given fixture
/// ("page" for browser tests, "request" for API tests).
#[must_use]
pub fn test_fn(title: &str, fixture: &str, body: &[String]) -> String {
    let escaped = escape_single(title);
    let mut out = format!("test('{escaped}', async ({{ {fixture} }}) => {{\n");
    for line in body {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("});\n");
    out
}

/// Assemble a self-contained script: header, one import block, one test
/// function.
#[must_use]
pub fn assemble(imports: &[&str], test_function: &str) -> String {
    let mut out = generated_header(None);
    for import in imports {
        out.push_str(import);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(test_function);
    out
}

/// Merge N self-contained scripts into one: imports are deduplicated and
/// hoisted once (first-seen order), bodies are concatenated unchanged.
#[must_use]
pub fn merge_scripts(scripts: &[String]) -> String {
    let mut imports: Vec<String> = Vec::new();
    let mut bodies: Vec<String> = Vec::new();

    for script in scripts {
        let mut body_lines: Vec<&str> = Vec::new();
        for line in script.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("import ") {
                if !imports.iter().any(|i| i == trimmed) {
                    imports.push(trimmed.to_string());
                }
            } else if trimmed.starts_with("// Generated by trazar") {
                // one header for the merged file, not one per fragment
            } else {
                body_lines.push(line);
            }
        }
        let body = body_lines.join("\n").trim().to_string();
        if !body.is_empty() {
            bodies.push(body);
        }
    }

    let mut out = generated_header(None);
    for import in &imports {
        out.push_str(import);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&bodies.join("\n\n"));
    out.push('\n');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::selector::ElementTarget;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_single_quotes_and_backslash() {
        assert_eq!(escape_single(r"it's a \ test"), r"it\'s a \\ test");
    }

    #[test]
    fn test_escape_single_newline() {
        assert_eq!(escape_single("a\nb"), r"a\nb");
    }

    #[test]
    fn test_escape_double() {
        assert_eq!(escape_double(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn test_var_namer_counts_per_base() {
        let mut namer = VarNamer::new();
        assert_eq!(namer.next("usernameField"), "usernameField");
        assert_eq!(namer.next("usernameField"), "usernameField2");
        assert_eq!(namer.next("submitButton"), "submitButton");
        assert_eq!(namer.next("usernameField"), "usernameField3");
    }

    #[test]
    fn test_camel_ident() {
        assert_eq!(camel_ident("discount code"), "discountCode");
        assert_eq!(camel_ident("Sign up"), "signUp");
        assert_eq!(camel_ident(""), "element");
        assert_eq!(camel_ident("2fa code"), "el2faCode");
    }

    #[test]
    fn test_locator_expr_defaults_to_first() {
        let target = ElementTarget::for_field("username");
        let expr = locator_expr(&target);
        assert!(expr.starts_with("page.locator('#username, "));
        assert!(expr.ends_with(".first()"));
    }

    #[test]
    fn test_test_fn_escapes_title() {
        let script = test_fn("user's flow", "page", &["await page.goto('x');".to_string()]);
        assert!(script.contains(r"test('user\'s flow'"));
    }

    #[test]
    fn test_assemble_single_import_block() {
        let body = test_fn("t", "page", &[]);
        let script = assemble(&[IMPORT_PLAYWRIGHT], &body);
        assert_eq!(script.matches("import ").count(), 1);
        assert_eq!(script.matches("test(").count(), 1);
    }

    #[test]
    fn test_merge_dedupes_imports() {
        let a = assemble(&[IMPORT_PLAYWRIGHT], &test_fn("a", "page", &[]));
        let b = assemble(&[IMPORT_PLAYWRIGHT, IMPORT_AXE], &test_fn("b", "page", &[]));
        let merged = merge_scripts(&[a, b]);

        assert_eq!(merged.matches(IMPORT_PLAYWRIGHT).count(), 1);
        assert_eq!(merged.matches(IMPORT_AXE).count(), 1);
        assert_eq!(merged.matches("test(").count(), 2);
        // imports precede every test body
        let first_test = merged.find("test(").unwrap();
        let last_import = merged.rfind("import ").unwrap();
        assert!(last_import < first_test);
    }

    #[test]
    fn test_merge_recovers_n_bodies() {
        let scripts: Vec<String> = (0..4)
            .map(|i| assemble(&[IMPORT_PLAYWRIGHT], &test_fn(&format!("case {i}"), "page", &[])))
            .collect();
        let merged = merge_scripts(&scripts);
        let bodies: Vec<&str> = merged.matches("test(").collect();
        assert_eq!(bodies.len(), 4);
    }
}
