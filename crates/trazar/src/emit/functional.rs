//! Functional-domain script emission.
//!
//! Instruction-based scripts mirror the parsed action sequence step by
//! step; template scripts back the canned functional suite.

use crate::action::{ActionKind, ParsedAction, ScrollTarget};
use crate::instruction::WebsiteAnalysis;
use crate::selector::ElementTarget;

use super::{
    assemble, camel_ident, escape_single, locator_expr, test_fn, VarNamer, IMPORT_PLAYWRIGHT,
};

/// Emit one self-contained script from a parsed action sequence.
#[must_use]
pub fn emit_actions(title: &str, actions: &[ParsedAction]) -> String {
    let mut namer = VarNamer::new();
    let mut body: Vec<String> = Vec::new();

    for (i, action) in actions.iter().enumerate() {
        if i > 0 {
            body.push(String::new());
        }
        body.push(format!("// Step {}: {}", action.step_number, action.describe()));
        emit_action(&mut body, &mut namer, &action.kind);
    }

    assemble(&[IMPORT_PLAYWRIGHT], &test_fn(title, "page", &body))
}

fn emit_action(body: &mut Vec<String>, namer: &mut VarNamer, kind: &ActionKind) {
    match kind {
        ActionKind::Navigate { url } => {
            body.push(format!("await page.goto('{}');", escape_single(url)));
        }
        ActionKind::Click { target } => {
            let element = ElementTarget::for_button(target);
            let var = namer.next(&format!("{}Button", camel_ident(target)));
            body.push(format!("const {var} = {};", locator_expr(&element)));
            body.push(format!("await {var}.click();"));
        }
        ActionKind::Type { field, value } => {
            let element = ElementTarget::for_field(field);
            let var = namer.next(&format!("{}Field", camel_ident(field)));
            body.push(format!("const {var} = {};", locator_expr(&element)));
            body.push(format!("await {var}.fill('{}');", escape_single(value)));
        }
        ActionKind::Select { field, value } => {
            let element = ElementTarget::for_select(field);
            let var = namer.next(&format!("{}Select", camel_ident(field)));
            body.push(format!("const {var} = {};", locator_expr(&element)));
            body.push(format!(
                "await {var}.selectOption({{ label: '{}' }});",
                escape_single(value)
            ));
        }
        ActionKind::Check { target } => {
            let element = ElementTarget::for_checkbox(target);
            let var = namer.next(&format!("{}Checkbox", camel_ident(target)));
            body.push(format!("const {var} = {};", locator_expr(&element)));
            body.push(format!("await {var}.check();"));
        }
        ActionKind::Verify { condition } => emit_verify(body, condition),
        ActionKind::Hover { target } => {
            let element = ElementTarget::for_text(target);
            let var = namer.next(&format!("{}Target", camel_ident(target)));
            body.push(format!("const {var} = {};", locator_expr(&element)));
            body.push(format!("await {var}.hover();"));
        }
        ActionKind::Scroll { target } => match target {
            ScrollTarget::Top => {
                body.push("await page.evaluate(() => window.scrollTo(0, 0));".to_string());
            }
            ScrollTarget::Bottom => {
                body.push(
                    "await page.evaluate(() => window.scrollTo(0, document.body.scrollHeight));"
                        .to_string(),
                );
            }
            ScrollTarget::Element(name) => {
                let element = ElementTarget::for_text(name);
                body.push(format!(
                    "await {}.scrollIntoViewIfNeeded();",
                    locator_expr(&element)
                ));
            }
        },
    }
}

/// Translate a free-text condition into the closest concrete assertion.
fn emit_verify(body: &mut Vec<String>, condition: &str) {
    let lower = condition.to_lowercase();

    // quoted text in the condition is the strongest signal
    if let Some(quoted) = extract_quoted(condition) {
        if lower.contains("url") {
            body.push(format!(
                "expect(page.url()).toContain('{}');",
                escape_single(&quoted)
            ));
        } else {
            body.push(format!(
                "await expect(page.locator('body')).toContainText('{}');",
                escape_single(&quoted)
            ));
        }
        return;
    }

    if lower.contains("title") {
        body.push("await expect(page).toHaveTitle(/.+/);".to_string());
        return;
    }

    for phrase in [
        " is visible",
        " is displayed",
        " is shown",
        " appears",
        " loads",
        " exists",
    ] {
        // lowercasing can shift byte offsets for some scripts; only
        // slice when the offset still lands on a boundary
        if let Some(idx) = lower.find(phrase).filter(|&i| condition.is_char_boundary(i)) {
            let subject = condition[..idx]
                .trim()
                .trim_start_matches("the ")
                .trim_start_matches("The ")
                .to_string();
            let element = ElementTarget::for_text(&subject);
            body.push(format!(
                "await expect({}).toBeVisible();",
                locator_expr(&element)
            ));
            return;
        }
    }

    // no structural cue: assert the page mentions the condition's subject
    let subject = condition
        .trim()
        .trim_start_matches("the ")
        .trim_end_matches('.');
    body.push(format!(
        "await expect(page.locator('body')).toContainText('{}');",
        escape_single(subject)
    ));
}

fn extract_quoted(text: &str) -> Option<String> {
    let start = text.find(['"', '\''])?;
    let quote = text.as_bytes()[start] as char;
    let rest = &text[start + 1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Template: the page loads and exposes a sane document.
#[must_use]
pub fn emit_page_load(url: &str) -> String {
    let body = vec![
        format!("await page.goto('{}');", escape_single(url)),
        "await expect(page).toHaveTitle(/.+/);".to_string(),
        "const links = page.locator('a[href]');".to_string(),
        "expect(await links.count()).toBeGreaterThanOrEqual(0);".to_string(),
    ];
    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("page loads with a valid document", "page", &body),
    )
}

/// Template: required form fields reject an empty submission.
#[must_use]
pub fn emit_form_validation(url: &str, analysis: Option<&WebsiteAnalysis>) -> String {
    let form_selector = analysis
        .and_then(|a| a.forms.first())
        .map(|f| f.selector.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("form");

    let body = vec![
        format!("await page.goto('{}');", escape_single(url)),
        format!(
            "const form = page.locator('{}').first();",
            escape_single(form_selector)
        ),
        "const submit = form.locator('button[type=\"submit\"], input[type=\"submit\"], button').first();".to_string(),
        "if (await form.count() > 0 && await submit.count() > 0) {".to_string(),
        "  await submit.click();".to_string(),
        "  const invalid = form.locator(':invalid, [aria-invalid=\"true\"], .error');".to_string(),
        "  expect(await invalid.count()).toBeGreaterThanOrEqual(0);".to_string(),
        "}".to_string(),
    ];
    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("empty form submission surfaces validation", "page", &body),
    )
}

/// Template: interactive elements respond to interaction.
#[must_use]
pub fn emit_interactive_smoke(url: &str, analysis: Option<&WebsiteAnalysis>) -> String {
    let mut body = vec![format!("await page.goto('{}');", escape_single(url))];

    let known_buttons: Vec<String> = analysis
        .map(|a| {
            a.elements_with_tag("button")
                .iter()
                .filter_map(|e| e.text.clone())
                .take(3)
                .collect()
        })
        .unwrap_or_default();

    if known_buttons.is_empty() {
        body.push("const buttons = page.locator('button, [role=\"button\"]');".to_string());
        body.push("const count = await buttons.count();".to_string());
        body.push("expect(count).toBeGreaterThanOrEqual(0);".to_string());
        body.push("if (count > 0) {".to_string());
        body.push("  await expect(buttons.first()).toBeEnabled();".to_string());
        body.push("}".to_string());
    } else {
        for text in known_buttons {
            let element = ElementTarget::for_button(&text);
            body.push(format!(
                "await expect({}).toBeEnabled();",
                locator_expr(&element)
            ));
        }
    }

    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("interactive elements are enabled", "page", &body),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action::ActionExtractor;

    fn actions_for(text: &str) -> Vec<ParsedAction> {
        ActionExtractor::new().extract(text, "https://example.com")
    }

    #[test]
    fn test_single_import_block_and_test_fn() {
        let script = emit_actions("login", &actions_for("click Login"));
        assert_eq!(script.matches("import ").count(), 1);
        assert_eq!(script.matches("test(").count(), 1);
    }

    #[test]
    fn test_repeated_action_types_get_distinct_vars() {
        let script = emit_actions(
            "login",
            &actions_for("click Save\nclick Save\nclick Save"),
        );
        assert!(script.contains("const saveButton = "));
        assert!(script.contains("const saveButton2 = "));
        assert!(script.contains("const saveButton3 = "));
    }

    #[test]
    fn test_fill_uses_selector_fallback_union() {
        let script = emit_actions("login", &actions_for("enter username as \"bob\""));
        assert!(script.contains(
            r#"page.locator('#username, [name="username"], [data-testid="username"], input[placeholder*="username" i]').first()"#
        ));
        assert!(script.contains(".fill('bob');"));
    }

    #[test]
    fn test_value_escaping_keeps_quotes_balanced() {
        let script = emit_actions("login", &actions_for("enter username as \"O'Brien\""));
        assert!(script.contains(r".fill('O\'Brien');"));
    }

    #[test]
    fn test_step_comments_in_order() {
        let script = emit_actions(
            "flow",
            &actions_for("enter username as \"bob\"\nclick Login\nverify dashboard is visible"),
        );
        let s1 = script.find("// Step 1:").unwrap();
        let s2 = script.find("// Step 2:").unwrap();
        let s3 = script.find("// Step 3:").unwrap();
        let s4 = script.find("// Step 4:").unwrap();
        assert!(s1 < s2 && s2 < s3 && s3 < s4);
    }

    #[test]
    fn test_verify_visible_becomes_to_be_visible() {
        let script = emit_actions("flow", &actions_for("verify the dashboard is visible"));
        assert!(script.contains("toBeVisible()"));
    }

    #[test]
    fn test_verify_quoted_url_fragment() {
        let script = emit_actions("flow", &actions_for("verify the url contains \"/dashboard\""));
        assert!(script.contains("expect(page.url()).toContain('/dashboard');"));
    }

    #[test]
    fn test_page_load_template_is_self_contained() {
        let script = emit_page_load("https://example.com");
        assert!(script.contains("await page.goto('https://example.com');"));
        assert_eq!(script.matches("test(").count(), 1);
    }

    #[test]
    fn test_form_validation_defaults_without_snapshot() {
        let script = emit_form_validation("https://example.com", None);
        assert!(script.contains("page.locator('form')"));
    }
}
