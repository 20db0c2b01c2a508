//! Accessibility-domain script emission.
//!
//! Every emitted script, whatever the template, binds an axe-core
//! scanner to the page, calls `.analyze()`, asserts on `violations`,
//! and tags the wcag2a/wcag2aa/wcag21aa rule sets.

use crate::templates::{AccessibilityTemplate, AxeConfig, TemplateSelectionResult};

use super::{assemble, escape_single, test_fn, IMPORT_AXE, IMPORT_PLAYWRIGHT};

/// Emit the script for a selected template.
#[must_use]
pub fn emit_template(selection: &TemplateSelectionResult, url: &str) -> String {
    let mut body = vec![format!("await page.goto('{}');", escape_single(url))];

    match selection.template {
        AccessibilityTemplate::KeyboardNavigation => {
            body.push(String::new());
            body.push("// walk the tab order before scanning".to_string());
            body.extend(tab_walk_lines(10));
        }
        AccessibilityTemplate::AriaCompliance => {
            body.push(String::new());
            body.push("// controls must expose an accessible name".to_string());
            body.push("const unnamed = await page.evaluate(() =>".to_string());
            body.push(
                "  Array.from(document.querySelectorAll('button, a')).filter(".to_string(),
            );
            body.push(
                "    (el) => !el.textContent?.trim() && !el.getAttribute('aria-label')"
                    .to_string(),
            );
            body.push("  ).length".to_string());
            body.push(");".to_string());
            body.push("expect(unnamed).toBe(0);".to_string());
        }
        AccessibilityTemplate::DomStructure => {
            body.push(String::new());
            body.push("// one top-level heading anchors the document outline".to_string());
            body.push("expect(await page.locator('h1').count()).toBeGreaterThanOrEqual(1);".to_string());
        }
        AccessibilityTemplate::ComprehensiveScan
        | AccessibilityTemplate::VisualContrast
        | AccessibilityTemplate::GuidedSteps => {}
    }

    body.push(String::new());
    body.extend(scan_lines(&selection.axe_config));

    assemble(
        &[IMPORT_PLAYWRIGHT, IMPORT_AXE],
        &test_fn(template_title(selection.template), "page", &body),
    )
}

/// Emit a guided script: the user's explicit step sequence, then a scan.
#[must_use]
pub fn emit_guided(selection: &TemplateSelectionResult, url: &str, steps: &[String]) -> String {
    let mut body = vec![format!("await page.goto('{}');", escape_single(url))];

    for step in steps {
        body.push(String::new());
        body.push(format!("// {}", step.replace('\n', " ")));
        body.extend(guided_step_lines(step));
    }

    body.push(String::new());
    body.extend(scan_lines(&selection.axe_config));

    assemble(
        &[IMPORT_PLAYWRIGHT, IMPORT_AXE],
        &test_fn("accessibility steps and scan", "page", &body),
    )
}

fn template_title(template: AccessibilityTemplate) -> &'static str {
    match template {
        AccessibilityTemplate::ComprehensiveScan => "page passes WCAG 2.1 AA scan",
        AccessibilityTemplate::KeyboardNavigation => "keyboard navigation is operable",
        AccessibilityTemplate::AriaCompliance => "ARIA usage is valid",
        AccessibilityTemplate::VisualContrast => "color contrast meets WCAG AA",
        AccessibilityTemplate::DomStructure => "document structure is semantic",
        AccessibilityTemplate::GuidedSteps => "accessibility steps and scan",
    }
}

/// The axe scan block shared by every template.
fn scan_lines(config: &AxeConfig) -> Vec<String> {
    let tags = config
        .tags
        .iter()
        .map(|t| format!("'{}'", escape_single(t)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        "const results = await new AxeBuilder({ page })".to_string(),
        format!("  .withTags([{tags}])"),
        "  .analyze();".to_string(),
        "expect(results.violations).toEqual([]);".to_string(),
    ];

    for rule in &config.rules {
        let escaped = escape_single(rule);
        lines.push(format!(
            "expect(results.violations.filter((v) => v.id === '{escaped}')).toEqual([]);"
        ));
    }
    lines
}

fn tab_walk_lines(presses: usize) -> Vec<String> {
    vec![
        format!("for (let i = 0; i < {presses}; i++) {{"),
        "  await page.keyboard.press('Tab');".to_string(),
        "  const focused = await page.evaluate(() => document.activeElement?.tagName ?? '');"
            .to_string(),
        "  expect(focused).not.toBe('');".to_string(),
        "}".to_string(),
    ]
}

/// Translate one guided step into keyboard interactions.
fn guided_step_lines(step: &str) -> Vec<String> {
    let lower = step.to_lowercase();
    let mut lines = Vec::new();

    if lower.contains("tab") {
        lines.push("await page.keyboard.press('Tab');".to_string());
        lines.push(
            "expect(await page.evaluate(() => document.activeElement?.tagName ?? '')).not.toBe('');"
                .to_string(),
        );
    } else if lower.contains("enter") {
        lines.push("await page.keyboard.press('Enter');".to_string());
    } else if lower.contains("escape") {
        lines.push("await page.keyboard.press('Escape');".to_string());
    } else if lower.contains("arrow") {
        lines.push("await page.keyboard.press('ArrowDown');".to_string());
    }

    if lower.contains("focus") {
        lines.push(
            "expect(await page.evaluate(() => document.activeElement !== document.body)).toBe(true);"
                .to_string(),
        );
    }
    lines
}
