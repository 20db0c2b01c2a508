//! Security-domain script emission.
//!
//! The security generator is template-only: canned transport, header,
//! and input-handling probes against the target. Probes are shallow by
//! design; they assert observable symptoms, not exploitability.

use super::{assemble, escape_single, test_fn, IMPORT_PLAYWRIGHT};

/// XSS marker payload. The marker string is asserted absent from live DOM.
const XSS_PAYLOAD: &str = "<script>window.__trz_xss = true;</script>";

/// Classic error-based SQL probe value.
const SQL_PAYLOAD: &str = "' OR 1=1 --";

/// Template: the target is served over HTTPS and stays there.
#[must_use]
pub fn emit_https_check(url: &str) -> String {
    let body = vec![
        format!("await page.goto('{}');", escape_single(url)),
        "expect(page.url()).toMatch(/^https:/);".to_string(),
    ];
    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("target is served over HTTPS", "page", &body),
    )
}

/// Template: hardening headers are present on the main document.
#[must_use]
pub fn emit_header_inspection(url: &str) -> String {
    let body = vec![
        format!("const response = await request.get('{}');", escape_single(url)),
        "const headers = response.headers();".to_string(),
        "expect(headers['x-content-type-options'] ?? '').toBe('nosniff');".to_string(),
        "const framing = headers['x-frame-options'] ?? headers['content-security-policy'] ?? '';"
            .to_string(),
        "expect(framing).not.toBe('');".to_string(),
    ];
    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("hardening headers are present", "request", &body),
    )
}

/// Template: script injected through form fields never executes.
#[must_use]
pub fn emit_xss_probe(url: &str) -> String {
    let payload = escape_single(XSS_PAYLOAD);
    let body = vec![
        format!("await page.goto('{}');", escape_single(url)),
        "const inputs = page.locator('input[type=\"text\"], input:not([type]), textarea');"
            .to_string(),
        "const count = await inputs.count();".to_string(),
        "for (let i = 0; i < count; i++) {".to_string(),
        format!("  await inputs.nth(i).fill('{payload}');"),
        "}".to_string(),
        "const submit = page.locator('button[type=\"submit\"], input[type=\"submit\"]').first();"
            .to_string(),
        "if (await submit.count() > 0) {".to_string(),
        "  await submit.click();".to_string(),
        "}".to_string(),
        "expect(await page.evaluate(() => (window as any).__trz_xss === true)).toBe(false);"
            .to_string(),
    ];
    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("form input is not executed as script", "page", &body),
    )
}

/// Template: SQL probe values never surface database errors.
#[must_use]
pub fn emit_sql_error_probe(url: &str) -> String {
    let payload = escape_single(SQL_PAYLOAD);
    let body = vec![
        format!("await page.goto('{}');", escape_single(url)),
        "const inputs = page.locator('input[type=\"text\"], input:not([type]), textarea');"
            .to_string(),
        "const count = await inputs.count();".to_string(),
        "for (let i = 0; i < count; i++) {".to_string(),
        format!("  await inputs.nth(i).fill('{payload}');"),
        "}".to_string(),
        "const submit = page.locator('button[type=\"submit\"], input[type=\"submit\"]').first();"
            .to_string(),
        "if (await submit.count() > 0) {".to_string(),
        "  await submit.click();".to_string(),
        "}".to_string(),
        "const text = await page.locator('body').innerText();".to_string(),
        "for (const marker of ['SQL syntax', 'sqlite_', 'ORA-', 'psql:', 'mysql_']) {".to_string(),
        "  expect(text).not.toContain(marker);".to_string(),
        "}".to_string(),
    ];
    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn("database errors never leak to the page", "page", &body),
    )
}
