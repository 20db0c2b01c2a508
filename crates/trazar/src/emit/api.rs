//! API-domain script emission.
//!
//! Instruction-based scripts mirror the instruction's operation verbs in
//! their original order: each verb opens a comment block containing the
//! verb word, so the emitted offsets of send/store/read/compare/verify/
//! count increase exactly as the instruction listed them. Prerequisite
//! blocks inserted for dangling verbs use neutral wording on purpose.

use crate::api::{ApiVerb, ParsedApiInstruction};

use super::{assemble, escape_single, test_fn, IMPORT_PLAYWRIGHT};

/// Emit one self-contained script mirroring the instruction's verbs.
#[must_use]
pub fn emit_instruction(title: &str, parsed: &ParsedApiInstruction) -> String {
    let verbs: Vec<ApiVerb> = if parsed.verbs.is_empty() {
        vec![ApiVerb::Send, ApiVerb::Verify]
    } else {
        parsed.verbs.clone()
    };

    let mut body: Vec<String> = Vec::new();
    let mut state = EmitState::default();

    if parsed.requires_auth {
        body.push(
            "const headers = { Authorization: `Bearer ${process.env.API_TOKEN ?? ''}` };"
                .to_string(),
        );
        body.push(String::new());
    }

    for (i, verb) in verbs.iter().enumerate() {
        if i > 0 {
            body.push(String::new());
        }
        emit_verb(&mut body, &mut state, *verb, parsed);
    }

    assemble(&[IMPORT_PLAYWRIGHT], &test_fn(title, "request", &body))
}

#[derive(Debug, Default)]
struct EmitState {
    has_response: bool,
    has_stored: bool,
    has_read: bool,
}

fn emit_verb(
    body: &mut Vec<String>,
    state: &mut EmitState,
    verb: ApiVerb,
    parsed: &ParsedApiInstruction,
) {
    match verb {
        ApiVerb::Send => {
            body.push(format!(
                "// send the {} request to {}",
                parsed.method.as_str(),
                parsed.endpoint
            ));
            body.extend(request_lines(parsed));
            state.has_response = true;
        }
        ApiVerb::Store => {
            ensure_response(body, state, parsed);
            body.push("// store the response payload".to_string());
            body.push("const stored = await response.json();".to_string());
            state.has_stored = true;
        }
        ApiVerb::Read => {
            body.push("// read the resource back".to_string());
            body.push(format!(
                "const readResponse = await request.get('{}'{});",
                escape_single(&parsed.url),
                auth_options(parsed)
            ));
            body.push("const readBody = await readResponse.json();".to_string());
            state.has_read = true;
        }
        ApiVerb::Compare => {
            ensure_stored(body, state, parsed);
            ensure_read(body, state, parsed);
            body.push("// compare the captured payloads".to_string());
            body.push("expect(readBody).toEqual(stored);".to_string());
        }
        ApiVerb::Verify => {
            ensure_response(body, state, parsed);
            body.push("// verify the response status".to_string());
            match parsed.expected_status {
                Some(code) => body.push(format!("expect(response.status()).toBe({code});")),
                None => body.push("expect(response.ok()).toBeTruthy();".to_string()),
            }
        }
        ApiVerb::Count => {
            ensure_stored(body, state, parsed);
            body.push("// count the returned records".to_string());
            body.push(
                "const records = Array.isArray(stored) ? stored : [stored];".to_string(),
            );
            body.push("expect(records.length).toBeGreaterThanOrEqual(0);".to_string());
        }
    }
}

// Prerequisite blocks deliberately avoid the ordered verb words.

fn ensure_response(body: &mut Vec<String>, state: &mut EmitState, parsed: &ParsedApiInstruction) {
    if !state.has_response {
        body.push("// issue the initial request".to_string());
        body.extend(request_lines(parsed));
        body.push(String::new());
        state.has_response = true;
    }
}

fn ensure_stored(body: &mut Vec<String>, state: &mut EmitState, parsed: &ParsedApiInstruction) {
    ensure_response(body, state, parsed);
    if !state.has_stored {
        body.push("// capture the response payload".to_string());
        body.push("const stored = await response.json();".to_string());
        body.push(String::new());
        state.has_stored = true;
    }
}

fn ensure_read(body: &mut Vec<String>, state: &mut EmitState, parsed: &ParsedApiInstruction) {
    if !state.has_read {
        body.push("// fetch the resource again".to_string());
        body.push(format!(
            "const readResponse = await request.get('{}'{});",
            escape_single(&parsed.url),
            auth_options(parsed)
        ));
        body.push("const readBody = await readResponse.json();".to_string());
        body.push(String::new());
        state.has_read = true;
    }
}

/// The request call for the parsed method, auth, and payload fields.
fn request_lines(parsed: &ParsedApiInstruction) -> Vec<String> {
    let url = escape_single(&parsed.url);
    let call = parsed.method.fixture_call();
    let options = full_options(parsed);
    vec![format!("const response = await request.{call}('{url}'{options});")]
}

fn payload_literal(parsed: &ParsedApiInstruction) -> String {
    if parsed.fields.is_empty() {
        "{}".to_string()
    } else {
        let pairs = parsed
            .fields
            .iter()
            .map(|f| format!("{}: '{}'", f.name, escape_single(&f.value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {pairs} }}")
    }
}

fn full_options(parsed: &ParsedApiInstruction) -> String {
    match (parsed.requires_auth, parsed.method.has_body()) {
        (true, true) => format!(", {{ headers, data: {} }}", payload_literal(parsed)),
        (true, false) => ", { headers }".to_string(),
        (false, true) => format!(", {{ data: {} }}", payload_literal(parsed)),
        (false, false) => String::new(),
    }
}

fn auth_options(parsed: &ParsedApiInstruction) -> String {
    if parsed.requires_auth {
        ", { headers }".to_string()
    } else {
        String::new()
    }
}

/// Template: the happy path returns a success status.
#[must_use]
pub fn emit_success(parsed: &ParsedApiInstruction) -> String {
    let mut body = Vec::new();
    if parsed.requires_auth {
        body.push(
            "const headers = { Authorization: `Bearer ${process.env.API_TOKEN ?? ''}` };"
                .to_string(),
        );
    }
    body.extend(request_lines(parsed));
    body.push("expect(response.ok()).toBeTruthy();".to_string());
    body.push("expect(response.status()).toBeLessThan(300);".to_string());

    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn(
            &format!("{} {} returns success", parsed.method.as_str(), parsed.endpoint),
            "request",
            &body,
        ),
    )
}

/// Template: an invalid payload is rejected with a client error.
#[must_use]
pub fn emit_validation_error(parsed: &ParsedApiInstruction) -> String {
    let url = escape_single(&parsed.url);
    let body = if parsed.method.has_body() {
        vec![
            format!(
                "const response = await request.{}('{url}', {{ data: {{}} }});",
                parsed.method.fixture_call()
            ),
            "expect([400, 422]).toContain(response.status());".to_string(),
        ]
    } else {
        vec![
            format!("const response = await request.get('{url}?limit=-1');"),
            "expect(response.status()).toBeLessThan(500);".to_string(),
        ]
    };

    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn(
            &format!("{} rejects invalid input", parsed.endpoint),
            "request",
            &body,
        ),
    )
}

/// Template: missing credentials are rejected. Only emitted when the
/// instruction requires auth.
#[must_use]
pub fn emit_auth_failure(parsed: &ParsedApiInstruction) -> String {
    let url = escape_single(&parsed.url);
    let body = vec![
        "// no Authorization header on purpose".to_string(),
        format!(
            "const response = await request.{}('{url}'{});",
            parsed.method.fixture_call(),
            if parsed.method.has_body() { ", { data: {} }" } else { "" }
        ),
        "expect([401, 403]).toContain(response.status());".to_string(),
    ];

    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn(
            &format!("{} requires authentication", parsed.endpoint),
            "request",
            &body,
        ),
    )
}

/// Template: the response body has a JSON shape.
#[must_use]
pub fn emit_schema(parsed: &ParsedApiInstruction) -> String {
    let url = escape_single(&parsed.url);
    let body = vec![
        format!("const response = await request.get('{url}'{});", auth_options(parsed)),
        "expect(response.headers()['content-type']).toContain('application/json');".to_string(),
        "const payload = await response.json();".to_string(),
        "expect(payload).not.toBeNull();".to_string(),
        "expect(typeof payload).toBe('object');".to_string(),
    ];

    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn(
            &format!("{} response matches the expected shape", parsed.endpoint),
            "request",
            &body,
        ),
    )
}

/// Template: latency and a small concurrency burst.
#[must_use]
pub fn emit_performance(parsed: &ParsedApiInstruction) -> String {
    let url = escape_single(&parsed.url);
    let auth = auth_options(parsed);
    let body = vec![
        "const start = Date.now();".to_string(),
        format!("const response = await request.get('{url}'{auth});"),
        "expect(response.ok()).toBeTruthy();".to_string(),
        "expect(Date.now() - start).toBeLessThan(2000);".to_string(),
        String::new(),
        "// five concurrent requests must all succeed".to_string(),
        format!(
            "const burst = await Promise.all([...Array(5)].map(() => request.get('{url}'{auth})));"
        ),
        "for (const r of burst) {".to_string(),
        "  expect(r.ok()).toBeTruthy();".to_string(),
        "}".to_string(),
    ];

    assemble(
        &[IMPORT_PLAYWRIGHT],
        &test_fn(
            &format!("{} responds within budget", parsed.endpoint),
            "request",
            &body,
        ),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiInstructionParser;

    fn parse(text: &str) -> ParsedApiInstruction {
        ApiInstructionParser::new().parse(text, "https://api.example.com/users")
    }

    #[test]
    fn test_verb_offsets_strictly_increase() {
        let parsed = parse(
            "Send a GET request to https://api.example.com/users, store the response, count the records, verify the status",
        );
        let script = emit_instruction("ordered verbs", &parsed);

        let body_start = script.find("test(").unwrap();
        let body = &script[body_start..];
        let mut last = 0;
        for verb in ["// send", "// store", "// count", "// verify"] {
            let offset = body.find(verb).unwrap_or_else(|| panic!("missing {verb}"));
            assert!(offset > last, "{verb} out of order");
            last = offset;
        }
    }

    #[test]
    fn test_instruction_without_verbs_gets_send_verify() {
        let parsed = parse("GET request against the user list");
        let script = emit_instruction("default", &parsed);
        assert!(script.contains("// send the GET request"));
        assert!(script.contains("// verify the response status"));
    }

    #[test]
    fn test_auth_header_emitted_when_required() {
        let parsed = parse("Send a POST request to /users with authentication");
        let script = emit_instruction("auth", &parsed);
        assert!(script.contains("Authorization"));
        assert!(script.contains("{ headers, data:"));
    }

    #[test]
    fn test_no_auth_header_without_keyword() {
        let parsed = parse("Send a GET request to /users");
        let script = emit_instruction("no auth", &parsed);
        assert!(!script.contains("Authorization"));
    }

    #[test]
    fn test_expected_status_is_asserted() {
        let parsed = parse("Send a GET request and verify a 404 response");
        let script = emit_instruction("status", &parsed);
        assert!(script.contains("expect(response.status()).toBe(404);"));
    }

    #[test]
    fn test_compare_emits_prerequisites_once() {
        let parsed = parse("Compare the payloads");
        let script = emit_instruction("compare", &parsed);
        assert_eq!(script.matches("const stored = ").count(), 1);
        assert_eq!(script.matches("const readBody = ").count(), 1);
        assert!(script.contains("expect(readBody).toEqual(stored);"));
    }

    #[test]
    fn test_success_template_asserts_2xx() {
        let script = emit_success(&parse("Test the users API"));
        assert!(script.contains("toBeLessThan(300)"));
    }

    #[test]
    fn test_validation_template_uses_empty_payload_for_post() {
        let script = emit_validation_error(&parse("Create a user"));
        assert!(script.contains("{ data: {} }"));
        assert!(script.contains("[400, 422]"));
    }

    #[test]
    fn test_auth_template_expects_401() {
        let script = emit_auth_failure(&parse("Send a GET request with a token"));
        assert!(script.contains("[401, 403]"));
    }

    #[test]
    fn test_performance_template_has_concurrency_burst() {
        let script = emit_performance(&parse("Test the API"));
        assert!(script.contains("Promise.all"));
    }

    #[test]
    fn test_fields_interpolated_into_payload() {
        let parsed = parse(r#"Create a user with name = "Ada""#);
        let script = emit_instruction("payload", &parsed);
        assert!(script.contains("data: { name: 'Ada' }"));
    }
}
