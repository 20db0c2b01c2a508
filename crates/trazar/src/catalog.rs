//! Validation-scenario catalog.
//!
//! The immutable canned-scenario table backing template-based
//! generation. Each domain's template suite draws its titles and
//! descriptions from here, and the CLI lists the catalog directly.

use serde::Serialize;

use crate::intent::TestType;

/// One canned validation scenario. Serialize-only: the catalog is a
/// compiled-in table, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Stable identifier (FN001, AX002, AP005, SC003, ...)
    pub id: &'static str,
    /// Domain the scenario belongs to
    pub domain: TestType,
    /// Short name
    pub name: &'static str,
    /// What the scenario validates
    pub description: &'static str,
}

/// The immutable scenario table.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioCatalog {
    /// Build the full catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scenarios: vec![
                Scenario {
                    id: "FN001",
                    domain: TestType::Functional,
                    name: "Page load",
                    description: "The page loads with a valid document title and navigable links",
                },
                Scenario {
                    id: "FN002",
                    domain: TestType::Functional,
                    name: "Form validation",
                    description: "Submitting an empty form surfaces validation feedback",
                },
                Scenario {
                    id: "FN003",
                    domain: TestType::Functional,
                    name: "Interactive smoke",
                    description: "Interactive elements are present and enabled",
                },
                Scenario {
                    id: "AX001",
                    domain: TestType::Accessibility,
                    name: "WCAG rule scan",
                    description: "Full axe-core scan tagged wcag2a/wcag2aa/wcag21aa",
                },
                Scenario {
                    id: "AX002",
                    domain: TestType::Accessibility,
                    name: "Keyboard walk",
                    description: "Tab order reaches interactive elements with visible focus",
                },
                Scenario {
                    id: "AX003",
                    domain: TestType::Accessibility,
                    name: "Accessible names",
                    description: "Controls expose text or aria-label accessible names",
                },
                Scenario {
                    id: "AX004",
                    domain: TestType::Accessibility,
                    name: "Color contrast",
                    description: "Text contrast meets WCAG AA ratios",
                },
                Scenario {
                    id: "AX005",
                    domain: TestType::Accessibility,
                    name: "Document structure",
                    description: "Headings and landmarks form a coherent outline",
                },
                Scenario {
                    id: "AP001",
                    domain: TestType::Api,
                    name: "Success path",
                    description: "The endpoint answers the happy path with a 2xx status",
                },
                Scenario {
                    id: "AP002",
                    domain: TestType::Api,
                    name: "Validation error",
                    description: "Invalid input is rejected with a 400-class status",
                },
                Scenario {
                    id: "AP003",
                    domain: TestType::Api,
                    name: "Auth failure",
                    description: "Requests without credentials are rejected with 401/403",
                },
                Scenario {
                    id: "AP004",
                    domain: TestType::Api,
                    name: "Schema shape",
                    description: "The response body is JSON with the expected shape",
                },
                Scenario {
                    id: "AP005",
                    domain: TestType::Api,
                    name: "Performance",
                    description: "Latency stays within budget under a small concurrency burst",
                },
                Scenario {
                    id: "SC001",
                    domain: TestType::Security,
                    name: "Transport security",
                    description: "The target is served over HTTPS",
                },
                Scenario {
                    id: "SC002",
                    domain: TestType::Security,
                    name: "Hardening headers",
                    description: "nosniff and framing protections are present",
                },
                Scenario {
                    id: "SC003",
                    domain: TestType::Security,
                    name: "XSS input probe",
                    description: "Script injected through form fields never executes",
                },
                Scenario {
                    id: "SC004",
                    domain: TestType::Security,
                    name: "SQL error leakage",
                    description: "SQL probe values never surface database errors",
                },
            ],
        }
    }

    /// All scenarios in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Scenarios for one domain.
    #[must_use]
    pub fn for_domain(&self, domain: TestType) -> Vec<&Scenario> {
        self.scenarios.iter().filter(|s| s.domain == domain).collect()
    }

    /// Look up a scenario by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}
