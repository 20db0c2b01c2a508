//! Generator dispatch: classify, route, isolate failures, aggregate.
//!
//! The router owns one generator per domain plus the immutable catalog
//! and classifier tables. Per-domain failures (errors or panics) are
//! caught, logged, and contribute zero test cases; a structurally
//! invalid request (missing target URL) is the only fast-fail path.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::catalog::ScenarioCatalog;
use crate::generators::{
    AccessibilityGenerator, ApiGenerator, FunctionalGenerator, SecurityGenerator,
};
use crate::instruction::GenerationRequest;
use crate::intent::{ClassifierConfig, IntentClassifier, TestIntent, TestType};
use crate::result::{TrazarError, TrazarResult};
use crate::testcase::{GenerationOutcome, GenerationSummary, TestCase};

/// Confidence below which the functional fallback always fires.
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// The composed instruction-to-test-case pipeline.
#[derive(Debug)]
pub struct TestGenerator {
    classifier: IntentClassifier,
    functional: FunctionalGenerator,
    accessibility: AccessibilityGenerator,
    api: ApiGenerator,
    security: SecurityGenerator,
    catalog: ScenarioCatalog,
    #[cfg(test)]
    panic_domain: Option<TestType>,
}

impl Default for TestGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGenerator {
    /// Create the pipeline with default configuration tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classifier: IntentClassifier::new(),
            functional: FunctionalGenerator::new(),
            accessibility: AccessibilityGenerator::new(),
            api: ApiGenerator::new(),
            security: SecurityGenerator::new(),
            catalog: ScenarioCatalog::new(),
            #[cfg(test)]
            panic_domain: None,
        }
    }

    /// Create the pipeline with injected classifier tables.
    #[must_use]
    pub fn with_classifier_config(config: ClassifierConfig) -> Self {
        Self {
            classifier: IntentClassifier::with_config(config),
            ..Self::new()
        }
    }

    /// The scenario catalog backing template-based generation.
    #[must_use]
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    /// Classify without generating.
    #[must_use]
    pub fn classify(&self, request: &GenerationRequest) -> TestIntent {
        self.classifier.classify(
            &request.instruction.text,
            request.instruction.website_analysis.as_ref(),
        )
    }

    /// Run the full pipeline for one request.
    ///
    /// # Errors
    ///
    /// Only a structurally invalid request (empty target URL) fails;
    /// every downstream failure degrades to partial results.
    pub fn generate(&self, request: &GenerationRequest) -> TrazarResult<GenerationOutcome> {
        if request.instruction.target_url.trim().is_empty() {
            return Err(TrazarError::invalid_request("target URL is required"));
        }

        let intent = self.classify(request);
        debug!(
            primary = %intent.primary_type,
            confidence = intent.confidence,
            "classified instruction"
        );

        // Explicit caller types fully override classification; they are
        // never blended with inferred secondary types.
        let explicit = request.test_types.as_ref().filter(|t| !t.is_empty());
        let domains: Vec<TestType> = match explicit {
            Some(types) => {
                let mut expanded: Vec<TestType> = types
                    .iter()
                    .flat_map(|t| match t {
                        TestType::Mixed => TestType::DOMAINS.to_vec(),
                        other => vec![*other],
                    })
                    .collect();
                expanded.sort_unstable();
                expanded.dedup();
                expanded
            }
            None => self.intent_domains(&intent),
        };

        let mut by_domain: BTreeMap<TestType, Vec<TestCase>> = BTreeMap::new();
        for domain in &domains {
            if let Some(cases) = self.run_isolated(*domain, request, &intent) {
                if !cases.is_empty() {
                    by_domain.insert(*domain, cases);
                }
            }
        }

        // Low confidence or an empty result always gets the functional
        // fallback — unless the caller pinned the domains explicitly.
        let needs_fallback = explicit.is_none()
            && (intent.confidence < FALLBACK_CONFIDENCE || by_domain.is_empty())
            && !by_domain.contains_key(&TestType::Functional);
        if needs_fallback {
            debug!("running functional fallback");
            if let Some(cases) = self.run_isolated(TestType::Functional, request, &intent) {
                if !cases.is_empty() {
                    by_domain.insert(TestType::Functional, cases);
                }
            }
        }

        let generators_used: Vec<TestType> = by_domain.keys().copied().collect();
        let counts: BTreeMap<TestType, usize> =
            by_domain.iter().map(|(d, c)| (*d, c.len())).collect();
        let test_cases: Vec<TestCase> = by_domain.into_values().flatten().collect();

        Ok(GenerationOutcome {
            summary: GenerationSummary {
                total: test_cases.len(),
                counts,
                generators_used,
                intent,
            },
            test_cases,
        })
    }

    /// Domains to dispatch for a classified intent.
    fn intent_domains(&self, intent: &TestIntent) -> Vec<TestType> {
        let domains = intent.routing_domains();
        if domains.is_empty() {
            vec![TestType::Functional]
        } else {
            domains
        }
    }

    /// Run one domain generator, converting errors and panics into an
    /// absent result.
    fn run_isolated(
        &self,
        domain: TestType,
        request: &GenerationRequest,
        intent: &TestIntent,
    ) -> Option<Vec<TestCase>> {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.dispatch(domain, request, intent)));
        match outcome {
            Ok(Ok(cases)) => Some(cases),
            Ok(Err(error)) => {
                warn!(%domain, %error, "generator failed; continuing without it");
                None
            }
            Err(_) => {
                warn!(%domain, "generator panicked; continuing without it");
                None
            }
        }
    }

    fn dispatch(
        &self,
        domain: TestType,
        request: &GenerationRequest,
        intent: &TestIntent,
    ) -> TrazarResult<Vec<TestCase>> {
        #[cfg(test)]
        #[allow(clippy::panic)]
        {
            if self.panic_domain == Some(domain) {
                panic!("injected generator failure");
            }
        }

        let instruction = &request.instruction;
        match domain {
            TestType::Functional => self.functional.generate(instruction, &self.catalog),
            TestType::Accessibility => self.accessibility.generate(
                instruction,
                intent.use_enhanced_accessibility_parser,
                &self.catalog,
            ),
            TestType::Api => self.api.generate(instruction, &self.catalog),
            TestType::Security => self.security.generate(instruction, &self.catalog),
            // Mixed is expanded before dispatch
            TestType::Mixed => Ok(Vec::new()),
        }
    }
}
