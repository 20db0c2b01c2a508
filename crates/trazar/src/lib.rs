//! Trazar: a deterministic compiler from free-text testing instructions
//! to executable browser test scripts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      TRAZAR Pipeline                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌───────────┐  │
//! │  │ Raw text │──►│ Intent    │──►│ Per-domain │──►│ Playwright│  │
//! │  │ + URL    │   │ classify  │   │ parsers    │   │ emitters  │  │
//! │  └──────────┘   └───────────┘   └────────────┘   └───────────┘  │
//! │                      routing, failure isolation: Router          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is synchronous and side-effect-free: keyword
//! dictionaries, templates, and the scenario catalog are immutable
//! tables built once per [`TestGenerator`]; every call builds fresh
//! request-scoped values. Rules are deterministic pattern families —
//! there is no statistical model anywhere.
//!
//! # Example
//!
//! ```
//! use trazar::{GenerationRequest, TestGenerator};
//!
//! let generator = TestGenerator::new();
//! let request = GenerationRequest::new(
//!     "Send a GET request to https://api.example.com/users",
//!     "https://api.example.com/users",
//! );
//! let outcome = generator.generate(&request).unwrap();
//! assert_eq!(outcome.test_cases.len(), 1);
//! ```

#![warn(missing_docs)]

/// Requirement parsing for the accessibility domain.
pub mod accessibility;
/// Action extraction for functional instructions.
pub mod action;
/// Structured parsing of API instructions.
pub mod api;
/// The immutable validation-scenario catalog.
pub mod catalog;
/// Script emitters, one per domain.
pub mod emit;
/// Per-domain test-case generators.
pub mod generators;
/// Request-side data model.
pub mod instruction;
/// Intent classification.
pub mod intent;
mod result;
/// Dispatch router composing the pipeline.
pub mod router;
/// Element targeting with selector fallback.
pub mod selector;
/// Specificity detection.
pub mod specificity;
/// Accessibility template selection.
pub mod templates;
/// Generated test-case model.
pub mod testcase;

pub use accessibility::{
    AccessibilityParser, AccessibilityRequirement, AccessibilityRequirements, RequirementCategory,
};
pub use action::{ActionExtractor, ActionKind, ParsedAction, ScrollTarget};
pub use api::{ApiInstructionParser, ApiVerb, HttpMethod, ParsedApiInstruction};
pub use catalog::{Scenario, ScenarioCatalog};
pub use instruction::{
    FormField, FormInfo, GenerationRequest, InteractiveElement, RawInstruction, WebsiteAnalysis,
};
pub use intent::{ClassifierConfig, IntentClassifier, TestIntent, TestType};
pub use result::{TrazarError, TrazarResult};
pub use router::TestGenerator;
pub use selector::{ElementTarget, ElementType, Position};
pub use specificity::SpecificityDetector;
pub use templates::{
    AccessibilityTemplate, AxeConfig, TemplateSelectionResult, TemplateSelector,
};
pub use testcase::{
    ExecutionReport, ExecutionStep, GenerationOutcome, GenerationSummary, Priority,
    QualityMetrics, TestCase,
};
