//! Generated test-case model and generation summaries.
//!
//! A [`TestCase`] is built fresh for every request and never mutated
//! afterward; the builder methods below are consumed during assembly
//! inside the generators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::{TestIntent, TestType};

/// Execution priority assigned by the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must-pass path
    Critical,
    /// Core behavior
    High,
    /// Default
    #[default]
    Medium,
    /// Nice-to-have
    Low,
}

/// Deterministic structural quality scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// How much of a complete test-case shape is present
    pub completeness: f32,
    /// How concrete the steps are
    pub specificity: f32,
    /// How runnable the attached automation is
    pub automatability: f32,
}

impl QualityMetrics {
    /// Score a test case from its structure alone.
    #[must_use]
    pub fn assess(
        step_count: usize,
        precondition_count: usize,
        validation_count: usize,
        has_expected_result: bool,
        has_automation: bool,
        instruction_based: bool,
    ) -> Self {
        let completeness = {
            let mut score = 0.0;
            if step_count > 0 {
                score += 0.4;
            }
            if precondition_count > 0 {
                score += 0.2;
            }
            if validation_count > 0 {
                score += 0.2;
            }
            if has_expected_result {
                score += 0.2;
            }
            score
        };
        let specificity = if instruction_based {
            (0.6 + 0.1 * step_count as f32).min(1.0)
        } else {
            0.5
        };
        let automatability = if has_automation { 0.9 } else { 0.2 };
        Self {
            completeness,
            specificity,
            automatability,
        }
    }
}

/// One generated test case with its emitted automation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Unique identifier
    pub id: Uuid,
    /// Short title
    pub title: String,
    /// What the test covers
    pub description: String,
    /// Generator domain that produced it
    pub test_type: TestType,
    /// Execution priority
    pub priority: Priority,
    /// Environment assumptions
    pub preconditions: Vec<String>,
    /// Ordered human-readable steps
    pub steps: Vec<String>,
    /// Expected outcome
    pub expected_result: String,
    /// Checks a reviewer or executor should confirm
    pub validation_criteria: Vec<String>,
    /// Structural quality scores
    pub quality: QualityMetrics,
    /// Self-contained executable script text
    pub automation: String,
}

impl TestCase {
    /// Start a test case for a domain.
    #[must_use]
    pub fn new(test_type: TestType, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            test_type,
            priority: Priority::default(),
            preconditions: Vec::new(),
            steps: Vec::new(),
            expected_result: String::new(),
            validation_criteria: Vec::new(),
            quality: QualityMetrics {
                completeness: 0.0,
                specificity: 0.0,
                automatability: 0.0,
            },
            automation: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the preconditions.
    #[must_use]
    pub fn preconditions(mut self, preconditions: Vec<String>) -> Self {
        self.preconditions = preconditions;
        self
    }

    /// Set the ordered steps.
    #[must_use]
    pub fn steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    /// Set the expected result.
    #[must_use]
    pub fn expected_result(mut self, expected: impl Into<String>) -> Self {
        self.expected_result = expected.into();
        self
    }

    /// Set the validation criteria.
    #[must_use]
    pub fn validation_criteria(mut self, criteria: Vec<String>) -> Self {
        self.validation_criteria = criteria;
        self
    }

    /// Attach the emitted automation script and finalize quality scores.
    #[must_use]
    pub fn automation(mut self, script: impl Into<String>, instruction_based: bool) -> Self {
        self.automation = script.into();
        self.quality = QualityMetrics::assess(
            self.steps.len(),
            self.preconditions.len(),
            self.validation_criteria.len(),
            !self.expected_result.is_empty(),
            !self.automation.is_empty(),
            instruction_based,
        );
        self
    }
}

/// Counts and routing metadata for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    /// Total test cases produced
    pub total: usize,
    /// Per-domain counts
    pub counts: BTreeMap<TestType, usize>,
    /// Domains whose generator ran successfully and produced output
    pub generators_used: Vec<TestType>,
    /// The intent used for routing
    pub intent: TestIntent,
}

/// Everything `generate` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// All generated test cases in stable domain order
    pub test_cases: Vec<TestCase>,
    /// Run summary
    pub summary: GenerationSummary,
}

/// One observed step from the external execution harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    /// What the executor did
    pub action: String,
    /// Wall time for the step
    pub duration_ms: u64,
}

/// Result contract of the external Browser Automation Executor.
///
/// Defined here so callers can deserialize executor output; no executor
/// ships in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    /// Assertions passed
    pub passed: u32,
    /// Assertions failed
    pub failed: u32,
    /// Log text
    pub output: String,
    /// Per-step timing
    pub execution_steps: Vec<ExecutionStep>,
}
