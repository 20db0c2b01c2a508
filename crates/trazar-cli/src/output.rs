//! Output formatting and progress reporting

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use trazar::{GenerationOutcome, Scenario, TestIntent};

/// Whether styled output is enabled.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Use terminal colors
    pub color: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            color: true,
            quiet: false,
        }
    }
}

fn paint(text: &str, color: bool, f: impl Fn(&str) -> String) -> String {
    if color {
        f(text)
    } else {
        text.to_string()
    }
}

/// Render a generation outcome as human-readable text.
#[must_use]
pub fn render_outcome(outcome: &GenerationOutcome, opts: OutputOptions) -> String {
    let mut out = String::new();
    let intent = &outcome.summary.intent;

    out.push_str(&format!(
        "{} {} (confidence {:.2})\n",
        paint("intent:", opts.color, |s| style(s).bold().to_string()),
        intent.primary_type,
        intent.confidence
    ));
    if !intent.secondary_types.is_empty() {
        let secondaries: Vec<String> = intent
            .secondary_types
            .iter()
            .map(|t| t.to_string())
            .collect();
        out.push_str(&format!("secondary: {}\n", secondaries.join(", ")));
    }
    out.push('\n');

    for case in &outcome.test_cases {
        out.push_str(&format!(
            "{} [{}] {}\n",
            paint("●", opts.color, |s| style(s).green().to_string()),
            case.test_type,
            paint(&case.title, opts.color, |s| style(s).bold().to_string()),
        ));
        if !opts.quiet {
            out.push_str(&format!("  {}\n", case.description));
            for (i, step) in case.steps.iter().enumerate() {
                out.push_str(&format!("  {}. {step}\n", i + 1));
            }
        }
    }

    out.push_str(&format!(
        "\n{} test case(s) from {} generator(s)\n",
        outcome.summary.total,
        outcome.summary.generators_used.len()
    ));
    out
}

/// Render a classified intent as human-readable text.
#[must_use]
pub fn render_intent(intent: &TestIntent, opts: OutputOptions) -> String {
    let mut out = format!(
        "{} {}\nconfidence: {:.2}\n",
        paint("primary:", opts.color, |s| style(s).bold().to_string()),
        intent.primary_type,
        intent.confidence
    );
    if !intent.secondary_types.is_empty() {
        let secondaries: Vec<String> = intent
            .secondary_types
            .iter()
            .map(|t| t.to_string())
            .collect();
        out.push_str(&format!("secondary: {}\n", secondaries.join(", ")));
    }
    for (domain, keywords) in &intent.detected_keywords {
        out.push_str(&format!("{domain}: {}\n", keywords.join(", ")));
    }
    if intent.use_enhanced_accessibility_parser {
        out.push_str("enhanced accessibility parser: on\n");
    }
    out
}

/// Render the scenario catalog as human-readable text.
#[must_use]
pub fn render_scenarios(scenarios: &[&Scenario], opts: OutputOptions) -> String {
    let mut out = String::new();
    for scenario in scenarios {
        out.push_str(&format!(
            "{}  [{}] {} — {}\n",
            paint(scenario.id, opts.color, |s| style(s).cyan().to_string()),
            scenario.domain,
            scenario.name,
            scenario.description
        ));
    }
    out
}

/// Progress bar for writing script files.
#[must_use]
pub fn file_progress(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
