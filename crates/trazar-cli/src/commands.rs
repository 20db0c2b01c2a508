//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use trazar::TestType;

/// Trazar: compile free-text testing instructions into executable
/// browser test scripts
#[derive(Parser, Debug)]
#[command(name = "trazar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate test cases from an instruction
    Generate(GenerateArgs),

    /// Classify an instruction without generating
    Classify(ClassifyArgs),

    /// List the validation-scenario catalog
    Scenarios(ScenariosArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Instruction text (read from --file or stdin when omitted)
    pub instruction: Option<String>,

    /// Read the instruction from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Target URL of the system under test
    #[arg(short, long)]
    pub url: String,

    /// Explicit test types, bypassing classification
    #[arg(short = 't', long = "type", value_enum)]
    pub types: Vec<TypeArg>,

    /// Path to a website-analysis snapshot (JSON)
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Write one .spec.ts file per test case into this directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Instruction text (read from --file or stdin when omitted)
    pub instruction: Option<String>,

    /// Read the instruction from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the scenarios command
#[derive(Parser, Debug)]
pub struct ScenariosArgs {
    /// Only show scenarios for one domain
    #[arg(short, long, value_enum)]
    pub domain: Option<TypeArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,
}

/// Output format choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorArg {
    /// Detect terminal support
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// Test-type choice mirroring the library's domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    /// Functional tests
    Functional,
    /// Accessibility tests
    Accessibility,
    /// API tests
    Api,
    /// Security tests
    Security,
    /// All domains
    Mixed,
}

impl From<TypeArg> for TestType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Functional => Self::Functional,
            TypeArg::Accessibility => Self::Accessibility,
            TypeArg::Api => Self::Api,
            TypeArg::Security => Self::Security,
            TypeArg::Mixed => Self::Mixed,
        }
    }
}
