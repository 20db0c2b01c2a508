//! Trazar CLI: compile free-text testing instructions into executable
//! browser test scripts
//!
//! ## Usage
//!
//! ```bash
//! trazar generate "Send a GET request to /users" --url https://api.example.com
//! trazar generate --file steps.txt --url https://example.com --out-dir tests/
//! trazar classify "check color contrast"
//! trazar scenarios --domain api
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use clap::Parser;
use console::style;

use trazar::{selector::slugify, GenerationRequest, TestGenerator, TestType, WebsiteAnalysis};
use trazar_cli::{
    file_progress, init_tracing, render_intent, render_outcome, render_scenarios, Cli, ClassifyArgs,
    CliError, CliResult, ColorArg, Commands, FormatArg, GenerateArgs, OutputOptions, ScenariosArgs,
};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = OutputOptions {
        color: match cli.color {
            ColorArg::Always => true,
            ColorArg::Never => false,
            ColorArg::Auto => console::Term::stdout().features().colors_supported(),
        },
        quiet: cli.quiet,
    };

    match run(cli, opts) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, opts: OutputOptions) -> CliResult<()> {
    match cli.command {
        Commands::Generate(args) => run_generate(&args, opts),
        Commands::Classify(args) => run_classify(&args, opts),
        Commands::Scenarios(args) => run_scenarios(&args, opts),
    }
}

/// Resolve the instruction text: positional arg, file, then stdin.
fn read_instruction(inline: Option<&str>, file: Option<&Path>) -> CliResult<String> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }
    if let Some(path) = file {
        return Ok(fs::read_to_string(path)?);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(CliError::invalid_argument(
            "no instruction given (pass text, --file, or pipe stdin)",
        ));
    }
    Ok(buffer)
}

fn run_generate(args: &GenerateArgs, opts: OutputOptions) -> CliResult<()> {
    let text = read_instruction(args.instruction.as_deref(), args.file.as_deref())?;

    let mut request = GenerationRequest::new(text, &args.url);
    if !args.types.is_empty() {
        request = request.with_types(args.types.iter().map(|t| TestType::from(*t)).collect());
    }
    if let Some(path) = &args.analysis {
        let analysis: WebsiteAnalysis = serde_json::from_str(&fs::read_to_string(path)?)?;
        request = request.with_analysis(analysis);
    }

    let generator = TestGenerator::new();
    let outcome = generator.generate(&request)?;

    if let Some(out_dir) = &args.out_dir {
        write_scripts(out_dir, &outcome.test_cases, opts.quiet)?;
    }

    match args.format {
        FormatArg::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        FormatArg::Text => print!("{}", render_outcome(&outcome, opts)),
    }
    Ok(())
}

/// Write one .spec.ts per test case, stamped with the generation time.
fn write_scripts(out_dir: &Path, cases: &[trazar::TestCase], quiet: bool) -> CliResult<()> {
    fs::create_dir_all(out_dir)?;
    let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let pb = file_progress(cases.len() as u64, quiet);

    for case in cases {
        let file_name = format!("{}-{}.spec.ts", slugify(&case.title), &case.id.simple().to_string()[..8]);
        let path = out_dir.join(&file_name);
        let content = format!("// Generated at {stamp}\n{}", case.automation);
        fs::write(&path, content)?;
        pb.inc(1);
        pb.set_message(file_name);
    }
    pb.finish_and_clear();
    if !quiet {
        eprintln!("wrote {} script(s) to {}", cases.len(), out_dir.display());
    }
    Ok(())
}

fn run_classify(args: &ClassifyArgs, opts: OutputOptions) -> CliResult<()> {
    let text = read_instruction(args.instruction.as_deref(), args.file.as_deref())?;
    let generator = TestGenerator::new();
    let intent = generator.classify(&GenerationRequest::new(text, "https://example.invalid"));

    match args.format {
        FormatArg::Json => println!("{}", serde_json::to_string_pretty(&intent)?),
        FormatArg::Text => print!("{}", render_intent(&intent, opts)),
    }
    Ok(())
}

fn run_scenarios(args: &ScenariosArgs, opts: OutputOptions) -> CliResult<()> {
    let generator = TestGenerator::new();
    let catalog = generator.catalog();
    let scenarios: Vec<&trazar::Scenario> = match args.domain {
        Some(domain) => catalog.for_domain(TestType::from(domain)),
        None => catalog.all().iter().collect(),
    };

    match args.format {
        FormatArg::Json => println!("{}", serde_json::to_string_pretty(&scenarios)?),
        FormatArg::Text => print!("{}", render_scenarios(&scenarios, opts)),
    }
    Ok(())
}
