use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use gametext_diff::{
    CheckMode, CompareOptions, ComparisonInput, NavigationMode, Outcome, check, compare_lines,
    format_issue_log, format_line_report, format_markdown_report,
};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "gametext-check")]
#[command(about = "Check a translated game-text file against its original")]
struct Cli {
    original: PathBuf,
    translated: PathBuf,

    #[arg(long, value_enum, default_value_t = CliMode::Keyed)]
    mode: CliMode,

    #[arg(long)]
    json: bool,

    /// Print the numbered issue log instead of the markdown report.
    #[arg(long)]
    log: bool,

    /// JSON file with serialized compare options; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    navigation: Option<CliNavigation>,

    #[arg(long)]
    id_marker: Option<String>,

    #[arg(long)]
    text_marker: Option<String>,

    #[arg(long)]
    no_duplicate_check: bool,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    Keyed,
    Lines,
    Pairs,
    Blocks,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNavigation {
    TagMismatches,
    TextChanges,
}

const EXIT_ISSUES: u8 = 1;
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let original = fs::read_to_string(&cli.original)?;
    let translated = fs::read_to_string(&cli.translated)?;
    let options = load_options(cli)?;
    tracing::info!(mode = ?cli.mode, ?options, "checking translation");

    let left = cli.original.display().to_string();
    let right = cli.translated.display().to_string();

    let mode = match cli.mode {
        CliMode::Keyed => CheckMode::Keyed,
        CliMode::Pairs => CheckMode::Pairs,
        CliMode::Blocks => CheckMode::Blocks,
        CliMode::Lines => return run_lines(cli, &original, &translated, &options),
    };

    let outcome = check(&ComparisonInput::new(&original, &translated), mode, &options);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if cli.log
        && let Some(report) = outcome.report()
    {
        println!("{}", format_issue_log(&report.issues));
    } else {
        println!("{}", format_markdown_report(&outcome, &left, &right));
    }

    Ok(match &outcome {
        Outcome::Failed { .. } => ExitCode::from(EXIT_FAILURE),
        Outcome::Completed(report) if report.has_warnings() => ExitCode::from(EXIT_ISSUES),
        Outcome::Completed(_) => ExitCode::SUCCESS,
    })
}

fn run_lines(
    cli: &Cli,
    original: &str,
    translated: &str,
    options: &CompareOptions,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let comparison = match compare_lines(original, translated, options) {
        Ok(comparison) => comparison,
        Err(err) => {
            tracing::warn!(error = %err, "line comparison failed");
            let failed = Outcome::Failed {
                error: err.to_string(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&failed)?);
            } else {
                eprintln!("error: {err}");
            }
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!(
            "{}",
            format_line_report(
                &comparison,
                &cli.original.display().to_string(),
                &cli.translated.display().to_string(),
            )
        );
    }

    Ok(if comparison.changed_lines.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_ISSUES)
    })
}

fn load_options(cli: &Cli) -> Result<CompareOptions, Box<dyn std::error::Error>> {
    let mut options = match &cli.config {
        Some(path) => read_config(path)?,
        None => CompareOptions::default(),
    };

    if let Some(navigation) = cli.navigation {
        options = options.with_navigation(match navigation {
            CliNavigation::TagMismatches => NavigationMode::TagMismatches,
            CliNavigation::TextChanges => NavigationMode::TextChanges,
        });
    }
    if let Some(marker) = &cli.id_marker {
        options.dialect.identifier_marker = marker.clone();
        options.dialect.name = "custom".to_string();
    }
    if let Some(marker) = &cli.text_marker {
        options.dialect.text_marker = marker.clone();
        options.dialect.name = "custom".to_string();
    }
    if cli.no_duplicate_check {
        options = options.with_duplicate_check(false);
    }

    Ok(options)
}

fn read_config(path: &Path) -> Result<CompareOptions, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let options = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?;
    Ok(options)
}
