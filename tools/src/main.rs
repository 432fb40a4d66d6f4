//! bankcheck: validate a generated banking dataset.
//!
//! Usage:
//!   bankcheck --input banking_data.json
//!   bankcheck --input banking_data.json --verbose --limit 50
//!   bankcheck --input banking_data.json --json --as-of 2025-01-01
//!   bankcheck --input banking_data.json --policy policy.json
//!
//! Exit codes: 0 passed, 1 validation errors, 2 unreadable input.

use anyhow::{Context, Result};
use bankcheck_core::{
    date::parse_date, Dataset, RenderOptions, ValidationEngine, ValidatorConfig,
};
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns the verdict. Errors are input problems, not validation failures.
fn run(args: &[String]) -> Result<bool> {
    let input = string_arg(args, "--input")
        .context("missing required argument --input <file>")?;
    let verbose = args.iter().any(|a| a == "--verbose");
    let json = args.iter().any(|a| a == "--json");
    let limit = parse_arg(args, "--limit", bankcheck_core::report::DEFAULT_DISPLAY_LIMIT);

    let mut config = match string_arg(args, "--policy") {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::default(),
    };
    if let Some(as_of) = string_arg(args, "--as-of") {
        let date = parse_date(as_of).context("invalid --as-of")?;
        config = config.with_as_of(date);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let dataset = Dataset::from_json_str(&content)
        .with_context(|| format!("Cannot decode {}", path.display()))?;
    log::info!("Loaded {} customer records from {}", dataset.len(), path.display());

    let report = ValidationEngine::new(config).run(&dataset);

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("Validating banking data...");
        println!();
        print!("{}", report.render(&RenderOptions { limit, verbose }));
    }

    Ok(report.passed())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
