use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use argspec::{ParseOutcome, Parser, ParserSchema};
use clap::Parser as _;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(clap::Parser)]
#[command(name = "argspec-demo")]
#[command(version, about = "Parse tokens with a parser declared in a JSON file", long_about = None)]
struct Cli {
    /// Print resolved values as a JSON object
    #[arg(long)]
    json: bool,

    /// Parser declaration (JSON)
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Tokens handed to the declared parser (after `--`)
    #[arg(value_name = "TOKENS", last = true)]
    tokens: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn load_parser(path: &Path) -> Result<std::result::Result<Parser, argspec::Error>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    let schema: ParserSchema = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse schema: {}", path.display()))?;
    tracing::debug!(program = %schema.name, args = schema.args.len(), "loaded schema");
    Ok(Parser::from_schema(&schema))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let parser = match load_parser(&cli.schema)? {
        Ok(parser) => parser,
        Err(err) => return Ok(report(&err)),
    };

    let m = match parser.parse(&cli.tokens) {
        Ok(ParseOutcome::Matches(m)) => m,
        Ok(ParseOutcome::Help(text)) | Ok(ParseOutcome::Version(text)) => {
            print!("{text}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Ok(report(&err)),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&m).context("failed to encode result")?;
        println!("{json}");
    } else {
        for (name, value) in m.iter() {
            println!("{name}={value}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit 1 for a broken declaration, 2 for bad input.
fn report(err: &argspec::Error) -> ExitCode {
    eprintln!("error: {err}");
    if err.is_spec_error() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
