//! macrodiff shell
//!
//! Reports the primary table and the function calls of SELECT statements,
//! either one-shot or line by line from stdin.

mod repl;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::repl::{OutputFormat, Repl};

/// Inspect SELECT statements for their table and function calls.
#[derive(Parser)]
#[command(name = "macrodiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Analyze a single statement and exit.
    #[arg(short, long, value_name = "SQL")]
    execute: Option<String>,

    /// Output format.
    #[arg(short, long, env = "MACRODIFF_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Prompt printed before each line.
    #[arg(long, env = "MACRODIFF_PROMPT", default_value = "macrodiff> ")]
    prompt: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let repl = Repl::new(cli.prompt, cli.format);

    if let Some(sql) = cli.execute {
        let mut out = io::stdout().lock();
        let parsed = repl.execute(sql.trim(), &mut out)?;
        out.flush()?;
        return Ok(if parsed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let count = repl.run(stdin.lock(), &mut out)?;
    info!(statements = count, "session finished");

    Ok(ExitCode::SUCCESS)
}
