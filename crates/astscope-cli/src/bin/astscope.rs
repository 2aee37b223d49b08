#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use astscope_cli::args::{CliArgs, OutputFormat};
use astscope_cli::reporter::Reporter;
use astscope_cli::{config, driver, tracing_config};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

fn main() -> Result<()> {
    // ASTSCOPE_LOG / ASTSCOPE_LOG_FORMAT, see tracing_config.rs.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let resolved = config::resolve(&args, &cwd)?;

    let files = driver::discover_files(&args.paths, &resolved.filter)?;
    let results = driver::run(&files, resolved.options, args.jobs)?;

    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    let reporter = Reporter::new(color);
    match args.format {
        OutputFormat::Text => print!("{}", reporter.render_text(&results)),
        OutputFormat::Json => println!("{}", reporter.render_json(&results)?),
    }

    if results.iter().any(|file| !file.is_ok()) {
        eprintln!("{}", Reporter::new(std::io::stderr().is_terminal()).render_summary(&results));
        std::process::exit(EXIT_FAILURE);
    }
    std::process::exit(EXIT_SUCCESS);
}
