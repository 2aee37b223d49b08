use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the astscope binary.
#[derive(Parser, Debug)]
#[command(
    name = "astscope",
    version,
    about = "Scope and binding analysis for ESTree JSON documents"
)]
pub struct CliArgs {
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Path to an astscope.json file. Defaults to ./astscope.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Do not create scopes for catch clauses and with statements.
    #[arg(long = "fold-lexical-scopes", alias = "foldLexicalScopes")]
    pub fold_lexical_scopes: bool,

    /// Glob patterns selecting files inside directories.
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Glob patterns excluding files inside directories.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Colorize text output. Defaults to whether stdout is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Number of worker threads.
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// ESTree JSON files or directories to analyze.
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
