use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "modguard",
    version,
    about = "Import policy gate for reducer WASM modules"
)]
pub struct Args {
    /// Path to the compiled .wasm artifact
    pub wasm_path: PathBuf,

    /// Report format written to stdout (diagnostics always go to stderr)
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
