use anyhow::Result;
use clap::Parser;

use modguard_core::report::{model::ToolInfo, render};

mod args;

/// Exit status for artifacts that could not be validated at all
/// (unreadable file, malformed or unsupported module). Policy failures
/// exit 1, carried by the outcome itself.
const EXIT_BUILD_ERROR: i32 = 2;

fn main() -> Result<()> {
    let args = args::Args::parse();

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };

    let report = match modguard_core::validate(&args.wasm_path, tool) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(EXIT_BUILD_ERROR);
        }
    };

    // Diagnostics go to stderr so that consumers can grep for rule labels
    // regardless of the report format or --out redirection.
    if !report.outcome.passed {
        eprint!("{}", render::render_diagnostics(&report.outcome));
    }

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };

    match args.out {
        Some(path) => std::fs::write(path, &output)?,
        None => {
            // process::exit skips the runtime's stdout flush.
            use std::io::Write;
            let mut stdout = std::io::stdout();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    std::process::exit(report.outcome.exit_code);
}
