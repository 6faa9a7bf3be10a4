use std::path::Path;

use anyhow::Result;

pub mod error;
pub mod policy;
pub mod report;
pub mod wasm;

pub use error::ModuleError;

use crate::report::model::{Report, ToolInfo, ValidationOutcome};

pub const TOOL_NAME: &str = "modguard";

/// JSON schema version of modguard reports.
/// This must be bumped only when the report shape changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Run the full import-validation pipeline against an on-disk artifact.
///
/// Reads the module bytes, extracts the declared imports, classifies them
/// against the default policy, and assembles the versioned report. Returns
/// an error (not a failed outcome) when the artifact cannot be read or does
/// not parse as a core WASM module; those are build errors, not policy
/// verdicts.
pub fn validate(path: &Path, tool: ToolInfo) -> Result<Report> {
    let ctx = wasm::read::read_artifact(path)?;

    let imports = wasm::imports::extract_imports(&ctx.bytes)?;
    let rules = policy::catalog::default_rules();
    let results = policy::engine::classify(&imports, &rules);
    let outcome = ValidationOutcome::from_results(&results);

    Ok(Report::new(tool, ctx.into_artifact(), imports, outcome))
}

/// Validate raw module bytes under the default policy.
///
/// Library entry point for callers that already hold the compiled bytes
/// (e.g. a build orchestrator that just ran the compiler) and only need the
/// pass/fail outcome, not the full report envelope.
pub fn validate_bytes(bytes: &[u8]) -> Result<ValidationOutcome, ModuleError> {
    let imports = wasm::imports::extract_imports(bytes)?;
    let rules = policy::catalog::default_rules();
    let results = policy::engine::classify(&imports, &rules);
    Ok(ValidationOutcome::from_results(&results))
}
