use crate::TOOL_NAME;
use crate::policy::catalog::UNKNOWN_IMPORT_LABEL;
use crate::policy::engine::ClassificationResult;
use crate::report::model::{Report, ValidationOutcome};

/// Render the diagnostic line for one denied import.
///
/// The leading label is a compatibility contract: consumers grep stderr for
/// it (e.g. "wasm-bindgen detected"), so the format is
/// `{label}: import `{name}` from module `{namespace}` is not supported; {explanation}`.
pub fn failure_line(result: &ClassificationResult) -> String {
    let label = result.rule_label.as_deref().unwrap_or(UNKNOWN_IMPORT_LABEL);
    format!(
        "{label}: import `{}` from module `{}` is not supported; {}",
        result.descriptor.name, result.descriptor.namespace, result.explanation
    )
}

/// Render the stderr diagnostic block for a failed validation.
///
/// One line per denied import, declaration order. Empty for a passing
/// outcome.
pub fn render_diagnostics(outcome: &ValidationOutcome) -> String {
    let mut out = String::new();
    for failure in &outcome.failures {
        out.push_str("error: ");
        out.push_str(&failure.message);
        out.push('\n');
    }
    out
}

/// Render the human-readable report summary.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    out.push_str(&format!(
        "Artifact size: {} bytes\n",
        report.artifact.size_bytes
    ));
    out.push_str(&format!("Imports: {}\n", report.imports.len()));
    out.push_str(&format!(
        "Outcome: {}\n",
        if report.outcome.passed { "pass" } else { "fail" }
    ));
    if !report.outcome.failures.is_empty() {
        out.push_str("Denied imports:\n");
        for f in &report.outcome.failures {
            out.push_str(&format!(
                "  - `{}` from module `{}` ({})\n",
                f.name, f.namespace, f.kind
            ));
        }
    }
    out
}
