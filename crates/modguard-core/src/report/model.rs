use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::policy::catalog::{POLICY_VERSION, RULESET, Verdict};
use crate::policy::engine::ClassificationResult;
use crate::report::render;
use crate::wasm::imports::{ImportDescriptor, ImportKind};

/// Top-level modguard report.
///
/// This struct is the stable JSON contract emitted once per build. It must
/// remain deterministic for identical input artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub artifact: ArtifactInfo,
    /// Every declared import, in declaration order.
    pub imports: Vec<ImportDescriptor>,
    pub policy: PolicyInfo,
    pub outcome: ValidationOutcome,
}

impl Report {
    /// Assemble a report from pipeline outputs.
    pub fn new(
        tool: ToolInfo,
        artifact: ArtifactInfo,
        imports: Vec<ImportDescriptor>,
        outcome: ValidationOutcome,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            artifact,
            imports,
            policy: PolicyInfo {
                policy_version: POLICY_VERSION.to_string(),
                ruleset: RULESET.to_string(),
            },
            outcome,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// Artifact metadata bound to this report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub hash: ArtifactHash,
}

/// Cryptographic artifact fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHash {
    pub algorithm: String,
    pub value: String,
}

/// Identifies the policy used for this report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyInfo {
    pub policy_version: String,
    pub ruleset: String,
}

/// One denied import, with its rendered diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportFailure {
    pub namespace: String,
    pub name: String,
    pub kind: ImportKind,
    pub verdict: Verdict,
    /// Label of the matched rule; `None` for the default-deny fallback.
    pub rule_label: Option<String>,
    /// Full diagnostic line, carrying the grep-stable label.
    pub message: String,
}

/// Aggregate build outcome of one validation run.
///
/// Created once per build, consumed once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub passed: bool,
    /// Process exit status the orchestrator must use: 0 pass, 1 policy
    /// failure. (Build errors never reach an outcome; they exit 2 at the
    /// CLI boundary.)
    pub exit_code: i32,
    /// Denied imports in declaration order. Complete: one entry per
    /// forbidden or unknown import, never cut off after the first.
    pub failures: Vec<ImportFailure>,
}

impl ValidationOutcome {
    /// Fold classification results into the build outcome.
    ///
    /// `passed` is true iff every verdict is `Allowed`; any single
    /// forbidden or unknown import fails the build.
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let failures: Vec<ImportFailure> = results
            .iter()
            .filter(|r| r.verdict != Verdict::Allowed)
            .map(|r| ImportFailure {
                namespace: r.descriptor.namespace.clone(),
                name: r.descriptor.name.clone(),
                kind: r.descriptor.kind,
                verdict: r.verdict,
                rule_label: r.rule_label.clone(),
                message: render::failure_line(r),
            })
            .collect();

        let passed = failures.is_empty();
        Self {
            passed,
            exit_code: if passed { 0 } else { 1 },
            failures,
        }
    }
}
