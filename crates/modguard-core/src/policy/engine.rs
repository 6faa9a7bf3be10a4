//! Classification engine for the import policy.
//!
//! Responsibilities:
//! - Apply the ordered rule list to each extracted import
//! - First-match-wins per import; rule order encodes specificity
//! - Default-deny: an import matching no rule is `Unknown`, never allowed
//!
//! Non-responsibilities:
//! - Parsing the module (handled in `wasm::imports`)
//! - Aggregating verdicts into a build outcome (handled in `report`)
//!
//! The engine is a pure function of `(imports, rules)`: no I/O, no shared
//! state, identical inputs always produce identical results.

use crate::policy::catalog::{PolicyRule, UNKNOWN_IMPORT_EXPLANATION, Verdict};
use crate::wasm::imports::ImportDescriptor;

/// Verdict for one import.
///
/// Exactly one of these is produced per extracted `ImportDescriptor`, in
/// declaration order. `rule_label` is `None` only for the default-deny
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub descriptor: ImportDescriptor,
    pub verdict: Verdict,
    pub rule_label: Option<String>,
    pub explanation: String,
}

/// Classify every import against the rule list.
///
/// Output order equals input order; classification never fails — even an
/// import nothing matches yields a result (the `Unknown` fallback), so the
/// failure list downstream is complete rather than cut off at the first
/// offender.
pub fn classify(imports: &[ImportDescriptor], rules: &[PolicyRule]) -> Vec<ClassificationResult> {
    imports
        .iter()
        .map(|import| classify_one(import, rules))
        .collect()
}

fn classify_one(import: &ImportDescriptor, rules: &[PolicyRule]) -> ClassificationResult {
    for rule in rules {
        if rule.matcher.matches(import) {
            return ClassificationResult {
                descriptor: import.clone(),
                verdict: rule.verdict,
                rule_label: Some(rule.label.to_string()),
                explanation: rule.explanation.to_string(),
            };
        }
    }

    ClassificationResult {
        descriptor: import.clone(),
        verdict: Verdict::Unknown,
        rule_label: None,
        explanation: UNKNOWN_IMPORT_EXPLANATION.to_string(),
    }
}
