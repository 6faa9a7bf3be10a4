//! Default import policy for reducer modules.
//!
//! The policy is a small ordered rule list, most specific first:
//!
//!   1. named forbidden patterns (wasm-bindgen, WASI) with actionable
//!      explanations for the common mistakes,
//!   2. the sanctioned host-call allowlist,
//!   3. (implicit) default-deny for everything else.
//!
//! Matchers are data, not closures, so the whole surface is auditable by
//! reading this file. Matching is exact or prefix over descriptor fields,
//! never substring-anywhere; a legitimate host call cannot trip a detector
//! by accident, and a renamed import cannot widen the allowlist.

use serde::{Deserialize, Serialize};

use crate::wasm::imports::{ImportDescriptor, ImportKind};

/// Version of the rule list below. Bumped whenever the sanctioned surface
/// or a detector changes.
pub const POLICY_VERSION: &str = "0.1.0";

pub const RULESET: &str = "default";

/// The one namespace the reducer host serves its ABI under.
pub const HOST_NAMESPACE: &str = "reducer_host";

/// Function imports the reducer host provides.
///
/// This is the complete sanctioned surface: clock, logging, table access
/// and iteration, reducer scheduling, and byte-buffer transfer. Anything
/// not listed here is denied, whatever namespace it claims.
pub const HOST_CALLS: &[&str] = &[
    "now",
    "console_log",
    "table_insert",
    "table_update",
    "table_delete_by_col_eq",
    "table_iter_start",
    "table_iter_next",
    "table_iter_drop",
    "schedule_reducer",
    "cancel_reducer",
    "buffer_alloc",
    "buffer_len",
    "buffer_consume",
];

/// Stable diagnostic labels. Consumers grep stderr for these, so changing
/// one is a breaking change.
pub const WASM_BINDGEN_LABEL: &str = "wasm-bindgen detected";
pub const WASI_LABEL: &str = "WASI detected";
pub const UNKNOWN_IMPORT_LABEL: &str = "unrecognized host import";

pub const UNKNOWN_IMPORT_EXPLANATION: &str =
    "only the sanctioned host interface may be imported";

/// Classification of a single import.
///
/// `Unknown` is the default-deny verdict: it never appears on a catalog
/// rule, only as the fallback when no rule matches, and is treated exactly
/// like `Forbidden` when deciding the build outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Allowed,
    Forbidden,
    Unknown,
}

/// Predicate over an `ImportDescriptor`.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact namespace match, any name or kind.
    NamespaceIs(&'static str),
    /// Namespace starts with the given prefix.
    NamespacePrefix(&'static str),
    /// Import name starts with the given prefix, any namespace.
    NamePrefix(&'static str),
    /// Function import from `namespace` whose name appears in `names`.
    /// Non-function kinds never match, even on a name hit.
    HostCall {
        namespace: &'static str,
        names: &'static [&'static str],
    },
    /// Matches when any inner matcher matches.
    AnyOf(Vec<Matcher>),
}

impl Matcher {
    pub fn matches(&self, import: &ImportDescriptor) -> bool {
        match self {
            Matcher::NamespaceIs(ns) => import.namespace == *ns,
            Matcher::NamespacePrefix(prefix) => import.namespace.starts_with(prefix),
            Matcher::NamePrefix(prefix) => import.name.starts_with(prefix),
            Matcher::HostCall { namespace, names } => {
                import.kind == ImportKind::Func
                    && import.namespace == *namespace
                    && names.contains(&import.name.as_str())
            }
            Matcher::AnyOf(inner) => inner.iter().any(|m| m.matches(import)),
        }
    }
}

/// One entry of the ordered rule list.
#[derive(Debug, Clone)]
pub struct PolicyRule {
    pub label: &'static str,
    /// `Allowed` or `Forbidden`; `Unknown` is reserved for the fallback.
    pub verdict: Verdict,
    pub explanation: &'static str,
    pub matcher: Matcher,
}

/// Build the default rule list for one validation run.
///
/// The list is immutable once built; concurrent builds may share it or
/// construct their own, the classification is the same either way.
pub fn default_rules() -> Vec<PolicyRule> {
    vec![
        // Heuristic over wasm-bindgen's generated naming conventions: the
        // "wbg" namespace and the "__wbindgen"/"__wbg_" prefixes have been
        // stable across releases on both the namespace and name side. This
        // detects the bridge, it does not prove its absence.
        PolicyRule {
            label: WASM_BINDGEN_LABEL,
            verdict: Verdict::Forbidden,
            explanation: "the module links JS-interop glue generated by wasm-bindgen, \
                          which assumes a JavaScript host; remove the wasm-bindgen \
                          dependency and rebuild",
            matcher: Matcher::AnyOf(vec![
                Matcher::NamespaceIs("wbg"),
                Matcher::NamespacePrefix("__wbindgen"),
                Matcher::NamePrefix("__wbindgen_"),
                Matcher::NamePrefix("__wbg_"),
            ]),
        },
        PolicyRule {
            label: WASI_LABEL,
            verdict: Verdict::Forbidden,
            explanation: "the reducer host provides no WASI; rebuild without \
                          wasi-targeted dependencies",
            matcher: Matcher::AnyOf(vec![
                Matcher::NamespacePrefix("wasi_snapshot_preview"),
                Matcher::NamespaceIs("wasi_unstable"),
            ]),
        },
        PolicyRule {
            label: "sanctioned host call",
            verdict: Verdict::Allowed,
            explanation: "part of the reducer host interface",
            matcher: Matcher::HostCall {
                namespace: HOST_NAMESPACE,
                names: HOST_CALLS,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(namespace: &str, name: &str, kind: ImportKind) -> ImportDescriptor {
        ImportDescriptor {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    #[test]
    fn namespace_matchers() {
        let wbg = import("wbg", "anything", ImportKind::Func);
        assert!(Matcher::NamespaceIs("wbg").matches(&wbg));
        assert!(!Matcher::NamespaceIs("wbg2").matches(&wbg));

        let placeholder = import("__wbindgen_placeholder__", "f", ImportKind::Func);
        assert!(Matcher::NamespacePrefix("__wbindgen").matches(&placeholder));
        assert!(!Matcher::NamespacePrefix("wbindgen").matches(&placeholder));
    }

    #[test]
    fn name_prefix_matches_any_namespace() {
        let describe = import("env", "__wbindgen_describe", ImportKind::Func);
        assert!(Matcher::NamePrefix("__wbindgen_").matches(&describe));

        let glue = import("imports", "__wbg_alert_9ea5a791b0d4c7a4", ImportKind::Func);
        assert!(Matcher::NamePrefix("__wbg_").matches(&glue));
    }

    #[test]
    fn host_call_requires_function_kind() {
        let func = import(HOST_NAMESPACE, "now", ImportKind::Func);
        let global = import(HOST_NAMESPACE, "now", ImportKind::Global);

        let matcher = Matcher::HostCall {
            namespace: HOST_NAMESPACE,
            names: HOST_CALLS,
        };

        assert!(matcher.matches(&func));
        assert!(!matcher.matches(&global));
    }

    #[test]
    fn host_call_requires_exact_namespace() {
        let matcher = Matcher::HostCall {
            namespace: HOST_NAMESPACE,
            names: HOST_CALLS,
        };

        // No prefix or suffix trick widens the surface.
        assert!(!matcher.matches(&import("reducer_host2", "now", ImportKind::Func)));
        assert!(!matcher.matches(&import("reducer_hos", "now", ImportKind::Func)));
        assert!(!matcher.matches(&import("reducer_host", "now2", ImportKind::Func)));
    }

    #[test]
    fn any_of_is_a_disjunction() {
        let matcher = Matcher::AnyOf(vec![
            Matcher::NamespaceIs("wbg"),
            Matcher::NamePrefix("__wbg_"),
        ]);

        assert!(matcher.matches(&import("wbg", "f", ImportKind::Func)));
        assert!(matcher.matches(&import("env", "__wbg_f", ImportKind::Func)));
        assert!(!matcher.matches(&import("env", "f", ImportKind::Func)));
    }

    #[test]
    fn forbidden_detectors_precede_the_allowlist() {
        let rules = default_rules();

        assert_eq!(rules[0].label, WASM_BINDGEN_LABEL);
        assert_eq!(rules[0].verdict, Verdict::Forbidden);

        let allow_pos = rules
            .iter()
            .position(|r| r.verdict == Verdict::Allowed)
            .expect("allowlist rule present");
        let last_forbid = rules
            .iter()
            .rposition(|r| r.verdict == Verdict::Forbidden)
            .unwrap();
        assert!(last_forbid < allow_pos);
    }

    #[test]
    fn no_catalog_rule_carries_the_unknown_verdict() {
        assert!(
            default_rules()
                .iter()
                .all(|r| r.verdict != Verdict::Unknown)
        );
    }

    #[test]
    fn diagnostic_labels_are_stable() {
        // Compatibility contract: downstream tooling greps stderr for these.
        assert_eq!(WASM_BINDGEN_LABEL, "wasm-bindgen detected");
        assert_eq!(WASI_LABEL, "WASI detected");
        assert_eq!(UNKNOWN_IMPORT_LABEL, "unrecognized host import");
    }

    #[test]
    fn verdict_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Verdict::Forbidden).unwrap(),
            "\"FORBIDDEN\""
        );
        assert_eq!(
            serde_json::to_string(&Verdict::Allowed).unwrap(),
            "\"ALLOWED\""
        );
    }
}
