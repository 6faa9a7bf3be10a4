use serde::{Deserialize, Serialize};
use wasmparser::{Encoding, Parser, Payload, TypeRef};

use crate::error::ModuleError;

/// External kind of a declared import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Func,
    Table,
    Memory,
    Global,
    Tag,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Func => "func",
            ImportKind::Table => "table",
            ImportKind::Memory => "memory",
            ImportKind::Global => "global",
            ImportKind::Tag => "tag",
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&TypeRef> for ImportKind {
    fn from(ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Func(_) | TypeRef::FuncExact(_) => ImportKind::Func,
            TypeRef::Table(_) => ImportKind::Table,
            TypeRef::Memory(_) => ImportKind::Memory,
            TypeRef::Global(_) => ImportKind::Global,
            TypeRef::Tag(_) => ImportKind::Tag,
        }
    }
}

/// One declared import, as written in the module's import section.
///
/// Identity is the full `(namespace, name, kind)` tuple; a module may
/// legally declare the same namespace/name pair under different kinds, so
/// each descriptor is classified independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDescriptor {
    /// The import's module field ("namespace" here, to avoid overloading
    /// "module" for both the artifact and the import field).
    pub namespace: String,
    pub name: String,
    pub kind: ImportKind,
}

/// Extract every declared import from a compiled module, in declaration
/// order.
///
/// This performs a single structural pass over `bytes`; the module is never
/// instantiated or executed. Any parse error aborts extraction with
/// `ModuleError::Malformed` — a malformed artifact is a toolchain problem,
/// not a policy verdict, and must never be mistaken for a passing module.
/// Component-model artifacts are rejected as `ModuleError::Unsupported`.
pub fn extract_imports(bytes: &[u8]) -> Result<Vec<ImportDescriptor>, ModuleError> {
    let mut imports = Vec::new();

    // `parse_all` is appropriate here: the orchestrator hands us the full
    // artifact in memory and extraction is a deterministic offline pass.
    let parser = Parser::new(0);

    for payload in parser.parse_all(bytes) {
        match payload? {
            Payload::Version { encoding, .. } => {
                if encoding != Encoding::Module {
                    return Err(ModuleError::Unsupported(
                        "component-model artifact; reducer modules must be core WASM".to_string(),
                    ));
                }
            }

            Payload::ImportSection(reader) => {
                for entry in reader.into_imports() {
                    let entry = entry?;
                    imports.push(ImportDescriptor {
                        namespace: entry.module.to_string(),
                        name: entry.name.to_string(),
                        kind: ImportKind::from(&entry.ty),
                    });
                }
            }

            // Nested modules / component payloads cannot occur once the
            // encoding check above passed, but wasmparser's payload space
            // still names them; reject rather than silently skip.
            other @ (Payload::ComponentSection { .. }
            | Payload::ComponentTypeSection(_)
            | Payload::ComponentImportSection(_)
            | Payload::ComponentExportSection(_)
            | Payload::ComponentCanonicalSection(_)
            | Payload::CoreTypeSection(_)
            | Payload::InstanceSection(_)
            | Payload::ComponentInstanceSection(_)
            | Payload::ComponentAliasSection(_)
            | Payload::ComponentStartSection { .. }
            | Payload::ModuleSection { .. }) => {
                return Err(ModuleError::Unsupported(format!(
                    "unexpected component/module nesting payload: {other:?}"
                )));
            }

            Payload::End(_) => {}

            // Every other section (Type, Function, Code, Data, custom, ...)
            // is irrelevant to the import gate.
            _ => {}
        }
    }

    Ok(imports)
}
