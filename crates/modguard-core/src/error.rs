use thiserror::Error;

/// Errors that abort the validation pipeline.
///
/// These are build-system errors, distinct from policy failures: a module
/// that parses but imports forbidden symbols still yields a successful
/// `ValidationOutcome` (with `passed == false`), never a `ModuleError`.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The byte sequence does not parse as a structurally valid core module
    /// (truncated section, invalid section id, length mismatch, ...).
    #[error("malformed module: {0}")]
    Malformed(#[from] wasmparser::BinaryReaderError),

    /// The bytes parse but use an encoding the gate does not understand
    /// (component-model artifacts, nested modules).
    #[error("unsupported module: {0}")]
    Unsupported(String),
}
