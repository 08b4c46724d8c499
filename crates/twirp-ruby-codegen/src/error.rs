//! Error types for code generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation operations.
///
/// Every variant is fatal for the run: the caller gets either all generated
/// files or one error, never a partial set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Files requested for generation that were not among the loaded descriptors
    #[error("files to generate not found among loaded descriptors: {}", .0.join(", "))]
    UnknownEntryFiles(Vec<String>),

    /// A method references a type that no loaded file declares
    #[error("unresolved type {type_name} referenced by {method}")]
    UnresolvedType { type_name: String, method: String },

    /// Twirp only supports unary RPCs
    #[error("streaming method {service}.{method} is not supported by Twirp")]
    StreamingNotSupported { service: String, method: String },

    /// Plugin parameter could not be parsed
    #[error("invalid plugin parameter: {0}")]
    InvalidParameter(String),

    /// Several failures collected from one run
    #[error("{} errors:\n{}", .0.len(), join_lines(.0))]
    Multiple(Vec<GenerateError>),
}

impl GenerateError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenerateError::UnknownEntryFiles(_) => 1,
            GenerateError::UnresolvedType { .. } => 2,
            GenerateError::StreamingNotSupported { .. } => 3,
            GenerateError::InvalidParameter(_) => 4,
            GenerateError::Multiple(_) => 5,
        }
    }

    /// Fold collected errors into a single failure.
    ///
    /// Returns `None` for an empty list, the error itself for a single one,
    /// and a flattened [`GenerateError::Multiple`] otherwise.
    pub fn aggregate(errors: Vec<GenerateError>) -> Option<GenerateError> {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                GenerateError::Multiple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(GenerateError::Multiple(flat)),
        }
    }
}

fn join_lines(errors: &[GenerateError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
