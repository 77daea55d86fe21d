//! Error types for synthesis and plan output.

use std::path::PathBuf;

/// Errors that abort a synthesis pass.
///
/// Nothing is written when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The referenced stack is unknown to the output registry.
    #[error(
        "unresolved cross-stack reference: stack '{stack}' is not deployed or published no outputs"
    )]
    UnresolvedStack {
        /// Name of the missing stack.
        stack: String,
    },

    /// The referenced stack exists but lacks the requested output.
    #[error("unresolved cross-stack reference: stack '{stack}' has no output '{key}'")]
    UnresolvedOutput {
        /// Name of the stack.
        stack: String,
        /// Missing output key.
        key: String,
    },

    /// The output exists but its value cannot be used.
    #[error("output '{key}' of stack '{stack}' is unusable: {reason}")]
    InvalidOutput {
        /// Name of the stack.
        stack: String,
        /// Output key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The deployed-outputs file could not be read.
    #[error("failed to read stack outputs file {path}: {source}")]
    OutputsFile {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The deployed-outputs file has an unrecognized shape.
    #[error("malformed stack outputs file: {0}")]
    OutputsFormat(#[source] serde_json::Error),

    /// Two stacks share a name.
    #[error("stack '{0}' is already defined")]
    DuplicateStack(String),

    /// Two resources in one stack share a logical ID.
    #[error("resource '{logical_id}' is already defined in stack '{stack}'")]
    DuplicateResource {
        /// Stack name.
        stack: String,
        /// Conflicting logical ID.
        logical_id: String,
    },

    /// Two outputs in one stack share a key.
    #[error("output '{key}' is already defined in stack '{stack}'")]
    DuplicateOutput {
        /// Stack name.
        stack: String,
        /// Conflicting output key.
        key: String,
    },

    /// A parameter path was published twice.
    #[error("parameter '{0}' is already published")]
    DuplicateParameter(String),

    /// A second stack tried to write into the parameter namespace.
    #[error("stack '{writer}' cannot publish '{path}': the parameter namespace is owned by '{owner}'")]
    NamespaceOwnership {
        /// Stack attempting the write.
        writer: String,
        /// Stack that owns the namespace.
        owner: String,
        /// Parameter path.
        path: String,
    },

    /// Resource properties could not be serialized.
    #[error("failed to serialize resource '{logical_id}': {source}")]
    Serialize {
        /// Logical ID of the resource.
        logical_id: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl SynthError {
    /// Whether the error comes from resolving another stack's outputs.
    #[must_use]
    pub fn is_cross_stack(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedStack { .. } | Self::UnresolvedOutput { .. } | Self::InvalidOutput { .. }
        )
    }
}

/// Convenience result type for synthesis.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors raised while writing the deployment plan to disk.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// A file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document could not be serialized.
    #[error("failed to serialize {file}: {source}")]
    Serialize {
        /// File being produced.
        file: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
