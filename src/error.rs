//! Error types for entitygen

use thiserror::Error;

/// Result type alias for entitygen operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur during extraction or generation
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Class {0} has no entity annotation")]
    MissingAnnotation(String),

    #[error("Class not found: {0}")]
    ClassNotFound(String),

    #[error("Cannot rebuild description for {class}: missing generated artifact {artifact}")]
    ArtifactMissing { class: String, artifact: String },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Source root not found under {0}")]
    SourceRootMissing(String),

    #[error("Failed to parse Java source: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::ConfigError(err.to_string())
    }
}

impl GenError {
    /// Precondition errors mean "nothing to do for this class", not a broken
    /// run; the CLI reports them at info level and moves on.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GenError::MissingAnnotation(_)
                | GenError::ClassNotFound(_)
                | GenError::ArtifactMissing { .. }
        )
    }
}
