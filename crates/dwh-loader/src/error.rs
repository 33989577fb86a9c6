//! Error types for the loader library.

use thiserror::Error;

/// Main error type for warehouse bootstrap and load operations.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Configuration file missing or malformed
    #[error("Configuration unreadable: {0}")]
    ConfigUnreadable(String),

    /// A required configuration key was absent at the point of use
    #[error("Configuration incomplete: missing {section}.{key}")]
    ConfigIncomplete { section: String, key: String },

    /// Network or authentication error while opening the session
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A named statement failed against the warehouse
    #[error("Statement '{statement}' failed: {message}")]
    ExecutionFailed { statement: String, message: String },

    /// Warehouse driver error
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    /// Create an ExecutionFailed error for a named statement.
    pub fn execution(statement: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::ExecutionFailed {
            statement: statement.into(),
            message: message.into(),
        }
    }

    /// Create a ConfigIncomplete error for a section/key pair.
    pub fn incomplete(section: impl Into<String>, key: impl Into<String>) -> Self {
        LoadError::ConfigIncomplete {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for this error.
    ///
    /// Config errors exit 1, connection errors 2, statement errors 3,
    /// IO errors 7.
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadError::ConfigUnreadable(_)
            | LoadError::ConfigIncomplete { .. }
            | LoadError::Yaml(_) => 1,
            LoadError::ConnectionFailed(_) => 2,
            LoadError::ExecutionFailed { .. } | LoadError::Database(_) => 3,
            LoadError::Io(_) => 7,
        }
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;
