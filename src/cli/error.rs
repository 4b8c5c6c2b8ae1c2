//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::errors::{CodecError, TreeError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot build tree: {0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Tree(_) => crate::exitcode::DATAERR,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Codec(e) => match e {
                CodecError::OrphanLine { .. }
                | CodecError::EmptyOrMalformedLine { .. }
                | CodecError::UnencodableValue { .. } => crate::exitcode::DATAERR,
                CodecError::Io { source, .. }
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    crate::exitcode::NOINPUT
                }
                CodecError::Io { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_follow_sysexits() {
        assert_eq!(CliError::from(TreeError::MissingRoot).exit_code(), exitcode::DATAERR);
        assert_eq!(CliError::Usage("x".into()).exit_code(), exitcode::USAGE);

        let missing = CodecError::io(
            "open x",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(CliError::from(missing).exit_code(), exitcode::NOINPUT);

        let orphan = CodecError::OrphanLine {
            line: 1,
            text: "A B".into(),
        };
        assert_eq!(CliError::from(orphan).exit_code(), exitcode::DATAERR);
    }
}
