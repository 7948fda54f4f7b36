//! Error types surfaced by the cfg reader and the model loader.

use thiserror::Error;

/// Fatal problems found while tokenizing cfg text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CfgError {
    /// A non-blank line that is neither a section header nor a `key=value` pair.
    #[error("Invalid cfg '{line}' at line {number}.")]
    Syntax { line: String, number: usize },
}

/// Errors returned to the host when a model cannot be opened.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message} in '{identifier}'.")]
    Load {
        message: String,
        identifier: String,
        #[source]
        source: CfgError,
    },
}

impl Error {
    /// Wrap a parse failure with the identifier of the document being loaded.
    ///
    /// A trailing period on the inner message is dropped so the combined text
    /// reads as one sentence.
    pub fn load(source: CfgError, identifier: impl Into<String>) -> Self {
        let message = source.to_string();
        let message = message.strip_suffix('.').unwrap_or(&message).to_string();
        Self::Load {
            message,
            identifier: identifier.into(),
            source,
        }
    }
}
