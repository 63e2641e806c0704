// WHY: Core operations fail in three distinct ways (bad construction input, unknown
// page, per-word translation) and callers treat each differently

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a translator could not produce a translation for one word
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationFailure {
    /// The translation service needs a credential that was not configured
    #[error("missing credential for translation service")]
    MissingCredential,

    /// The request never completed or timed out
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The service answered but refused or could not translate
    #[error("translation service error: {0}")]
    ServiceError(String),
}

/// Errors raised by the reading engine core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiglotError {
    /// Construction input violated an invariant; nothing was built
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No page with this number exists in the book
    #[error("page {page_number} not found")]
    NotFound { page_number: u32 },

    /// A single word could not be translated
    #[error("failed to translate {word:?}: {source}")]
    Translation {
        word: String,
        #[source]
        source: TranslationFailure,
    },
}

impl DiglotError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DiglotError::InvalidArgument(msg.into())
    }

    /// Whether the error only affects one word and reveal may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DiglotError::Translation { .. })
    }
}

pub type Result<T> = std::result::Result<T, DiglotError>;
