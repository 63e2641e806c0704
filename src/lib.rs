pub mod book;
pub mod cache;
pub mod config;
pub mod error;
pub mod page;
pub mod paginator;
pub mod reader;
pub mod reveal;
pub mod session;
pub mod translator;
pub mod transliterate;

// Re-export main types for convenient access
pub use book::Book;
pub use cache::{SharedTranslationCache, TranslationCache};
pub use config::{RevealConfig, DEFAULT_SEED};
pub use error::{DiglotError, Result, TranslationFailure};
pub use page::{DisplayWord, Page, WordKind};
pub use paginator::{paginate, paginate_text, words_from_text};

// Re-export reveal engine and its collaborators
pub use reveal::{FailedWord, IndexSampler, RevealEngine, RevealReport, SeededSampler};
pub use translator::{AsyncTranslator, Glossary, TimedTranslator, Translator};
pub use transliterate::{
    transliterate_opt, CyrillicTransliterator, IdentityTransliterator, Transliterator,
};

pub use session::{PageStats, ReadingSession, SessionStats};
