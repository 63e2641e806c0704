// WHY: Translation services are network-bound and live outside the engine; the
// engine only sees a per-word call that either lands in the cache or fails

use crate::cache::SharedTranslationCache;
use crate::error::TranslationFailure;
use anyhow::{Context, Result};
use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// Synchronous seam the reveal engine calls for each accepted candidate.
///
/// On success a translation for `word` must be readable from the cache the
/// translator was built with, keyed by `word.to_lowercase()`.
pub trait Translator: Send + Sync {
    fn add_word(&self, word: &str) -> std::result::Result<(), TranslationFailure>;
}

/// A translation backend that returns the translation instead of caching it
pub trait AsyncTranslator: Send + Sync {
    fn translate<'a>(
        &'a self,
        word: &'a str,
    ) -> BoxFuture<'a, std::result::Result<String, TranslationFailure>>;
}

/// Bridges an [`AsyncTranslator`] into the [`Translator`] seam with a
/// per-word deadline, writing successes into the shared cache.
///
/// `add_word` blocks on the runtime handle, so it must run off the runtime's
/// worker threads (e.g. inside `spawn_blocking`).
pub struct TimedTranslator<A> {
    inner: A,
    cache: SharedTranslationCache,
    runtime: Handle,
    timeout: Duration,
}

impl<A: AsyncTranslator> TimedTranslator<A> {
    pub fn new(
        inner: A,
        cache: SharedTranslationCache,
        runtime: Handle,
        timeout: Duration,
    ) -> Self {
        Self {
            inner,
            cache,
            runtime,
            timeout,
        }
    }
}

impl<A: AsyncTranslator> Translator for TimedTranslator<A> {
    fn add_word(&self, word: &str) -> std::result::Result<(), TranslationFailure> {
        let request = tokio::time::timeout(self.timeout, self.inner.translate(word));
        let translated = match self.runtime.block_on(request) {
            Ok(result) => result?,
            Err(_) => {
                return Err(TranslationFailure::NetworkFailure(format!(
                    "timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        };
        debug!("Translated {:?} -> {:?}", word, translated);
        self.cache.add_translation(word.to_lowercase(), &translated);
        Ok(())
    }
}

/// In-memory word list translator, keyed by lowercased source word
#[derive(Debug, Default, Clone)]
pub struct Glossary {
    entries: HashMap<String, String>,
}

impl Glossary {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Parse a JSON object of `"source": "translation"` pairs
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).context("glossary must be a JSON object of strings")?;
        Ok(Self::new(entries))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read glossary {}", path.display()))?;
        let glossary = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse glossary {}", path.display()))?;
        debug!("Loaded {} glossary entries from {}", glossary.len(), path.display());
        Ok(glossary)
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AsyncTranslator for Glossary {
    fn translate<'a>(
        &'a self,
        word: &'a str,
    ) -> BoxFuture<'a, std::result::Result<String, TranslationFailure>> {
        let result = self.lookup(word).map(str::to_string).ok_or_else(|| {
            TranslationFailure::ServiceError(format!("no glossary entry for {word:?}"))
        });
        future::ready(result).boxed()
    }
}
