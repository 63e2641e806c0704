use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Source word to translation mapping for one reading session.
///
/// Values are lowercased on insert. Keys are stored as given; the reveal
/// engine always looks up lowercased words, so writers should lowercase keys.
#[derive(Debug, Default, Clone)]
pub struct TranslationCache {
    translations: HashMap<String, String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `translated_word` (lowercased) under `source_word`, replacing
    /// any earlier translation for the same key
    pub fn add_translation(&mut self, source_word: impl Into<String>, translated_word: &str) {
        self.translations
            .insert(source_word.into(), translated_word.to_lowercase());
    }

    /// Live view of every translation; iteration order is unspecified
    pub fn get_translations(&self) -> &HashMap<String, String> {
        &self.translations
    }

    pub fn get(&self, source_word: &str) -> Option<&str> {
        self.translations.get(source_word).map(String::as_str)
    }

    pub fn contains(&self, source_word: &str) -> bool {
        self.translations.contains_key(source_word)
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

/// Cloneable handle to a cache shared by the engine and translators.
///
/// Every clone points at the same map; the lock serializes writes from
/// pages revealed on different threads.
#[derive(Debug, Default, Clone)]
pub struct SharedTranslationCache {
    inner: Arc<RwLock<TranslationCache>>,
}

impl SharedTranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cache(cache: TranslationCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn add_translation(&self, source_word: impl Into<String>, translated_word: &str) {
        self.write().add_translation(source_word, translated_word);
    }

    /// Cloned translation for `source_word`, if cached
    pub fn get(&self, source_word: &str) -> Option<String> {
        self.read().get(source_word).map(str::to_string)
    }

    pub fn contains(&self, source_word: &str) -> bool {
        self.read().contains(source_word)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Point-in-time copy of the whole cache
    pub fn snapshot(&self) -> TranslationCache {
        self.read().clone()
    }

    /// Hold the read lock for a batch of lookups
    pub fn read(&self) -> RwLockReadGuard<'_, TranslationCache> {
        // A panicking writer can only leave a fully inserted or untouched entry
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TranslationCache> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
