// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use diglot::{
    IdentityTransliterator, IndexSampler, RevealConfig, RevealEngine, SharedTranslationCache,
    TranslationFailure, Translator,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with book and glossary files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a plain text book with given content
    pub fn create_book<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write book file");
        file_path
    }

    /// Create a JSON glossary file from word pairs
    pub fn create_glossary(&self, name: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        let json = serde_json::to_string(&map).expect("Failed to serialize glossary");
        let path = self.root_path.join(name);
        fs::write(&path, json).expect("Failed to write glossary file");
        path
    }
}

/// Sampler that replays a fixed list of indices, then keeps returning 0
pub struct ScriptedSampler(pub VecDeque<usize>);

impl ScriptedSampler {
    pub fn boxed(draws: &[usize]) -> Box<dyn IndexSampler> {
        Box::new(Self(draws.iter().copied().collect()))
    }
}

impl IndexSampler for ScriptedSampler {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.pop_front().unwrap_or(0) % len
    }
}

/// Translator backed by a fixed word map that records every call.
/// Words listed in `failing` fail with a network error.
pub struct RecordingTranslator {
    entries: HashMap<String, String>,
    failing: HashSet<String>,
    cache: SharedTranslationCache,
    calls: Mutex<Vec<String>>,
}

impl RecordingTranslator {
    pub fn new(cache: &SharedTranslationCache, pairs: &[(&str, &str)]) -> Arc<Self> {
        Self::with_failures(cache, pairs, &[])
    }

    pub fn with_failures(
        cache: &SharedTranslationCache,
        pairs: &[(&str, &str)],
        failing: &[&str],
    ) -> Arc<Self> {
        Arc::new(Self {
            entries: pairs.iter().map(|(k, v)| (k.to_lowercase(), v.to_string())).collect(),
            failing: failing.iter().map(|w| w.to_lowercase()).collect(),
            cache: cache.clone(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Translator for RecordingTranslator {
    fn add_word(&self, word: &str) -> Result<(), TranslationFailure> {
        self.calls.lock().expect("calls lock").push(word.to_string());
        let key = word.to_lowercase();
        if self.failing.contains(&key) {
            return Err(TranslationFailure::NetworkFailure("connection reset".to_string()));
        }
        match self.entries.get(&key) {
            Some(translated) => {
                self.cache.add_translation(key, translated);
                Ok(())
            }
            None => Err(TranslationFailure::ServiceError(format!("unknown word {word}"))),
        }
    }
}

/// Engine with identity transliteration and scripted draws
pub fn scripted_engine(
    config: RevealConfig,
    cache: &SharedTranslationCache,
    translator: Arc<RecordingTranslator>,
    draws: &[usize],
) -> RevealEngine {
    RevealEngine::with_sampler(
        config,
        cache.clone(),
        translator,
        Arc::new(IdentityTransliterator),
        ScriptedSampler::boxed(draws),
    )
    .expect("valid engine config")
}

/// Words of a whitespace separated sentence
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}
