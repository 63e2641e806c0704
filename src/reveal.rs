// WHY: Each page visit reveals a few more foreign words; choice is seeded so the
// same book and visit order always reveal the same vocabulary

use crate::cache::SharedTranslationCache;
use crate::config::RevealConfig;
use crate::error::{DiglotError, Result, TranslationFailure};
use crate::page::{DisplayWord, Page};
use crate::translator::Translator;
use crate::transliterate::Transliterator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Source of uniformly drawn word indices
pub trait IndexSampler: Send {
    /// Index in `0..len`; `len` is always positive
    fn next_index(&mut self, len: usize) -> usize;
}

/// Default sampler backed by a seeded `StdRng`
#[derive(Debug, Clone)]
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IndexSampler for SeededSampler {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// A word the translator could not handle during one visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedWord {
    pub word: String,
    pub failure: TranslationFailure,
}

/// What one `execute` call did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub page_number: u32,
    /// Reveal count the schedule asked for
    pub requested: usize,
    /// Candidates accepted and sent to the translator
    pub accepted: Vec<String>,
    /// Accepted candidates the translator succeeded on
    pub translated: usize,
    pub failures: Vec<FailedWord>,
    /// Index draws made, accepted or not
    pub draws: usize,
    /// Fewer eligible words existed than were requested
    pub exhausted: bool,
}

/// Decides which words to reveal on a page visit and rewrites the page
pub struct RevealEngine {
    config: RevealConfig,
    cache: SharedTranslationCache,
    translator: Arc<dyn Translator>,
    transliterator: Arc<dyn Transliterator>,
    sampler: Box<dyn IndexSampler>,
}

impl RevealEngine {
    /// Engine drawing from a `StdRng` seeded with `config.seed`
    pub fn new(
        config: RevealConfig,
        cache: SharedTranslationCache,
        translator: Arc<dyn Translator>,
        transliterator: Arc<dyn Transliterator>,
    ) -> Result<Self> {
        let sampler = Box::new(SeededSampler::new(config.seed));
        Self::with_sampler(config, cache, translator, transliterator, sampler)
    }

    pub fn with_sampler(
        config: RevealConfig,
        cache: SharedTranslationCache,
        translator: Arc<dyn Translator>,
        transliterator: Arc<dyn Transliterator>,
        sampler: Box<dyn IndexSampler>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache,
            translator,
            transliterator,
            sampler,
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn cache(&self) -> &SharedTranslationCache {
        &self.cache
    }

    /// Reveal new words on `page` and re-render its displayed view.
    ///
    /// Translator failures are logged and reported per word; they never stop
    /// the rewrite, so already cached words still render.
    pub fn execute(&mut self, page: &mut Page) -> Result<RevealReport> {
        let page_number = page.page_number();
        let requested = self.config.reveal_count(page_number);
        let mut report = RevealReport {
            page_number,
            requested,
            ..Default::default()
        };

        if requested > 0 {
            let accepted = self.select_candidates(page.original_words(), requested, &mut report);
            for word in &accepted {
                match self.translator.add_word(word) {
                    Ok(()) => report.translated += 1,
                    Err(failure) => {
                        let err = DiglotError::Translation {
                            word: word.clone(),
                            source: failure.clone(),
                        };
                        warn!("Skipping word on page {}: {}", page_number, err);
                        report.failures.push(FailedWord {
                            word: word.clone(),
                            failure,
                        });
                    }
                }
            }
            report.accepted = accepted;
        }

        let rendered = self.render(page.original_words());
        page.replace_displayed(rendered)?;

        info!(
            "Page {}: requested {}, accepted {}, translated {}, failed {}, {} draws{}",
            page_number,
            report.requested,
            report.accepted.len(),
            report.translated,
            report.failures.len(),
            report.draws,
            if report.exhausted { " (candidates exhausted)" } else { "" }
        );
        Ok(report)
    }

    fn is_eligible(&self, word: &str, cache_keys: &HashSet<String>) -> bool {
        word.chars().count() >= self.config.min_word_len
            && !cache_keys.contains(&word.to_lowercase())
    }

    /// Draw random indices until `requested` distinct uncached words of
    /// sufficient length are accepted, or the draw budget runs out
    fn select_candidates(
        &mut self,
        words: &[String],
        requested: usize,
        report: &mut RevealReport,
    ) -> Vec<String> {
        let cache_keys: HashSet<String> =
            self.cache.read().get_translations().keys().cloned().collect();

        let eligible: HashSet<String> = words
            .iter()
            .filter(|w| self.is_eligible(w, &cache_keys))
            .map(|w| w.to_lowercase())
            .collect();
        let target = requested.min(eligible.len());
        report.exhausted = target < requested;
        if target == 0 {
            debug!("No eligible words to reveal");
            return Vec::new();
        }

        let max_draws = words.len().saturating_mul(self.config.retry_factor).max(target);
        let mut accepted = Vec::with_capacity(target);
        let mut seen: HashSet<String> = HashSet::with_capacity(target);

        while accepted.len() < target && report.draws < max_draws {
            let idx = self.sampler.next_index(words.len());
            report.draws += 1;
            let word = &words[idx];
            let key = word.to_lowercase();
            if eligible.contains(&key) && seen.insert(key) {
                accepted.push(word.clone());
            }
        }

        if accepted.len() < target {
            debug!(
                "Draw budget of {} spent with {} of {} candidates",
                max_draws,
                accepted.len(),
                target
            );
            report.exhausted = true;
        }
        accepted
    }

    /// Cached words become highlighted translations; everything else stays
    fn render(&self, words: &[String]) -> Vec<DisplayWord> {
        let cache = self.cache.read();
        words
            .iter()
            .map(|word| match cache.get(&word.to_lowercase()) {
                Some(translated) => {
                    let latin = self.transliterator.transliterate(translated);
                    if self.config.preserve_original_script {
                        DisplayWord::emphasis(format!("{latin}({translated})"))
                    } else {
                        DisplayWord::emphasis(latin)
                    }
                }
                None => DisplayWord::plain(word.clone()),
            })
            .collect()
    }
}
