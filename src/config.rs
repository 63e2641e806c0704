use crate::error::{DiglotError, Result};
use serde::{Deserialize, Serialize};

/// Seed used when the caller does not pick one, so word choice repeats run to run
pub const DEFAULT_SEED: u64 = 0x0D16_1075_EED5;

/// Reveal settings read from the caller's configuration source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Words per visit in fixed mode; ramp steepness in incremental mode (1-5)
    pub speed: u32,
    /// Scale reveals with page number instead of holding them constant
    pub incremental: bool,
    /// Render `transliterated(translated)` instead of the transliteration alone
    pub preserve_original_script: bool,
    /// Target language code handed to translators
    pub target_language: String,
    /// Incremental reveal count is `page / (ramp_base - speed)`
    pub ramp_base: u32,
    /// Words shorter than this (in chars) are never revealed
    pub min_word_len: usize,
    /// Draw budget per visit is `retry_factor * words on the page`
    pub retry_factor: usize,
    pub seed: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            speed: 1,
            incremental: false,
            preserve_original_script: false,
            target_language: "en".to_string(),
            ramp_base: 6,
            min_word_len: 3,
            retry_factor: 8,
            seed: DEFAULT_SEED,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.speed) {
            return Err(DiglotError::invalid(format!("speed must be 1-5, got {}", self.speed)));
        }
        if self.ramp_base <= self.speed {
            return Err(DiglotError::invalid(format!(
                "ramp base {} must exceed speed {}",
                self.ramp_base, self.speed
            )));
        }
        if self.target_language.trim().is_empty() {
            return Err(DiglotError::invalid("target language must not be empty"));
        }
        if self.retry_factor == 0 {
            return Err(DiglotError::invalid("retry factor must be positive"));
        }
        Ok(())
    }

    /// How many new words to reveal on `page_number`. Page 0 never reveals.
    pub fn reveal_count(&self, page_number: u32) -> usize {
        if page_number == 0 {
            return 0;
        }
        if !self.incremental {
            return self.speed as usize;
        }
        let divisor = self.ramp_base.saturating_sub(self.speed);
        if divisor == 0 {
            return 0;
        }
        (page_number / divisor) as usize
    }
}
