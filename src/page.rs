use crate::error::{DiglotError, Result};
use serde::{Deserialize, Serialize};

/// How a displayed word should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordKind {
    /// Native text, shown as-is
    Plain,
    /// Revealed foreign word, shown highlighted
    Emphasis,
}

/// One word of a page's displayed view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWord {
    pub kind: WordKind,
    pub text: String,
}

impl DisplayWord {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { kind: WordKind::Plain, text: text.into() }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self { kind: WordKind::Emphasis, text: text.into() }
    }

    pub fn is_emphasis(&self) -> bool {
        self.kind == WordKind::Emphasis
    }
}

/// A fixed-capacity run of words with an original and a displayed view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    page_number: u32,
    max_words: usize,
    original_words: Vec<String>,
    displayed_words: Vec<DisplayWord>,
}

impl Page {
    /// Build a page; the displayed view starts equal to the original words.
    /// Page number 0 is allowed and marks front matter that never reveals.
    pub fn new(page_number: u32, max_words: usize, words: Vec<String>) -> Result<Self> {
        if max_words == 0 {
            return Err(DiglotError::invalid("page capacity must be positive"));
        }
        if words.is_empty() {
            return Err(DiglotError::invalid(format!("page {page_number} has no words")));
        }
        if words.len() > max_words {
            return Err(DiglotError::invalid(format!(
                "page {page_number} has {} words, capacity is {max_words}",
                words.len()
            )));
        }

        let displayed_words = words.iter().map(DisplayWord::plain).collect();
        Ok(Self {
            page_number,
            max_words,
            original_words: words,
            displayed_words,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn original_words(&self) -> &[String] {
        &self.original_words
    }

    pub fn displayed_words(&self) -> &[DisplayWord] {
        &self.displayed_words
    }

    /// Displayed view with presentation markers stripped
    pub fn displayed_text(&self) -> Vec<&str> {
        self.displayed_words.iter().map(|w| w.text.as_str()).collect()
    }

    /// Replace the whole displayed view. Partial edits are not supported.
    pub fn replace_displayed(&mut self, words: Vec<DisplayWord>) -> Result<()> {
        if words.len() > self.max_words {
            return Err(DiglotError::invalid(format!(
                "displayed view of page {} has {} words, capacity is {}",
                self.page_number,
                words.len(),
                self.max_words
            )));
        }
        self.displayed_words = words;
        Ok(())
    }

    /// True once the displayed view differs from the original, order and
    /// duplicates included
    pub fn is_translated(&self) -> bool {
        self.displayed_words.len() != self.original_words.len()
            || self
                .displayed_words
                .iter()
                .zip(&self.original_words)
                .any(|(shown, original)| shown.kind != WordKind::Plain || &shown.text != original)
    }
}
