// WHY: Splitting is kept separate from Book so imports of any source format
// reduce to a flat word list before pages exist

use crate::error::{DiglotError, Result};
use crate::page::Page;
use tracing::debug;

/// Split `words` into pages of `max_words_per_page`, numbered from 1.
/// The last page may be shorter. No words means no pages.
pub fn paginate<S: AsRef<str>>(words: &[S], max_words_per_page: usize) -> Result<Vec<Page>> {
    if max_words_per_page == 0 {
        return Err(DiglotError::invalid("words per page must be positive"));
    }

    let mut pages = Vec::with_capacity(words.len().div_ceil(max_words_per_page));
    for (idx, chunk) in words.chunks(max_words_per_page).enumerate() {
        let page_number = u32::try_from(idx + 1)
            .map_err(|_| DiglotError::invalid("too many pages for u32 page numbers"))?;
        let chunk_words = chunk.iter().map(|w| w.as_ref().to_string()).collect();
        pages.push(Page::new(page_number, max_words_per_page, chunk_words)?);
    }

    debug!(
        "Paginated {} words into {} pages of up to {}",
        words.len(),
        pages.len(),
        max_words_per_page
    );
    Ok(pages)
}

/// Break plain text into words on any Unicode whitespace, including
/// `\r\n` and `\n` line breaks
pub fn words_from_text(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Tokenize and paginate in one step
pub fn paginate_text(text: &str, max_words_per_page: usize) -> Result<Vec<Page>> {
    paginate(&words_from_text(text), max_words_per_page)
}
