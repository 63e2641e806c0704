use crate::error::{DiglotError, Result};
use crate::page::{DisplayWord, Page};
use tracing::debug;

/// An ordered collection of pages with a reading cursor
#[derive(Debug, Clone)]
pub struct Book {
    title: String,
    pages: Vec<Page>,
    current_page_number: u32,
}

impl Book {
    /// Build a book from pages in any order. Pages are sorted by number and
    /// the cursor starts on the lowest page.
    pub fn new(title: impl Into<String>, mut pages: Vec<Page>) -> Result<Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(DiglotError::invalid("book title must not be empty"));
        }
        if pages.is_empty() {
            return Err(DiglotError::invalid(format!("book {title:?} has no pages")));
        }

        pages.sort_by_key(Page::page_number);
        if let Some(dup) = pages.windows(2).find(|w| w[0].page_number() == w[1].page_number()) {
            return Err(DiglotError::invalid(format!(
                "book {title:?} has two pages numbered {}",
                dup[0].page_number()
            )));
        }
        let current_page_number = pages[0].page_number();
        debug!(
            "Built book {:?} with {} pages, starting at page {}",
            title,
            pages.len(),
            current_page_number
        );

        Ok(Self {
            title,
            pages,
            current_page_number,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page_number(&self) -> u32 {
        self.current_page_number
    }

    pub fn first_page_number(&self) -> u32 {
        self.pages[0].page_number()
    }

    pub fn last_page_number(&self) -> u32 {
        self.pages[self.pages.len() - 1].page_number()
    }

    /// All pages, ascending by page number
    pub fn get_all_pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn get_page(&self, page_number: u32) -> Result<&Page> {
        self.index_of(page_number)
            .map(|idx| &self.pages[idx])
            .ok_or(DiglotError::NotFound { page_number })
    }

    pub fn get_current_page(&self) -> &Page {
        // Cursor is only ever set to a number that exists
        let idx = self.index_of(self.current_page_number).unwrap_or(0);
        &self.pages[idx]
    }

    /// Swap the displayed view of one page. Page numbers and original
    /// words are fixed once the book is built, so this is the only write.
    pub fn replace_displayed(&mut self, page_number: u32, words: Vec<DisplayWord>) -> Result<()> {
        let idx = self.index_of(page_number).ok_or(DiglotError::NotFound { page_number })?;
        self.pages[idx].replace_displayed(words)
    }

    /// Move the cursor to `page_number`; state is untouched on failure
    pub fn go_to_page(&mut self, page_number: u32) -> Result<()> {
        if self.index_of(page_number).is_none() {
            return Err(DiglotError::NotFound { page_number });
        }
        self.current_page_number = page_number;
        Ok(())
    }

    /// Advance to `current + 1` if that exact page exists. On a numbering
    /// gap this does nothing, so sparse books stall here.
    pub fn next_page(&mut self) {
        if let Some(next) = self.current_page_number.checked_add(1) {
            if self.index_of(next).is_some() {
                self.current_page_number = next;
            }
        }
    }

    /// Step back to `current - 1` if that exact page exists
    pub fn previous_page(&mut self) {
        if let Some(prev) = self.current_page_number.checked_sub(1) {
            if self.index_of(prev).is_some() {
                self.current_page_number = prev;
            }
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page_number
            .checked_add(1)
            .is_some_and(|n| self.index_of(n).is_some())
    }

    pub fn has_previous(&self) -> bool {
        self.current_page_number
            .checked_sub(1)
            .is_some_and(|n| self.index_of(n).is_some())
    }

    fn index_of(&self, page_number: u32) -> Option<usize> {
        self.pages
            .binary_search_by_key(&page_number, Page::page_number)
            .ok()
    }
}
