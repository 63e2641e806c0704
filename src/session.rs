// WHY: Reveal passes call translators that may block on the network, so a session
// runs them on the blocking pool and hands the rewritten page back to the book

use crate::book::Book;
use crate::page::Page;
use crate::reveal::{RevealEngine, RevealReport};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Per-visit statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageStats {
    pub page_number: u32,
    pub words_requested: usize,
    pub words_translated: usize,
    pub words_failed: usize,
    pub draws: usize,
    pub candidates_exhausted: bool,
    pub processing_time_ms: u64,
}

/// Aggregate statistics for a reading session
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SessionStats {
    pub title: String,
    /// Unix timestamp of session start
    pub run_start: u64,
    pub pages_visited: u64,
    pub words_revealed: u64,
    pub translation_failures: u64,
    pub cache_size: usize,
    pub page_stats: Vec<PageStats>,
}

/// A book being read with one reveal engine and its translation cache
pub struct ReadingSession {
    book: Book,
    engine: Arc<Mutex<RevealEngine>>,
    stats: SessionStats,
}

impl ReadingSession {
    pub fn new(book: Book, engine: RevealEngine) -> Self {
        let run_start = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let stats = SessionStats {
            title: book.title().to_string(),
            run_start,
            ..Default::default()
        };
        Self {
            book,
            engine: Arc::new(Mutex::new(engine)),
            stats,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn current_page(&self) -> &Page {
        self.book.get_current_page()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Move forward one page; false when there is no `current + 1` page
    pub fn next(&mut self) -> bool {
        let before = self.book.current_page_number();
        self.book.next_page();
        self.book.current_page_number() != before
    }

    /// Move back one page; false when there is no `current - 1` page
    pub fn previous(&mut self) -> bool {
        let before = self.book.current_page_number();
        self.book.previous_page();
        self.book.current_page_number() != before
    }

    pub fn go_to(&mut self, page_number: u32) -> Result<()> {
        self.book.go_to_page(page_number)?;
        Ok(())
    }

    /// Run a reveal pass on the current page off the async worker threads.
    ///
    /// The engine lock keeps two passes from sharing the sampler at once.
    /// The pass runs on a copy of the page and only its displayed view is
    /// written back to the book.
    pub async fn visit_current(&mut self) -> Result<RevealReport> {
        let start_time = std::time::Instant::now();
        let mut page = self.book.get_current_page().clone();
        let engine = Arc::clone(&self.engine);

        let (page, report) = tokio::task::spawn_blocking(move || -> Result<(Page, RevealReport)> {
            let mut engine = engine
                .lock()
                .map_err(|_| anyhow::anyhow!("reveal engine lock poisoned by an earlier pass"))?;
            let report = engine.execute(&mut page)?;
            Ok((page, report))
        })
        .await??;

        self.book
            .replace_displayed(page.page_number(), page.displayed_words().to_vec())?;

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        self.record(&report, processing_time_ms);
        debug!("Visited page {} in {}ms", report.page_number, processing_time_ms);
        Ok(report)
    }

    fn record(&mut self, report: &RevealReport, processing_time_ms: u64) {
        self.stats.pages_visited += 1;
        self.stats.words_revealed += report.translated as u64;
        self.stats.translation_failures += report.failures.len() as u64;
        self.stats.cache_size = match self.engine.lock() {
            Ok(engine) => engine.cache().len(),
            Err(_) => self.stats.cache_size,
        };
        self.stats.page_stats.push(PageStats {
            page_number: report.page_number,
            words_requested: report.requested,
            words_translated: report.translated,
            words_failed: report.failures.len(),
            draws: report.draws,
            candidates_exhausted: report.exhausted,
            processing_time_ms,
        });
    }

    /// Write session statistics as pretty JSON
    pub async fn write_stats(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.stats)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        info!("Wrote session stats to {}", path.display());
        Ok(())
    }
}
