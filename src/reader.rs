use crate::paginator::words_from_text;
use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for book text import
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Abort on a decoding error instead of keeping the words read so far
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one text import
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub words_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Streams a UTF-8 plain text book line by line and splits it into words
pub struct AsyncWordReader {
    config: ReaderConfig,
}

impl AsyncWordReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read every word of the file in order, with import statistics
    pub async fn read_words<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of book: {}", path.display());

        // Open errors propagate regardless of fail_fast
        let file = File::open(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open book {}: {}", path.display(), e))?;

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut words = Vec::new();
        let mut line_count = 0u64;
        let mut byte_count = 0u64;
        let mut read_error = None;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    byte_count += line.len() as u64 + 1; // +1 for newline
                    line_count += 1;
                    words.extend(words_from_text(&line));
                }
                Ok(None) => break,
                Err(e) => {
                    let error_msg = format!(
                        "UTF-8 decoding error in {} at line {}: {}",
                        path.display(),
                        line_count + 1,
                        e
                    );
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Err(anyhow::anyhow!(error_msg));
                    }
                    // Keep the words read so far
                    read_error = Some(error_msg);
                    break;
                }
            }
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: line_count,
            words_read: words.len() as u64,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error,
        };

        info!(
            "Read {}: {} lines, {} words, {} bytes in {}ms",
            path.display(),
            stats.lines_read,
            stats.words_read,
            stats.bytes_read,
            stats.duration_ms
        );
        Ok((words, stats))
    }
}

/// Convenience function for reading a book's words with default configuration
pub async fn read_words<P: AsRef<Path>>(file_path: P) -> Result<Vec<String>> {
    let reader = AsyncWordReader::new(ReaderConfig::default());
    let (words, _stats) = reader.read_words(file_path).await?;
    Ok(words)
}
