use anyhow::Result;
use clap::Parser;
use diglot::reader::{AsyncWordReader, ReaderConfig};
use diglot::{
    paginate, Book, CyrillicTransliterator, Glossary, IdentityTransliterator, Page, ReadingSession,
    RevealConfig, RevealEngine, SharedTranslationCache, TimedTranslator, Transliterator, WordKind,
    DEFAULT_SEED,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "diglot")]
#[command(about = "Read a plain text book with foreign vocabulary revealed page by page")]
#[command(version)]
struct Args {
    /// UTF-8 plain text book to read
    book: PathBuf,

    /// Words per page
    #[arg(long, default_value_t = 250)]
    page_size: usize,

    /// Reveal speed, 1-5
    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Ramp the reveal rate up with page number
    #[arg(long)]
    incremental: bool,

    /// Show translations in their own script next to the transliteration
    #[arg(long)]
    preserve_original_script: bool,

    /// Incremental reveal count is page / (ramp base - speed)
    #[arg(long, default_value_t = 6)]
    ramp_base: u32,

    /// Target language code
    #[arg(long, default_value = "en")]
    target_language: String,

    /// JSON object mapping source words to translations
    #[arg(long)]
    glossary: Option<PathBuf>,

    /// Seed for word selection
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Stop after this many pages
    #[arg(long)]
    pages: Option<usize>,

    /// Per-word translation deadline
    #[arg(long, default_value_t = 2000)]
    translate_timeout_ms: u64,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Session stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

/// Presentation for a terminal: revealed words wrapped in `*`
fn render_page(page: &Page) -> String {
    page.displayed_words()
        .iter()
        .map(|w| match w.kind {
            WordKind::Emphasis => format!("*{}*", w.text),
            WordKind::Plain => w.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn transliterator_for(target_language: &str) -> Arc<dyn Transliterator> {
    match target_language {
        "ru" | "uk" | "bg" | "sr" | "mk" | "be" => Arc::new(CyrillicTransliterator),
        _ => Arc::new(IdentityTransliterator),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr; stdout carries the rendered pages
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting diglot");
    info!(?args, "Parsed CLI arguments");

    if !args.book.is_file() {
        anyhow::bail!("Book file does not exist: {}", args.book.display());
    }

    let config = RevealConfig {
        speed: args.speed,
        incremental: args.incremental,
        preserve_original_script: args.preserve_original_script,
        target_language: args.target_language.clone(),
        ramp_base: args.ramp_base,
        seed: args.seed,
        ..Default::default()
    };
    config.validate()?;

    let reader = AsyncWordReader::new(ReaderConfig::default());
    let (words, read_stats) = reader.read_words(&args.book).await?;
    let pages = paginate(&words, args.page_size)?;
    if pages.is_empty() {
        anyhow::bail!("Book has no words: {}", args.book.display());
    }

    let title = args
        .book
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();
    let book = Book::new(title, pages)?;
    info!(
        "Imported {} words from {} into {} pages",
        read_stats.words_read,
        read_stats.file_path,
        book.page_count()
    );

    let glossary = match &args.glossary {
        Some(path) => Glossary::load(path).await?,
        None => Glossary::default(),
    };
    if glossary.is_empty() {
        info!("No glossary entries loaded; pages will render untranslated");
    }

    let cache = SharedTranslationCache::new();
    let translator = TimedTranslator::new(
        glossary,
        cache.clone(),
        tokio::runtime::Handle::current(),
        Duration::from_millis(args.translate_timeout_ms),
    );
    let engine = RevealEngine::new(
        config,
        cache,
        Arc::new(translator),
        transliterator_for(&args.target_language),
    )?;
    let mut session = ReadingSession::new(book, engine);

    let page_limit = args.pages.unwrap_or(usize::MAX).min(session.book().page_count());
    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(page_limit as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} pages {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    for visited in 0..page_limit {
        let report = session.visit_current().await?;
        progress.suspend(|| {
            println!("--- page {} ---", report.page_number);
            println!("{}", render_page(session.current_page()));
        });
        progress.set_message(format!("{} words revealed", session.stats().words_revealed));
        progress.inc(1);

        if visited + 1 < page_limit && !session.next() {
            info!("Stopped at page {}: no next page", session.book().current_page_number());
            break;
        }
    }
    progress.finish_and_clear();

    let stats = session.stats();
    println!(
        "Visited {} pages, revealed {} words, {} translation failures",
        stats.pages_visited, stats.words_revealed, stats.translation_failures
    );

    if let Some(stats_out) = &args.stats_out {
        session.write_stats(stats_out).await?;
    }

    Ok(())
}
