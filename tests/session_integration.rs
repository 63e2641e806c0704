// Reading session over real files: import, paginate, visit, stats
// WHY: Covers the path the CLI takes, including the blocking-pool reveal and the timed translator

use diglot::reader::read_words;
use diglot::{
    paginate, Book, Glossary, IdentityTransliterator, ReadingSession, RevealConfig, RevealEngine,
    SharedTranslationCache, TimedTranslator,
};
use std::sync::Arc;
use std::time::Duration;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{words, RecordingTranslator, TestFixture};

#[tokio::test(flavor = "multi_thread")]
async fn test_session_from_book_file_with_glossary() {
    let fixture = TestFixture::new();
    let book_path = fixture.create_book("tales/fox.txt", "The red fox\nran fast today\n");
    let glossary_path = fixture.create_glossary(
        "fr.json",
        &[
            ("fox", "renard"),
            ("red", "rouge"),
            ("ran", "courut"),
            ("fast", "vite"),
            ("today", "aujourd'hui"),
            ("the", "le"),
        ],
    );

    let book_words = read_words(&book_path).await.unwrap();
    assert_eq!(book_words, words("The red fox ran fast today"));

    let book = Book::new("fox", paginate(&book_words, 3).unwrap()).unwrap();
    let cache = SharedTranslationCache::new();
    let translator = TimedTranslator::new(
        Glossary::load(&glossary_path).await.unwrap(),
        cache.clone(),
        tokio::runtime::Handle::current(),
        Duration::from_secs(1),
    );
    // Generous draw budget: every word on these short pages must be found
    let config = RevealConfig { speed: 3, retry_factor: 64, ..Default::default() };
    let transliterator = Arc::new(IdentityTransliterator);
    let engine =
        RevealEngine::new(config, cache.clone(), Arc::new(translator), transliterator).unwrap();
    let mut session = ReadingSession::new(book, engine);

    let first = session.visit_current().await.unwrap();
    assert_eq!(first.translated, 3);
    assert_eq!(session.current_page().displayed_text(), vec!["le", "rouge", "renard"]);

    assert!(session.next());
    let second = session.visit_current().await.unwrap();
    assert_eq!(second.translated, 3);
    assert_eq!(session.current_page().displayed_text(), vec!["courut", "vite", "aujourd'hui"]);

    assert_eq!(cache.len(), 6);
    assert_eq!(session.stats().words_revealed, 6);
    assert_eq!(session.stats().translation_failures, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_revisit_keeps_earlier_reveals() {
    let book = Book::new("Loop", paginate(&words("alpha beta gamma delta"), 4).unwrap()).unwrap();
    let cache = SharedTranslationCache::new();
    let translator = RecordingTranslator::new(
        &cache,
        &[("alpha", "a1"), ("beta", "b1"), ("gamma", "g1"), ("delta", "d1")],
    );
    let config = RevealConfig { retry_factor: 64, ..Default::default() };
    let transliterator = Arc::new(IdentityTransliterator);
    let engine =
        RevealEngine::new(config, cache.clone(), translator.clone(), transliterator).unwrap();
    let mut session = ReadingSession::new(book, engine);

    let mut emphasized = Vec::new();
    for _ in 0..5 {
        session.visit_current().await.unwrap();
        let count = session
            .current_page()
            .displayed_words()
            .iter()
            .filter(|w| w.is_emphasis())
            .count();
        emphasized.push(count);
    }

    // One new word per visit until the pool runs dry
    assert_eq!(emphasized, vec![1, 2, 3, 4, 4]);
    assert_eq!(translator.calls().len(), 4);
    assert!(session.stats().page_stats[4].candidates_exhausted);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timed_out_words_are_per_word_failures() {
    use diglot::{AsyncTranslator, TranslationFailure};
    use futures::future::{BoxFuture, FutureExt};

    struct StallingTranslator;

    impl AsyncTranslator for StallingTranslator {
        fn translate<'a>(
            &'a self,
            word: &'a str,
        ) -> BoxFuture<'a, Result<String, TranslationFailure>> {
            async move {
                if word == "slow" {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                }
                Ok(format!("{word}-x"))
            }
            .boxed()
        }
    }

    let book = Book::new("Stall", paginate(&words("slow quick"), 2).unwrap()).unwrap();
    let cache = SharedTranslationCache::new();
    let translator = TimedTranslator::new(
        StallingTranslator,
        cache.clone(),
        tokio::runtime::Handle::current(),
        Duration::from_millis(50),
    );
    let config = RevealConfig { speed: 2, retry_factor: 64, ..Default::default() };
    let transliterator = Arc::new(IdentityTransliterator);
    let engine =
        RevealEngine::new(config, cache.clone(), Arc::new(translator), transliterator).unwrap();
    let mut session = ReadingSession::new(book, engine);

    let report = session.visit_current().await.unwrap();

    assert_eq!(report.translated, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].word, "slow");
    assert_eq!(session.current_page().displayed_text(), vec!["slow", "quick-x"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pages_revealed_concurrently_share_cache() {
    let text: Vec<String> = (0..40).map(|i| format!("term{i:02}")).collect();
    let pairs: Vec<(String, String)> = text.iter().map(|w| (w.clone(), w.to_uppercase())).collect();
    let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let cache = SharedTranslationCache::new();
    let translator = RecordingTranslator::new(&cache, &pairs);

    let pages = paginate(&text, 10).unwrap();
    let mut handles = Vec::new();
    for (i, mut page) in pages.into_iter().enumerate() {
        let config = RevealConfig { speed: 3, seed: i as u64, ..Default::default() };
        let transliterator = Arc::new(IdentityTransliterator);
        let mut engine =
            RevealEngine::new(config, cache.clone(), translator.clone(), transliterator)
                .unwrap();
        handles.push(tokio::task::spawn_blocking(move || {
            let report = engine.execute(&mut page).unwrap();
            (page, report)
        }));
    }

    let mut total = 0;
    for handle in handles {
        let (page, report) = handle.await.unwrap();
        assert_eq!(report.translated, 3);
        assert!(page.is_translated());
        total += report.translated;
    }
    assert_eq!(total, 12);
    assert_eq!(cache.len(), 12);
}
