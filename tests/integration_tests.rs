// tests/integration_tests.rs
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use font_cache::CachedCatalog;
use font_catalog::{CatalogSource, StaticCatalog};
use font_core::{Category, FontDescriptor, FontError, FontResult, Recommendation, Role, SelectedFont, SortOrder};
use font_pairing::{fallback_for, RecommendationEngine};
use font_session::{ArticleSlots, Dispatch, FontBoard, RecommendationDispatcher};

/// Wraps a catalog, counting fetches and failing on demand
struct Upstream {
    inner: StaticCatalog,
    fetches: AtomicUsize,
    down: AtomicBool,
}

impl Upstream {
    fn new(fonts: Vec<FontDescriptor>) -> Arc<Self> {
        Arc::new(Self {
            inner: StaticCatalog::new("upstream", fonts),
            fetches: AtomicUsize::new(0),
            down: AtomicBool::new(false),
        })
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for Upstream {
    fn name(&self) -> &str {
        "upstream"
    }

    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(FontError::CatalogUnavailable("upstream is down".to_string()));
        }
        self.inner.fetch_catalog(sort).await
    }
}

fn popular_engine() -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(StaticCatalog::popular()))
}

fn families(recs: &[Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.family()).collect()
}

#[tokio::test]
async fn test_elegant_mood_yields_only_serifs() {
    let recs = popular_engine().recommend("elegant", &[], "").await;

    assert_eq!(families(&recs), vec!["Merriweather", "Playfair Display", "Lora", "PT Serif", "Roboto Slab"]);
    assert!(recs.iter().all(|r| r.category() == Category::Serif));
}

#[tokio::test]
async fn test_creative_mood_ranks_heading_candidates_first() {
    let recs = popular_engine().recommend("creative", &[], "").await;

    assert_eq!(
        families(&recs),
        vec!["Pacifico", "Permanent Marker", "Dancing Script", "Caveat", "Amatic SC"]
    );
    assert!(recs[0].recommended_roles.contains(Role::Heading));
    assert!(!recs[2].recommended_roles.contains(Role::Heading));
}

#[tokio::test]
async fn test_prompt_overrides_mood() {
    let recs = popular_engine().recommend("professional", &[], "playful and fun for kids").await;

    assert!(!recs.is_empty());
    for rec in &recs {
        assert!(
            matches!(rec.category(), Category::Handwriting | Category::Display),
            "{} is {}",
            rec.family(),
            rec.category()
        );
    }
}

#[tokio::test]
async fn test_unmatched_prompt_is_unfiltered() {
    let recs = popular_engine().recommend("elegant", &[], "xyzzyqwerty").await;

    assert_eq!(recs.len(), 5);
    assert!(recs.iter().any(|r| r.category() != Category::Serif));
}

#[tokio::test]
async fn test_never_recommends_selected_or_duplicate_families() {
    let selection = vec![
        SelectedFont::new("Lora", Category::Serif, Role::Heading, 48),
        SelectedFont::new("Merriweather", Category::Serif, Role::Body, 16),
    ];
    let engine = popular_engine();

    for mood in ["elegant", "professional", "modern", "creative", "playful", "unknown"] {
        let recs = engine.recommend(mood, &selection, "").await;
        assert!(recs.len() <= 5);

        let unique: HashSet<_> = recs.iter().map(|r| r.family()).collect();
        assert_eq!(unique.len(), recs.len(), "duplicate family for {}", mood);
        assert!(!unique.contains("Lora") && !unique.contains("Merriweather"));
    }
}

#[tokio::test]
async fn test_unreachable_catalog_falls_back_to_mood_list() {
    let upstream = Upstream::new(Vec::new());
    upstream.down.store(true, Ordering::SeqCst);
    let engine = RecommendationEngine::new(upstream.clone());

    for mood in ["professional", "creative", "elegant", "playful", "modern"] {
        let recs = engine.recommend(mood, &[], "").await;
        assert_eq!(recs, fallback_for(mood));
    }
    assert!(engine.recommend("", &[], "").await.is_empty());
}

#[tokio::test]
async fn test_cached_catalog_serves_repeat_calls() {
    let upstream = Upstream::new(StaticCatalog::popular().fonts().to_vec());
    let cache = Arc::new(CachedCatalog::new(upstream.clone(), Duration::from_secs(60)));
    let engine = RecommendationEngine::new(cache.clone());

    let first = engine.recommend("modern", &[], "").await;
    let second = engine.recommend("modern", &[], "").await;
    assert_eq!(first, second);
    assert_eq!(upstream.fetches(), 1);

    cache.invalidate();
    engine.recommend("modern", &[], "").await;
    assert_eq!(upstream.fetches(), 2);
    assert_eq!(cache.stats().hits, 1);
}

#[tokio::test]
async fn test_disk_snapshot_outlives_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let fonts = vec![
        FontDescriptor::new("Lora", Category::Serif),
        FontDescriptor::new("Roboto", Category::SansSerif),
    ];

    let upstream = Upstream::new(fonts);
    let warm = CachedCatalog::new(upstream.clone(), Duration::from_secs(60))
        .with_disk_snapshot(dir.path())
        .unwrap();
    warm.fetch_catalog(SortOrder::Popularity).await.unwrap();

    // a fresh cache over a dead upstream still has the snapshot
    upstream.down.store(true, Ordering::SeqCst);
    let cold = CachedCatalog::new(upstream.clone(), Duration::from_secs(60))
        .with_disk_snapshot(dir.path())
        .unwrap();
    let engine = RecommendationEngine::new(Arc::new(cold));

    let recs = engine.recommend("elegant", &[], "").await;
    assert_eq!(families(&recs), vec!["Lora"]);
}

#[tokio::test]
async fn test_board_session_round_trip() {
    let engine = Arc::new(popular_engine());
    let dispatcher = RecommendationDispatcher::new(engine);
    let mut board = FontBoard::starter();

    // serif heading on the board pushes sans candidates to body
    let request = board.set_mood("modern");
    let recs = dispatcher.dispatch(request).await.fresh().unwrap();
    assert_eq!(
        families(&recs),
        vec!["Roboto", "Lato", "Montserrat", "Roboto Condensed", "Source Sans Pro"]
    );
    assert!(recs.iter().all(|r| r.recommended_roles.contains(Role::Body)));

    // adopting reruns the board's request with the new font on it
    let request = board.adopt(&recs[0], Role::Accent).unwrap();
    let adopted = &board.selection()[2];
    assert_eq!((adopted.family.as_str(), adopted.role, adopted.size), ("Roboto", Role::Accent, 24));

    let slots = ArticleSlots::resolve(board.selection()).unwrap();
    assert_eq!(slots.heading.family, "Playfair Display");
    assert_eq!(slots.body.family, "Open Sans");
    assert_eq!(slots.caption.family, "Open Sans");

    let recs = dispatcher.dispatch(request).await.fresh().unwrap();
    assert_eq!(recs.len(), 5);
    assert!(!families(&recs).contains(&"Roboto"));

    board.remove_font(2).unwrap();
    board.remove_font(1).unwrap();
    assert!(board.remove_font(0).unwrap().is_none());
}

#[tokio::test]
async fn test_newest_request_wins() {
    struct Slow(StaticCatalog);

    #[async_trait]
    impl CatalogSource for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
            tokio::time::sleep(Duration::from_millis(150)).await;
            self.0.fetch_catalog(sort).await
        }
    }

    let engine = RecommendationEngine::new(Arc::new(Slow(StaticCatalog::popular())));
    let dispatcher = Arc::new(RecommendationDispatcher::new(Arc::new(engine)));
    let mut board = FontBoard::new();

    let stale = dispatcher.spawn(board.set_mood("elegant"));
    tokio::time::sleep(Duration::from_millis(20)).await;
    let latest = dispatcher.dispatch(board.set_prompt("retro").unwrap()).await;

    assert_eq!(stale.await.unwrap(), Dispatch::Superseded);
    let recs = latest.fresh().unwrap();
    assert!(recs.iter().all(|r| r.category() == Category::Display));
}
