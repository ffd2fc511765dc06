use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use font_core::Recommendation;
use font_pairing::{RecommendationEngine, RecommendationRequest};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Outcome of one dispatched recommendation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Result of the newest request
    Fresh(Vec<Recommendation>),
    /// A newer request started before this one finished
    Superseded,
}

impl Dispatch {
    pub fn fresh(self) -> Option<Vec<Recommendation>> {
        match self {
            Dispatch::Fresh(recommendations) => Some(recommendations),
            Dispatch::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Dispatch::Superseded)
    }
}

/// Runs recommendation requests so that only the newest one is live.
///
/// Each dispatch takes a new generation and cancels the previous one's token.
/// A result is only delivered as fresh if its generation is still current
/// when it completes.
pub struct RecommendationDispatcher {
    engine: Arc<RecommendationEngine>,
    generation: AtomicU64,
    live: Mutex<CancellationToken>,
}

impl RecommendationDispatcher {
    pub fn new(engine: Arc<RecommendationEngine>) -> Self {
        Self {
            engine,
            generation: AtomicU64::new(0),
            live: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cancel whatever is in flight without starting anything new
    pub fn cancel(&self) {
        let mut live = self.live.lock();
        live.cancel();
        *live = CancellationToken::new();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let mut live = self.live.lock();
        live.cancel();
        let token = CancellationToken::new();
        *live = token.clone();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, token)
    }

    pub async fn dispatch(&self, request: RecommendationRequest) -> Dispatch {
        let (generation, token) = self.begin();

        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            recommendations = self.engine.recommend_request(&request) => Some(recommendations),
        };

        match outcome {
            Some(recommendations) if self.current_generation() == generation => Dispatch::Fresh(recommendations),
            _ => {
                debug!(generation, current = self.current_generation(), "discarding superseded recommendations");
                Dispatch::Superseded
            }
        }
    }

    /// `dispatch` on a background task
    pub fn spawn(self: &Arc<Self>, request: RecommendationRequest) -> JoinHandle<Dispatch> {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move { dispatcher.dispatch(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use font_catalog::{CatalogSource, StaticCatalog};
    use font_core::{Category, FontDescriptor, FontResult, SortOrder};
    use std::time::Duration;

    struct SlowCatalog {
        delay: Duration,
        inner: StaticCatalog,
    }

    #[async_trait]
    impl CatalogSource for SlowCatalog {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
            tokio::time::sleep(self.delay).await;
            self.inner.fetch_catalog(sort).await
        }
    }

    fn dispatcher(delay: Duration) -> Arc<RecommendationDispatcher> {
        let catalog = SlowCatalog {
            delay,
            inner: StaticCatalog::new("test", vec![
                FontDescriptor::new("Lora", Category::Serif),
                FontDescriptor::new("Caveat", Category::Handwriting),
            ]),
        };
        let engine = RecommendationEngine::new(Arc::new(catalog));
        Arc::new(RecommendationDispatcher::new(Arc::new(engine)))
    }

    #[tokio::test]
    async fn sequential_requests_are_fresh() {
        let dispatcher = dispatcher(Duration::ZERO);

        let first = dispatcher.dispatch(RecommendationRequest::new("elegant", "", vec![])).await;
        let second = dispatcher.dispatch(RecommendationRequest::new("playful", "", vec![])).await;

        assert_eq!(first.fresh().unwrap()[0].family(), "Lora");
        assert_eq!(second.fresh().unwrap()[0].family(), "Caveat");
        assert_eq!(dispatcher.current_generation(), 2);
    }

    #[tokio::test]
    async fn newer_request_supersedes_older() {
        let dispatcher = dispatcher(Duration::from_millis(200));

        let stale = dispatcher.spawn(RecommendationRequest::new("elegant", "", vec![]));
        tokio::time::sleep(Duration::from_millis(20)).await;
        let current = dispatcher.dispatch(RecommendationRequest::new("playful", "", vec![])).await;

        assert!(stale.await.unwrap().is_superseded());
        assert_eq!(current.fresh().unwrap()[0].family(), "Caveat");
    }

    #[tokio::test]
    async fn cancel_drops_in_flight_request() {
        let dispatcher = dispatcher(Duration::from_millis(200));

        let pending = dispatcher.spawn(RecommendationRequest::new("elegant", "", vec![]));
        tokio::time::sleep(Duration::from_millis(20)).await;
        dispatcher.cancel();

        assert!(pending.await.unwrap().is_superseded());
    }
}
