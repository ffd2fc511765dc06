use std::sync::Arc;

use font_catalog::CatalogSource;
use font_core::{
    FontDescriptor, KeywordMatch, PairingConfig, Recommendation, SelectedFont, SortOrder,
    MAX_RECOMMENDATIONS,
};
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::classifier::MoodClassifier;
use crate::fallback::fallback_for;
use crate::filter::filter_candidates;
use crate::ranker::{rank, RoleNeeds};
use crate::roles::{chance_for, DeterministicChance, PairingContext, RoleAssigner, RoleChance};
use crate::terms::TermTable;

/// Everything one recommendation call looks at besides the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Mood label; unrecognized labels mean no mood
    pub mood: String,
    /// Free-text style prompt; overrides the mood when non-blank
    pub prompt: String,
    /// Fonts already on the board
    pub selection: Vec<SelectedFont>,
}

impl RecommendationRequest {
    pub fn new(mood: impl Into<String>, prompt: impl Into<String>, selection: Vec<SelectedFont>) -> Self {
        Self {
            mood: mood.into(),
            prompt: prompt.into(),
            selection,
        }
    }
}

/// Turns (mood or prompt, selection, catalog) into a short ranked list of
/// fonts annotated with the roles they suit
pub struct RecommendationEngine {
    source: Arc<dyn CatalogSource>,
    classifier: MoodClassifier,
    chance: Box<dyn RoleChance>,
    sort: SortOrder,
    limit: usize,
}

impl RecommendationEngine {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            classifier: MoodClassifier::default(),
            chance: Box::new(DeterministicChance),
            sort: SortOrder::Popularity,
            limit: MAX_RECOMMENDATIONS,
        }
    }

    pub fn from_config(source: Arc<dyn CatalogSource>, config: &PairingConfig) -> Self {
        Self {
            source,
            classifier: MoodClassifier::new(TermTable::builtin(), config.keyword_match),
            chance: chance_for(config.role_chance, config.seed),
            sort: config.sort_order,
            limit: config.recommendation_limit(),
        }
    }

    pub fn with_chance(mut self, chance: Box<dyn RoleChance>) -> Self {
        self.chance = chance;
        self
    }

    pub fn with_terms(mut self, terms: TermTable, matching: KeywordMatch) -> Self {
        self.classifier = MoodClassifier::new(terms, matching);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_RECOMMENDATIONS);
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the catalog and recommend from it. A catalog failure is not
    /// reported; the mood's canned list is returned instead.
    pub async fn recommend(&self, mood: &str, selection: &[SelectedFont], prompt: &str) -> Vec<Recommendation> {
        match self.source.fetch_catalog(self.sort).await {
            Ok(catalog) => self.recommend_from_catalog(&catalog, mood, selection, prompt),
            Err(e) => {
                warn!(source = self.source.name(), error = %e, mood, "catalog unavailable, using fallback recommendations");
                self.fallback(mood, selection)
            }
        }
    }

    pub async fn recommend_request(&self, request: &RecommendationRequest) -> Vec<Recommendation> {
        self.recommend(&request.mood, &request.selection, &request.prompt).await
    }

    /// Classify, filter, assign roles and rank against a catalog already in hand
    pub fn recommend_from_catalog(
        &self,
        catalog: &[FontDescriptor],
        mood: &str,
        selection: &[SelectedFont],
        prompt: &str,
    ) -> Vec<Recommendation> {
        let categories = self.classifier.classify(mood, prompt);
        let candidates = filter_candidates(catalog, categories, selection);
        debug!(%categories, catalog = catalog.len(), candidates = candidates.len(), "filtered catalog");

        let context = PairingContext::from_selection(selection);
        let assigner = RoleAssigner::new(self.chance.as_ref());
        let recommendations = candidates
            .into_iter()
            .map(|font| {
                let roles = assigner.assign(&font, &context);
                Recommendation::new(font, roles)
            })
            .collect();

        rank(recommendations, RoleNeeds::from_selection(selection), self.limit)
    }

    /// Canned list for the mood, minus anything already selected
    pub fn fallback(&self, mood: &str, selection: &[SelectedFont]) -> Vec<Recommendation> {
        let mut recommendations = fallback_for(mood);
        recommendations.retain(|rec| !selection.iter().any(|selected| selected.family == rec.font.family));
        recommendations.truncate(self.limit);
        recommendations
    }
}
