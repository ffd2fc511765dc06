use font_core::{CategorySet, KeywordMatch, Mood};

use crate::terms::TermTable;

/// Resolves a mood label or a free-text prompt into target categories
#[derive(Debug, Clone, Default)]
pub struct MoodClassifier {
    terms: TermTable,
    matching: KeywordMatch,
}

impl MoodClassifier {
    pub fn new(terms: TermTable, matching: KeywordMatch) -> Self {
        Self { terms, matching }
    }

    /// A non-blank prompt wins over the mood. Without either, or when
    /// nothing matches, every category is allowed.
    pub fn classify(&self, mood: &str, prompt: &str) -> CategorySet {
        let prompt = prompt.trim();
        if !prompt.is_empty() {
            return self.classify_prompt(prompt);
        }

        match Mood::parse(mood) {
            Some(mood) => mood.categories(),
            None => CategorySet::all(),
        }
    }

    fn classify_prompt(&self, prompt: &str) -> CategorySet {
        let prompt = prompt.to_lowercase();
        let mut matched = CategorySet::empty();

        for token in prompt.split_whitespace() {
            for (keyword, categories) in self.terms.iter() {
                if self.matches(token, keyword) {
                    matched = matched.union(categories);
                }
            }
        }

        if matched.is_empty() {
            CategorySet::all()
        } else {
            matched
        }
    }

    fn matches(&self, token: &str, keyword: &str) -> bool {
        match self.matching {
            KeywordMatch::TokenContainsKeyword => token.contains(keyword),
            KeywordMatch::Bidirectional => token.contains(keyword) || keyword.contains(token),
            KeywordMatch::ExactToken => token.trim_matches(|c: char| !c.is_alphanumeric()) == keyword,
        }
    }
}
