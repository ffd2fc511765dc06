use font_core::{Category, CategorySet};

use Category::*;

/// Style and mood keywords mapped to the categories they suggest
const BUILTIN_TERMS: &[(&str, &[Category])] = &[
    // Professional/Business
    ("professional", &[SansSerif, Serif]),
    ("business", &[SansSerif, Serif]),
    ("corporate", &[SansSerif]),
    ("formal", &[Serif]),
    ("serious", &[Serif, SansSerif]),
    // Creative
    ("creative", &[Display, Handwriting]),
    ("artistic", &[Display, Handwriting]),
    ("unique", &[Display]),
    ("expressive", &[Handwriting, Display]),
    // Elegant/Luxury
    ("elegant", &[Serif]),
    ("luxury", &[Serif]),
    ("sophisticated", &[Serif]),
    ("classy", &[Serif]),
    ("premium", &[Serif]),
    // Playful
    ("playful", &[Handwriting, Display]),
    ("fun", &[Handwriting, Display]),
    ("casual", &[Handwriting]),
    ("friendly", &[Handwriting]),
    ("childlike", &[Handwriting]),
    ("kids", &[Handwriting, Display]),
    // Modern
    ("modern", &[SansSerif]),
    ("minimal", &[SansSerif]),
    ("clean", &[SansSerif]),
    ("tech", &[SansSerif]),
    ("digital", &[SansSerif]),
    ("futuristic", &[SansSerif]),
    // Vintage/Retro
    ("vintage", &[Serif, Display]),
    ("retro", &[Display]),
    ("classic", &[Serif]),
    ("old", &[Serif]),
    ("traditional", &[Serif]),
    // Emotional
    ("happy", &[Handwriting, Display]),
    ("sad", &[Serif]),
    ("romantic", &[Handwriting, Serif]),
    ("bold", &[SansSerif, Display]),
    ("strong", &[SansSerif]),
    ("delicate", &[Serif, Handwriting]),
    ("soft", &[Handwriting]),
    // Industry
    ("fashion", &[Serif, Display]),
    ("food", &[Handwriting, Display]),
    ("travel", &[SansSerif, Handwriting]),
    ("education", &[Serif, SansSerif]),
    ("health", &[SansSerif]),
    ("finance", &[SansSerif, Serif]),
    ("sports", &[SansSerif, Display]),
    ("music", &[Display, Handwriting]),
    ("art", &[Display, Handwriting]),
];

/// Keyword to category lookup used by the prompt classifier
#[derive(Debug, Clone)]
pub struct TermTable {
    entries: Vec<(String, CategorySet)>,
}

impl TermTable {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_TERMS.iter().map(|(keyword, categories)| (*keyword, CategorySet::of(categories))))
    }

    /// Build a table from (keyword, categories) pairs. Keywords are
    /// lower-cased; a repeated keyword merges its categories into the first.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, CategorySet)>,
    {
        let mut table: Vec<(String, CategorySet)> = Vec::new();
        for (keyword, categories) in entries {
            let keyword = keyword.to_lowercase();
            match table.iter_mut().find(|(existing, _)| *existing == keyword) {
                Some((_, existing)) => *existing = existing.union(categories),
                None => table.push((keyword, categories)),
            }
        }
        Self { entries: table }
    }

    pub fn lookup(&self, keyword: &str) -> Option<CategorySet> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, categories)| *categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CategorySet)> + '_ {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TermTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_core::Category::{Display, Monospace, SansSerif, Serif};

    #[test]
    fn builtin_keywords_are_unique() {
        let table = TermTable::builtin();
        let mut keywords: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        keywords.sort_unstable();
        keywords.dedup();
        assert_eq!(keywords.len(), table.len());
    }

    #[test]
    fn lookup_returns_mapped_categories() {
        let table = TermTable::builtin();
        assert_eq!(table.lookup("vintage"), Some(CategorySet::of(&[Serif, Display])));
        assert_eq!(table.lookup("corporate"), Some(CategorySet::of(&[SansSerif])));
        assert_eq!(table.lookup("grunge"), None);
    }

    #[test]
    fn repeated_keywords_merge() {
        let table = TermTable::from_entries([
            ("Tech", CategorySet::of(&[SansSerif])),
            ("tech", CategorySet::of(&[Monospace])),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("tech"), Some(CategorySet::of(&[SansSerif, Monospace])));
    }
}
