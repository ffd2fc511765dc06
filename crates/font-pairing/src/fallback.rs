use font_core::{Category, FontDescriptor, Mood, Recommendation, Role, RoleSet};

/// Canned suggestions served when the catalog can't be fetched.
/// Unrecognized moods get nothing.
pub fn fallback_for(mood: &str) -> Vec<Recommendation> {
    use Category::*;
    use Role::*;

    match Mood::parse(mood) {
        Some(Mood::Professional) => vec![
            entry("Roboto", SansSerif, &[Heading, Body]),
            entry("Merriweather", Serif, &[Heading, Body]),
            entry("Source Sans Pro", SansSerif, &[Body, Accent]),
        ],
        Some(Mood::Creative) => vec![
            entry("Pacifico", Display, &[Heading, Accent]),
            entry("Amatic SC", Handwriting, &[Heading, Accent]),
            entry("Caveat", Handwriting, &[Accent]),
        ],
        Some(Mood::Elegant) => vec![
            entry("Cormorant Garamond", Serif, &[Heading, Body]),
            entry("Playfair Display", Serif, &[Heading]),
            entry("Cinzel", Serif, &[Heading, Accent]),
        ],
        Some(Mood::Playful) => vec![
            entry("Comic Neue", Handwriting, &[Body, Accent]),
            entry("Fredoka One", Display, &[Heading, Accent]),
            entry("Bubblegum Sans", Display, &[Heading, Accent]),
        ],
        Some(Mood::Modern) => vec![
            entry("Montserrat", SansSerif, &[Heading, Body]),
            entry("Raleway", SansSerif, &[Heading, Body]),
            entry("Poppins", SansSerif, &[Heading, Body, Accent]),
        ],
        None => Vec::new(),
    }
}

fn entry(family: &str, category: Category, roles: &[Role]) -> Recommendation {
    Recommendation::new(FontDescriptor::new(family, category), RoleSet::of(roles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mood_has_three_entries() {
        for mood in Mood::ALL {
            let recs = fallback_for(mood.as_str());
            assert_eq!(recs.len(), 3, "mood {}", mood);
            assert!(recs.iter().all(|r| !r.recommended_roles.is_empty()));
        }
    }

    #[test]
    fn creative_is_one_display_and_two_handwriting() {
        let recs = fallback_for("creative");
        let categories: Vec<_> = recs.iter().map(|r| r.category()).collect();
        assert_eq!(categories, vec![Category::Display, Category::Handwriting, Category::Handwriting]);
        assert_eq!(recs[0].family(), "Pacifico");
    }

    #[test]
    fn unknown_mood_has_no_fallback() {
        assert!(fallback_for("").is_empty());
        assert!(fallback_for("brutalist").is_empty());
    }
}
