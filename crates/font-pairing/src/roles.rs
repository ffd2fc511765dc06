use font_core::{Category, FontDescriptor, Role, RoleChanceMode, RoleSet, SelectedFont};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The secondary-eligibility decisions the role assigner can't settle from
/// the category alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanceDraw {
    /// Serif candidate also offered as body text
    SerifBody,
    /// Monospace candidate also offered as body text
    MonospaceBody,
    /// Accent added to a candidate that lacks it
    AccentVariety,
}

impl ChanceDraw {
    /// How often the draw should succeed when drawn at random
    pub fn probability(&self) -> f64 {
        match self {
            ChanceDraw::SerifBody => 0.5,
            ChanceDraw::MonospaceBody => 0.3,
            ChanceDraw::AccentVariety => 0.4,
        }
    }
}

/// Source of the assigner's chance draws
pub trait RoleChance: Send + Sync {
    fn roll(&self, draw: ChanceDraw) -> bool;
}

/// Succeeds exactly when the draw is at least even odds: serif body yes,
/// monospace body no, accent variety no
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicChance;

impl RoleChance for DeterministicChance {
    fn roll(&self, draw: ChanceDraw) -> bool {
        draw.probability() >= 0.5
    }
}

/// Fresh thread-local randomness on every draw
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChance;

impl RoleChance for RandomChance {
    fn roll(&self, draw: ChanceDraw) -> bool {
        rand::thread_rng().gen_bool(draw.probability())
    }
}

/// Reproducible random draws
pub struct SeededChance {
    rng: Mutex<StdRng>,
}

impl SeededChance {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl RoleChance for SeededChance {
    fn roll(&self, draw: ChanceDraw) -> bool {
        self.rng.lock().gen_bool(draw.probability())
    }
}

/// Every draw gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedChance(pub bool);

impl RoleChance for FixedChance {
    fn roll(&self, _draw: ChanceDraw) -> bool {
        self.0
    }
}

pub fn chance_for(mode: RoleChanceMode, seed: u64) -> Box<dyn RoleChance> {
    match mode {
        RoleChanceMode::Deterministic => Box::new(DeterministicChance),
        RoleChanceMode::Random => Box::new(RandomChance),
        RoleChanceMode::Seeded => Box::new(SeededChance::new(seed)),
    }
}

/// Categories of the fonts currently holding the heading and body roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairingContext {
    pub heading: Option<Category>,
    pub body: Option<Category>,
}

impl PairingContext {
    /// Uses the first heading entry and the first body entry of the selection
    pub fn from_selection(selection: &[SelectedFont]) -> Self {
        let first = |role: Role| selection.iter().find(|f| f.role == role).map(|f| f.category);
        Self {
            heading: first(Role::Heading),
            body: first(Role::Body),
        }
    }
}

/// Decides which of heading, body and accent a candidate suits
pub struct RoleAssigner<'a> {
    chance: &'a dyn RoleChance,
}

impl<'a> RoleAssigner<'a> {
    pub fn new(chance: &'a dyn RoleChance) -> Self {
        Self { chance }
    }

    pub fn assign(&self, candidate: &FontDescriptor, context: &PairingContext) -> RoleSet {
        let category = candidate.category;
        let mut roles = self.base_roles(category);

        if let Some(heading) = context.heading {
            if contrasts_with_heading(heading, category) {
                roles.remove(Role::Heading);
                roles.insert(Role::Body);
            }
        }

        if let Some(body) = context.body {
            if contrasts_with_body(body, category) {
                roles.remove(Role::Body);
                roles.insert(Role::Heading);
            }
        }

        if !roles.contains(Role::Accent) && self.chance.roll(ChanceDraw::AccentVariety) {
            roles.insert(Role::Accent);
        }

        roles
    }

    fn base_roles(&self, category: Category) -> RoleSet {
        let mut roles = RoleSet::empty();
        match category {
            Category::Serif => {
                roles.insert(Role::Heading);
                if self.chance.roll(ChanceDraw::SerifBody) {
                    roles.insert(Role::Body);
                }
            }
            Category::SansSerif => {
                roles.insert(Role::Heading);
                roles.insert(Role::Body);
            }
            Category::Display => {
                roles.insert(Role::Heading);
                roles.insert(Role::Accent);
            }
            Category::Handwriting => {
                roles.insert(Role::Accent);
            }
            Category::Monospace => {
                roles.insert(Role::Accent);
                if self.chance.roll(ChanceDraw::MonospaceBody) {
                    roles.insert(Role::Body);
                }
            }
        }
        roles
    }
}

/// A heading font pairs with a body font of a visibly different category
fn contrasts_with_heading(heading: Category, candidate: Category) -> bool {
    use Category::*;
    matches!(
        (heading, candidate),
        (Serif, SansSerif) | (SansSerif, Serif) | (Display, Serif) | (Display, SansSerif)
    )
}

fn contrasts_with_body(body: Category, candidate: Category) -> bool {
    use Category::*;
    matches!(
        (body, candidate),
        (SansSerif, Serif) | (SansSerif, Display) | (Serif, SansSerif) | (Serif, Display)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_core::Category::*;

    fn font(category: Category) -> FontDescriptor {
        FontDescriptor::new("Candidate", category)
    }

    fn roles(list: &[Role]) -> RoleSet {
        RoleSet::of(list)
    }

    #[test]
    fn base_roles_without_chance() {
        let chance = FixedChance(false);
        let assigner = RoleAssigner::new(&chance);
        let none = PairingContext::default();

        assert_eq!(assigner.assign(&font(Serif), &none), roles(&[Role::Heading]));
        assert_eq!(assigner.assign(&font(SansSerif), &none), roles(&[Role::Heading, Role::Body]));
        assert_eq!(assigner.assign(&font(Display), &none), roles(&[Role::Heading, Role::Accent]));
        assert_eq!(assigner.assign(&font(Handwriting), &none), roles(&[Role::Accent]));
        assert_eq!(assigner.assign(&font(Monospace), &none), roles(&[Role::Accent]));
    }

    #[test]
    fn base_roles_with_every_draw_succeeding() {
        let chance = FixedChance(true);
        let assigner = RoleAssigner::new(&chance);
        let none = PairingContext::default();

        assert_eq!(assigner.assign(&font(Serif), &none), roles(&[Role::Heading, Role::Body, Role::Accent]));
        assert_eq!(assigner.assign(&font(Monospace), &none), roles(&[Role::Body, Role::Accent]));
    }

    #[test]
    fn deterministic_chance_table() {
        let chance = DeterministicChance;
        assert!(chance.roll(ChanceDraw::SerifBody));
        assert!(!chance.roll(ChanceDraw::MonospaceBody));
        assert!(!chance.roll(ChanceDraw::AccentVariety));
    }

    #[test]
    fn sans_heading_demotes_serif_to_body() {
        let chance = DeterministicChance;
        let assigner = RoleAssigner::new(&chance);
        let context = PairingContext { heading: Some(SansSerif), body: None };

        assert_eq!(assigner.assign(&font(Serif), &context), roles(&[Role::Body]));
    }

    #[test]
    fn display_heading_demotes_text_faces_to_body() {
        let chance = FixedChance(false);
        let assigner = RoleAssigner::new(&chance);
        let context = PairingContext { heading: Some(Display), body: None };

        assert_eq!(assigner.assign(&font(Serif), &context), roles(&[Role::Body]));
        assert_eq!(assigner.assign(&font(SansSerif), &context), roles(&[Role::Body]));
        assert_eq!(assigner.assign(&font(Display), &context), roles(&[Role::Heading, Role::Accent]));
    }

    #[test]
    fn body_rule_promotes_contrasting_heading() {
        let chance = FixedChance(false);
        let assigner = RoleAssigner::new(&chance);
        let context = PairingContext { heading: None, body: Some(Serif) };

        assert_eq!(assigner.assign(&font(SansSerif), &context), roles(&[Role::Heading]));
        assert_eq!(assigner.assign(&font(Display), &context), roles(&[Role::Heading, Role::Accent]));
        assert_eq!(assigner.assign(&font(Handwriting), &context), roles(&[Role::Accent]));
    }

    #[test]
    fn body_rule_runs_after_heading_rule() {
        // serif heading pushes sans to body, serif body pulls it back to heading
        let chance = FixedChance(false);
        let assigner = RoleAssigner::new(&chance);
        let context = PairingContext { heading: Some(Serif), body: Some(Serif) };

        assert_eq!(assigner.assign(&font(SansSerif), &context), roles(&[Role::Heading]));
    }

    #[test]
    fn context_uses_first_heading_and_body() {
        let selection = vec![
            SelectedFont::new("Caveat", Handwriting, Role::Accent, 24),
            SelectedFont::new("Roboto", SansSerif, Role::Heading, 48),
            SelectedFont::new("Lora", Serif, Role::Heading, 40),
            SelectedFont::new("Inter", SansSerif, Role::Subheading, 20),
        ];
        let context = PairingContext::from_selection(&selection);
        assert_eq!(context, PairingContext { heading: Some(SansSerif), body: None });
    }

    #[test]
    fn seeded_chance_is_reproducible() {
        let a = SeededChance::new(42);
        let b = SeededChance::new(42);
        let draws = [ChanceDraw::SerifBody, ChanceDraw::MonospaceBody, ChanceDraw::AccentVariety];
        for _ in 0..20 {
            for draw in draws {
                assert_eq!(a.roll(draw), b.roll(draw));
            }
        }
    }
}
