use font_core::{Category, FontError, FontResult, Mood, Recommendation, Role, SelectedFont};
use font_pairing::RecommendationRequest;
use serde::{Serialize, Deserialize};

pub const DEFAULT_SAMPLE_TEXT: &str = "Typography is the art and technique of arranging type.";

/// Default px size for a font placed in a role
pub fn default_size(role: Role) -> u32 {
    match role {
        Role::Heading => 48,
        Role::Accent => 24,
        _ => 16,
    }
}

/// Partial edit of a selected font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontUpdate {
    pub variant: Option<String>,
    pub size: Option<u32>,
    pub role: Option<Role>,
}

/// Working state of a pairing session: what's on the board and what the
/// user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontBoard {
    selection: Vec<SelectedFont>,
    mood: String,
    prompt: String,
    sample_text: String,
}

impl Default for FontBoard {
    fn default() -> Self {
        Self {
            selection: Vec::new(),
            mood: Mood::Professional.as_str().to_string(),
            prompt: String::new(),
            sample_text: DEFAULT_SAMPLE_TEXT.to_string(),
        }
    }
}

impl FontBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board preloaded with a serif heading over a sans-serif body
    pub fn starter() -> Self {
        let mut board = Self::default();
        board.selection.push(SelectedFont::new("Playfair Display", Category::Serif, Role::Heading, 48));
        board.selection.push(SelectedFont::new("Open Sans", Category::SansSerif, Role::Body, 16));
        board
    }

    pub fn selection(&self) -> &[SelectedFont] {
        &self.selection
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn sample_text(&self) -> &str {
        &self.sample_text
    }

    pub fn set_sample_text(&mut self, text: impl Into<String>) {
        self.sample_text = text.into();
    }

    /// Every selection edit returns the request to rerun, or `None` once the
    /// board is empty
    pub fn add_font(&mut self, font: SelectedFont) -> Option<RecommendationRequest> {
        self.selection.push(font);
        self.selection_changed()
    }

    /// Place a recommendation on the board, regular variant, sized for `role`.
    /// Roles other than heading and body are placed as accent.
    pub fn adopt(&mut self, recommendation: &Recommendation, role: Role) -> Option<RecommendationRequest> {
        let placed = match role {
            Role::Heading | Role::Body => role,
            _ => Role::Accent,
        };
        let font = SelectedFont {
            family: recommendation.font.family.clone(),
            category: recommendation.font.category,
            variant: "regular".to_string(),
            size: default_size(role),
            role: placed,
        };
        self.add_font(font)
    }

    pub fn remove_font(&mut self, index: usize) -> FontResult<Option<RecommendationRequest>> {
        if index >= self.selection.len() {
            return Err(out_of_range(index, self.selection.len()));
        }
        self.selection.remove(index);
        Ok(self.selection_changed())
    }

    pub fn update_font(&mut self, index: usize, update: FontUpdate) -> FontResult<Option<RecommendationRequest>> {
        let len = self.selection.len();
        let font = self.selection.get_mut(index).ok_or_else(|| out_of_range(index, len))?;

        if let Some(variant) = update.variant {
            font.variant = variant;
        }
        if let Some(size) = update.size {
            font.size = size;
        }
        if let Some(role) = update.role {
            font.role = role;
        }
        Ok(self.selection_changed())
    }

    fn selection_changed(&self) -> Option<RecommendationRequest> {
        if self.selection.is_empty() {
            None
        } else {
            Some(self.request())
        }
    }

    /// Switch mood. The prompt is cleared so the mood takes effect.
    pub fn set_mood(&mut self, mood: impl Into<String>) -> RecommendationRequest {
        self.mood = mood.into();
        self.prompt.clear();
        self.request()
    }

    /// Update the prompt. A blank prompt doesn't warrant a new request; a
    /// non-blank one is requested without a mood.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> Option<RecommendationRequest> {
        self.prompt = prompt.into();
        if self.prompt.trim().is_empty() {
            return None;
        }
        Some(RecommendationRequest::new("", self.prompt.clone(), self.selection.clone()))
    }

    /// Request for the board as it stands
    pub fn request(&self) -> RecommendationRequest {
        RecommendationRequest::new(self.mood.clone(), self.prompt.clone(), self.selection.clone())
    }
}

fn out_of_range(index: usize, len: usize) -> FontError {
    FontError::NotFound(format!("No selected font at index {} (board has {})", index, len))
}
