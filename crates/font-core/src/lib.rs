use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// A typeface as the catalog describes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    /// Family name (e.g., "Lora", "Bebas Neue"), unique within a catalog snapshot
    pub family: String,

    /// Typeface category
    pub category: Category,

    /// Variant names as the catalog lists them (e.g., "regular", "700italic")
    #[serde(default)]
    pub variants: Vec<String>,

    /// Last modification date reported by the catalog
    #[serde(default)]
    pub last_modified: Option<String>,

    /// Variant name to font file URL
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl FontDescriptor {
    /// Descriptor with just a family and category, as the static lists carry them
    pub fn new(family: impl Into<String>, category: Category) -> Self {
        Self {
            family: family.into(),
            category,
            variants: Vec::new(),
            last_modified: None,
            files: BTreeMap::new(),
        }
    }

    pub fn with_variants(mut self, variants: &[&str]) -> Self {
        self.variants = variants.iter().map(|v| v.to_string()).collect();
        self
    }
}

/// Typeface category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Serif,
    SansSerif,
    Display,
    Handwriting,
    Monospace,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Serif,
        Category::SansSerif,
        Category::Display,
        Category::Handwriting,
        Category::Monospace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Serif => "serif",
            Category::SansSerif => "sans-serif",
            Category::Display => "display",
            Category::Handwriting => "handwriting",
            Category::Monospace => "monospace",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serif" => Ok(Category::Serif),
            "sans-serif" | "sans" => Ok(Category::SansSerif),
            "display" => Ok(Category::Display),
            "handwriting" => Ok(Category::Handwriting),
            "monospace" | "mono" => Ok(Category::Monospace),
            other => Err(FontError::UnknownCategory(other.to_string())),
        }
    }
}

/// A set of categories. `CategorySet::all()` means "no filtering".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Category::ALL.iter().copied().collect()
    }

    pub fn of(categories: &[Category]) -> Self {
        categories.iter().copied().collect()
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn union(self, other: CategorySet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_all(&self) -> bool {
        *self == Self::all()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.iter().copied().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return write!(f, "all categories");
        }
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Typographic purpose of a font on the board.
///
/// Pairing only reasons about `Heading`, `Body` and `Accent`; `Subheading`
/// and `Caption` refine the article preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Heading,
    Subheading,
    Body,
    Caption,
    Accent,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Heading,
        Role::Subheading,
        Role::Body,
        Role::Caption,
        Role::Accent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Heading => "heading",
            Role::Subheading => "subheading",
            Role::Body => "body",
            Role::Caption => "caption",
            Role::Accent => "accent",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heading" => Ok(Role::Heading),
            "subheading" => Ok(Role::Subheading),
            "body" => Ok(Role::Body),
            "caption" => Ok(Role::Caption),
            "accent" => Ok(Role::Accent),
            other => Err(FontError::UnknownRole(other.to_string())),
        }
    }
}

/// Non-repeating set of roles, iterated in declaration order
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Role>", from = "Vec<Role>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn remove(&mut self, role: Role) {
        self.0 &= !role.bit();
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.iter().copied().filter(move |r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(set: RoleSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// A font the user has placed on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFont {
    pub family: String,
    pub category: Category,
    /// Variant name (e.g., "regular")
    pub variant: String,
    /// Size in px
    pub size: u32,
    pub role: Role,
}

impl SelectedFont {
    pub fn new(family: impl Into<String>, category: Category, role: Role, size: u32) -> Self {
        Self {
            family: family.into(),
            category,
            variant: "regular".to_string(),
            size,
            role,
        }
    }
}

/// A catalog font suggested for the current board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(flatten)]
    pub font: FontDescriptor,

    /// Roles this font is suited for; empty means no confident fit
    pub recommended_roles: RoleSet,
}

impl Recommendation {
    pub fn new(font: FontDescriptor, recommended_roles: RoleSet) -> Self {
        Self { font, recommended_roles }
    }

    pub fn family(&self) -> &str {
        &self.font.family
    }

    pub fn category(&self) -> Category {
        self.font.category
    }
}

/// Predefined style label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Professional,
    Creative,
    Elegant,
    Playful,
    Modern,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Professional,
        Mood::Creative,
        Mood::Elegant,
        Mood::Playful,
        Mood::Modern,
    ];

    /// Lenient lookup: anything unrecognized is `None`
    pub fn parse(label: &str) -> Option<Mood> {
        label.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Professional => "professional",
            Mood::Creative => "creative",
            Mood::Elegant => "elegant",
            Mood::Playful => "playful",
            Mood::Modern => "modern",
        }
    }

    /// Categories this mood narrows the catalog to
    pub fn categories(&self) -> CategorySet {
        use Category::*;
        match self {
            Mood::Professional => CategorySet::of(&[SansSerif, Serif]),
            Mood::Creative => CategorySet::of(&[Display, Handwriting]),
            Mood::Elegant => CategorySet::of(&[Serif]),
            Mood::Playful => CategorySet::of(&[Handwriting, Display]),
            Mood::Modern => CategorySet::of(&[SansSerif]),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "professional" => Ok(Mood::Professional),
            "creative" => Ok(Mood::Creative),
            "elegant" => Ok(Mood::Elegant),
            "playful" => Ok(Mood::Playful),
            "modern" => Ok(Mood::Modern),
            other => Err(FontError::UnknownMood(other.to_string())),
        }
    }
}

/// Catalog ordering requested from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Popularity,
    Trending,
    Alpha,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Popularity => "popularity",
            SortOrder::Trending => "trending",
            SortOrder::Alpha => "alpha",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popularity" => Ok(SortOrder::Popularity),
            "trending" => Ok(SortOrder::Trending),
            "alpha" => Ok(SortOrder::Alpha),
            other => Err(FontError::Parse(format!("Unknown sort order: {}", other))),
        }
    }
}

// ============================================================
// CONFIGURATION
// ============================================================

/// How prompt tokens are compared against the term table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordMatch {
    /// Token contains the keyword ("playfully" matches "playful")
    #[default]
    TokenContainsKeyword,
    /// Token contains the keyword or the keyword contains the token
    Bidirectional,
    /// Token equals the keyword once edge punctuation is stripped
    ExactToken,
}

impl fmt::Display for KeywordMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordMatch::TokenContainsKeyword => write!(f, "Token Contains Keyword"),
            KeywordMatch::Bidirectional => write!(f, "Bidirectional"),
            KeywordMatch::ExactToken => write!(f, "Exact Token"),
        }
    }
}

impl FromStr for KeywordMatch {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token-contains-keyword" | "contains" => Ok(KeywordMatch::TokenContainsKeyword),
            "bidirectional" => Ok(KeywordMatch::Bidirectional),
            "exact-token" | "exact" => Ok(KeywordMatch::ExactToken),
            other => Err(FontError::Parse(format!("Unknown keyword matching mode: {}", other))),
        }
    }
}

/// Where the role assigner's secondary-eligibility draws come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoleChanceMode {
    /// Fixed eligibility table, identical output for identical input
    #[default]
    Deterministic,
    /// Fresh random draws on every call
    Random,
    /// Random draws from an RNG seeded with `PairingConfig::seed`
    Seeded,
}

impl fmt::Display for RoleChanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleChanceMode::Deterministic => write!(f, "Deterministic"),
            RoleChanceMode::Random => write!(f, "Random"),
            RoleChanceMode::Seeded => write!(f, "Seeded"),
        }
    }
}

impl FromStr for RoleChanceMode {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deterministic" => Ok(RoleChanceMode::Deterministic),
            "random" => Ok(RoleChanceMode::Random),
            "seeded" => Ok(RoleChanceMode::Seeded),
            other => Err(FontError::Parse(format!("Unknown role chance mode: {}", other))),
        }
    }
}

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/webfonts/v1/webfonts";

/// Upper bound on recommendations returned per call
pub const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Google Fonts Developer API key
    pub api_key: Option<String>,

    /// Web fonts listing endpoint
    pub api_url: String,

    /// Catalog ordering
    pub sort_order: SortOrder,

    /// Per-request timeout for catalog fetches
    pub request_timeout_secs: u64,

    /// How long a fetched catalog snapshot is served before refetching
    pub cache_ttl_secs: u64,

    /// Keep the last good catalog on disk for offline use
    pub disk_snapshot: bool,

    /// Recommendations per call, clamped to `1..=MAX_RECOMMENDATIONS`
    pub max_recommendations: usize,

    pub keyword_match: KeywordMatch,

    pub role_chance: RoleChanceMode,

    /// Seed for `RoleChanceMode::Seeded`
    pub seed: u64,
}

impl PairingConfig {
    /// `max_recommendations` clamped to `1..=MAX_RECOMMENDATIONS`
    pub fn recommendation_limit(&self) -> usize {
        self.max_recommendations.clamp(1, MAX_RECOMMENDATIONS)
    }
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            sort_order: SortOrder::Popularity,
            request_timeout_secs: 10,
            cache_ttl_secs: 60 * 60,
            disk_snapshot: true,
            max_recommendations: MAX_RECOMMENDATIONS,
            keyword_match: KeywordMatch::default(),
            role_chance: RoleChanceMode::default(),
            seed: 0,
        }
    }
}

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Font catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Unknown font category: {0}")]
    UnknownCategory(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown mood: {0}")]
    UnknownMood(String),
}

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;
