use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use font_core::{Category, FontDescriptor, FontError, FontResult, PairingConfig, SortOrder};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// Supplies the full set of available fonts
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the whole catalog. Network and payload failures are reported
    /// as `FontError::CatalogUnavailable`.
    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        (**self).fetch_catalog(sort).await
    }
}

// ============================================================
// GOOGLE FONTS
// ============================================================

#[derive(Debug, Deserialize)]
struct WebFontList {
    items: Vec<WebFontItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebFontItem {
    family: String,
    category: String,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    files: BTreeMap<String, String>,
}

/// Google Fonts Developer API client
pub struct GoogleFontsCatalog {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GoogleFontsCatalog {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> FontResult<Self> {
        let client = Client::builder()
            .user_agent("Font-Pairing/1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| FontError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
        })
    }

    pub fn from_config(config: &PairingConfig) -> FontResult<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Convert the API payload, skipping entries with a category we don't model
    fn parse_items(items: Vec<WebFontItem>) -> Vec<FontDescriptor> {
        items
            .into_iter()
            .filter_map(|item| match item.category.parse::<Category>() {
                Ok(category) => Some(FontDescriptor {
                    family: item.family,
                    category,
                    variants: item.variants,
                    last_modified: item.last_modified,
                    files: item.files,
                }),
                Err(_) => {
                    warn!(family = %item.family, category = %item.category, "skipping catalog entry with unknown category");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl CatalogSource for GoogleFontsCatalog {
    fn name(&self) -> &str {
        "Google Fonts"
    }

    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        let mut query: Vec<(&str, &str)> = vec![("sort", sort.as_str())];
        if let Some(key) = &self.api_key {
            query.push(("key", key.as_str()));
        }

        let response = self.client.get(&self.api_url).query(&query).send().await
            .map_err(|e| FontError::CatalogUnavailable(format!("Google Fonts API error: {}", e)))?;

        let response = response.error_for_status()
            .map_err(|e| FontError::CatalogUnavailable(format!("Google Fonts API error: {}", e)))?;

        let list: WebFontList = response.json().await
            .map_err(|e| FontError::CatalogUnavailable(format!("JSON parse error: {}", e)))?;

        let fonts = Self::parse_items(list.items);
        debug!(count = fonts.len(), %sort, "fetched Google Fonts catalog");
        Ok(fonts)
    }
}

// ============================================================
// STATIC LISTS
// ============================================================

/// In-memory catalog
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    name: String,
    fonts: Vec<FontDescriptor>,
}

impl StaticCatalog {
    pub fn new(name: impl Into<String>, fonts: Vec<FontDescriptor>) -> Self {
        Self { name: name.into(), fonts }
    }

    /// Popular families, used when the web catalog can't be reached
    pub fn popular() -> Self {
        use Category::*;
        const FULL: &[&str] = &["regular", "bold", "italic", "bold italic"];
        const UPRIGHT: &[&str] = &["regular", "bold"];
        const SINGLE: &[&str] = &["regular"];

        let entries: [(&str, Category, &[&str]); 20] = [
            ("Roboto", SansSerif, FULL),
            ("Open Sans", SansSerif, FULL),
            ("Lato", SansSerif, FULL),
            ("Montserrat", SansSerif, FULL),
            ("Roboto Condensed", SansSerif, FULL),
            ("Source Sans Pro", SansSerif, FULL),
            ("Oswald", SansSerif, UPRIGHT),
            ("Raleway", SansSerif, FULL),
            ("Merriweather", Serif, FULL),
            ("Playfair Display", Serif, FULL),
            ("Lora", Serif, FULL),
            ("PT Serif", Serif, FULL),
            ("Roboto Slab", Serif, UPRIGHT),
            ("Noto Serif", Serif, FULL),
            ("Pacifico", Display, SINGLE),
            ("Dancing Script", Handwriting, UPRIGHT),
            ("Caveat", Handwriting, UPRIGHT),
            ("Permanent Marker", Display, SINGLE),
            ("Amatic SC", Handwriting, UPRIGHT),
            ("Architects Daughter", Handwriting, SINGLE),
        ];

        let fonts = entries
            .iter()
            .map(|(family, category, variants)| FontDescriptor::new(*family, *category).with_variants(variants))
            .collect();

        Self::new("Popular fonts", fonts)
    }

    pub fn fonts(&self) -> &[FontDescriptor] {
        &self.fonts
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        let mut fonts = self.fonts.clone();
        if sort == SortOrder::Alpha {
            fonts.sort_by(|a, b| a.family.cmp(&b.family));
        }
        Ok(fonts)
    }
}

/// Serves `fallback` whenever `primary` fails
pub struct FallbackCatalog {
    primary: Arc<dyn CatalogSource>,
    fallback: Arc<dyn CatalogSource>,
}

impl FallbackCatalog {
    pub fn new(primary: Arc<dyn CatalogSource>, fallback: Arc<dyn CatalogSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl CatalogSource for FallbackCatalog {
    fn name(&self) -> &str {
        self.primary.name()
    }

    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        match self.primary.fetch_catalog(sort).await {
            Ok(fonts) => Ok(fonts),
            Err(e) => {
                warn!(source = self.primary.name(), error = %e, "catalog fetch failed, serving {}", self.fallback.name());
                self.fallback.fetch_catalog(sort).await
            }
        }
    }
}
