//! Font pairing workspace: re-exports the crates and wires the catalog
//! stack the front ends share.

use std::sync::Arc;

pub use font_cache;
pub use font_catalog;
pub use font_core;
pub use font_pairing;
pub use font_session;

use font_cache::CachedCatalog;
use font_catalog::{CatalogSource, FallbackCatalog, GoogleFontsCatalog, StaticCatalog};
use font_core::{FontResult, PairingConfig};
use font_pairing::RecommendationEngine;
use font_session::RecommendationDispatcher;

/// Google Fonts behind the snapshot cache. Failures still surface, so the
/// engine can switch to its mood lists.
pub fn web_catalog(config: &PairingConfig) -> FontResult<Arc<dyn CatalogSource>> {
    let google = GoogleFontsCatalog::from_config(config)?;
    Ok(Arc::new(CachedCatalog::from_config(google, config)?))
}

/// Catalog for browsing: the web catalog, or the popular list when it is
/// unreachable (or when `offline`)
pub fn browsable_catalog(config: &PairingConfig, offline: bool) -> FontResult<Arc<dyn CatalogSource>> {
    if offline {
        return Ok(Arc::new(StaticCatalog::popular()));
    }
    Ok(Arc::new(FallbackCatalog::new(web_catalog(config)?, Arc::new(StaticCatalog::popular()))))
}

/// Engine configured from `config`, reading the web catalog unless `offline`
pub fn engine(config: &PairingConfig, offline: bool) -> FontResult<RecommendationEngine> {
    let source: Arc<dyn CatalogSource> = if offline {
        Arc::new(StaticCatalog::popular())
    } else {
        web_catalog(config)?
    };
    Ok(RecommendationEngine::from_config(source, config))
}

pub fn dispatcher(config: &PairingConfig, offline: bool) -> FontResult<Arc<RecommendationDispatcher>> {
    Ok(Arc::new(RecommendationDispatcher::new(Arc::new(engine(config, offline)?))))
}
