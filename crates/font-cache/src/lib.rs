use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use font_catalog::CatalogSource;
use font_core::{FontDescriptor, FontError, FontResult, PairingConfig, SortOrder};
use parking_lot::RwLock;
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

/// A catalog as fetched at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub sort: SortOrder,
    pub fetched_at: DateTime<Utc>,
    pub fonts: Vec<FontDescriptor>,
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    fonts: Vec<FontDescriptor>,
    loaded_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCacheStats {
    pub snapshots: usize,
    pub fonts: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Time-to-live cache in front of a catalog source.
///
/// One snapshot is held per sort order. Snapshots are dropped by
/// `invalidate` or replaced by `refresh`; nothing expires them in the
/// background. When a disk directory is set, the last good snapshot per sort
/// order survives restarts and is served if the upstream fetch fails.
pub struct CachedCatalog<S> {
    source: S,
    ttl: Duration,
    disk_path: Option<PathBuf>,
    memory: RwLock<HashMap<SortOrder, MemoryEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: CatalogSource> CachedCatalog<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            disk_path: None,
            memory: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache configured from `PairingConfig`, with the disk snapshot in the
    /// platform cache directory when enabled
    pub fn from_config(source: S, config: &PairingConfig) -> FontResult<Self> {
        let cache = Self::new(source, Duration::from_secs(config.cache_ttl_secs));
        if config.disk_snapshot {
            cache.with_disk_snapshot(default_snapshot_dir()?)
        } else {
            Ok(cache)
        }
    }

    pub fn with_disk_snapshot(mut self, dir: impl Into<PathBuf>) -> FontResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        self.disk_path = Some(dir);
        Ok(self)
    }

    /// Drop every in-memory snapshot; the next fetch goes upstream
    pub fn invalidate(&self) {
        self.memory.write().clear();
        debug!("catalog cache invalidated");
    }

    /// Fetch upstream regardless of snapshot age
    pub async fn refresh(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        let fonts = self.source.fetch_catalog(sort).await?;
        self.store(sort, &fonts);
        Ok(fonts)
    }

    pub fn stats(&self) -> CatalogCacheStats {
        let memory = self.memory.read();
        CatalogCacheStats {
            snapshots: memory.len(),
            fonts: memory.values().map(|entry| entry.fonts.len()).sum(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn fresh(&self, sort: SortOrder) -> Option<Vec<FontDescriptor>> {
        let memory = self.memory.read();
        memory
            .get(&sort)
            .filter(|entry| entry.loaded_at.elapsed() < self.ttl)
            .map(|entry| entry.fonts.clone())
    }

    fn store(&self, sort: SortOrder, fonts: &[FontDescriptor]) {
        self.memory.write().insert(sort, MemoryEntry {
            fonts: fonts.to_vec(),
            loaded_at: Instant::now(),
        });

        if let Some(dir) = &self.disk_path {
            let snapshot = CatalogSnapshot {
                sort,
                fetched_at: Utc::now(),
                fonts: fonts.to_vec(),
            };
            if let Err(e) = save_snapshot(dir, &snapshot) {
                warn!(error = %e, "failed to write catalog snapshot");
            }
        }
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for CachedCatalog<S> {
    fn name(&self) -> &str {
        self.source.name()
    }

    async fn fetch_catalog(&self, sort: SortOrder) -> FontResult<Vec<FontDescriptor>> {
        if let Some(fonts) = self.fresh(sort) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(%sort, count = fonts.len(), "catalog cache hit");
            return Ok(fonts);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(%sort, "catalog cache miss");

        match self.refresh(sort).await {
            Ok(fonts) => Ok(fonts),
            Err(e) => {
                let snapshot = self.disk_path.as_deref().and_then(|dir| load_snapshot(dir, sort));
                match snapshot {
                    Some(snapshot) => {
                        warn!(
                            error = %e,
                            fetched_at = %snapshot.fetched_at,
                            "catalog fetch failed, serving disk snapshot"
                        );
                        Ok(snapshot.fonts)
                    }
                    None => Err(e),
                }
            }
        }
    }
}

pub fn default_snapshot_dir() -> FontResult<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "font-pairing", "font-pairing")
        .ok_or_else(|| FontError::CacheError("Could not determine cache directory".to_string()))?;
    Ok(project_dirs.cache_dir().join("catalog"))
}

fn snapshot_path(dir: &Path, sort: SortOrder) -> PathBuf {
    dir.join(format!("{}.bin", sort.as_str()))
}

pub fn save_snapshot(dir: &Path, snapshot: &CatalogSnapshot) -> FontResult<()> {
    let data = bincode::serialize(snapshot)
        .map_err(|e| FontError::CacheError(format!("Failed to serialize catalog snapshot: {}", e)))?;
    std::fs::write(snapshot_path(dir, snapshot.sort), data)?;
    Ok(())
}

pub fn load_snapshot(dir: &Path, sort: SortOrder) -> Option<CatalogSnapshot> {
    let data = std::fs::read(snapshot_path(dir, sort)).ok()?;
    match bincode::deserialize(&data) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, %sort, "discarding unreadable catalog snapshot");
            None
        }
    }
}
