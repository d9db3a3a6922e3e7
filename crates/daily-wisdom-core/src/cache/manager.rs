use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::api::{Fetcher, Resource};
use crate::error::{Result, WisdomError};

use super::storage::{Cache, CacheStorage};

/// Prefix of every cache name this app owns.
pub const CACHE_PREFIX: &str = "daily-wisdom";

pub const DEFAULT_CACHE_VERSION: &str = "v1";

/// Resources stored on install.
pub const PRECACHE_PATHS: &[&str] = &["/", "/index.html", "/style.css", "/app.js", "/anecdotes.json"];

/// Entries tried, in order, as the offline shell.
const SHELL_PATHS: &[&str] = &["/", "/index.html"];

/// Where a served resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    Cache,
    Network,
    OfflineShell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedResource {
    pub resource: Resource,
    pub source: ServedFrom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub name: String,
    pub installed: bool,
    pub entries: usize,
    pub oldest: Option<String>,
    pub other_caches: Vec<String>,
}

/// Owns the single active, versioned cache.
#[derive(Debug, Clone)]
pub struct CacheManager {
    storage: CacheStorage,
    version: String,
    precache: Vec<String>,
}

impl CacheManager {
    pub fn new(storage: CacheStorage, version: impl Into<String>) -> Self {
        Self {
            storage,
            version: version.into(),
            precache: PRECACHE_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_precache(mut self, paths: Vec<String>) -> Self {
        self.precache = paths;
        self
    }

    /// Current cache name, e.g. `daily-wisdom-v1`.
    pub fn cache_name(&self) -> String {
        format!("{}-{}", CACHE_PREFIX, self.version)
    }

    pub fn precache_paths(&self) -> &[String] {
        &self.precache
    }

    fn current(&self) -> Result<Cache> {
        self.storage.open(&self.cache_name())
    }

    /// Fetch every precache path and store them in the current cache.
    ///
    /// Nothing is written unless every fetch succeeds.
    pub async fn install(&self, fetcher: &dyn Fetcher) -> Result<usize> {
        let name = self.cache_name();
        info!(cache = %name, count = self.precache.len(), "Installing cache");

        let resources = try_join_all(self.precache.iter().map(|path| fetcher.fetch(path))).await?;

        let cache = self.current()?;
        for resource in &resources {
            cache.put(resource)?;
        }
        debug!(cache = cache.name(), "Cache populated");
        Ok(resources.len())
    }

    /// Delete every cache other than the current one. Returns the deleted names.
    pub fn activate(&self) -> Result<Vec<String>> {
        let current = self.cache_name();
        let mut deleted = Vec::new();
        for name in self.storage.keys()? {
            if name != current {
                info!(cache = %name, "Deleting old cache");
                self.storage.delete(&name)?;
                deleted.push(name);
            }
        }
        Ok(deleted)
    }

    /// Look up a path in the current cache only. Unreadable entries count as misses.
    pub fn lookup(&self, path: &str) -> Option<Resource> {
        let name = self.cache_name();
        if !self.storage.has(&name) {
            return None;
        }
        let cache = match self.storage.open(&name) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(cache = %name, error = %e, "Failed to open cache");
                return None;
            }
        };
        match cache.match_path(path) {
            Ok(hit) => hit.map(|cached| cached.data),
            Err(e) => {
                warn!(cache = %name, path, error = %e, "Failed to read cache entry");
                None
            }
        }
    }

    /// Serve a request: cache, then network, then the offline shell.
    ///
    /// The shell only stands in when the network is unreachable; an error
    /// status from the server is returned as is.
    ///
    /// # Errors
    /// `WisdomError::ResourceUnavailable` when all three miss, or the
    /// server's `WisdomError::BadStatus`.
    pub async fn respond(&self, path: &str, fetcher: &dyn Fetcher) -> Result<ServedResource> {
        if let Some(resource) = self.lookup(path) {
            debug!(path, "Cache hit");
            return Ok(ServedResource {
                resource,
                source: ServedFrom::Cache,
            });
        }

        match fetcher.fetch(path).await {
            Ok(resource) => {
                return Ok(ServedResource {
                    resource,
                    source: ServedFrom::Network,
                })
            }
            // The server answered; its error is the response
            Err(e) if !e.is_network() => return Err(e),
            Err(e) => warn!(path, error = %e, "Network unreachable"),
        }

        for shell in SHELL_PATHS {
            if let Some(resource) = self.lookup(shell) {
                info!(path, shell, "Serving offline shell");
                return Ok(ServedResource {
                    resource,
                    source: ServedFrom::OfflineShell,
                });
            }
        }

        Err(WisdomError::ResourceUnavailable(path.to_string()))
    }

    pub fn status(&self) -> Result<CacheStatus> {
        let name = self.cache_name();
        let installed = self.storage.has(&name);
        let (entries, oldest) = if installed {
            let entries = self.current()?.entries()?;
            let oldest = entries
                .iter()
                .min_by_key(|e| e.cached_at)
                .map(|e| e.age_display());
            (entries.len(), oldest)
        } else {
            (0, None)
        };
        let other_caches = self
            .storage
            .keys()?
            .into_iter()
            .filter(|n| *n != name)
            .collect();

        Ok(CacheStatus {
            name,
            installed,
            entries,
            oldest,
            other_caches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_name_embeds_version() {
        let dir = TempDir::new().unwrap();
        let storage = CacheStorage::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(CacheManager::new(storage.clone(), "v1").cache_name(), "daily-wisdom-v1");
        assert_eq!(CacheManager::new(storage, "v7").cache_name(), "daily-wisdom-v7");
    }

    #[test]
    fn test_precache_paths() {
        let dir = TempDir::new().unwrap();
        let storage = CacheStorage::new(dir.path().to_path_buf()).unwrap();
        let manager = CacheManager::new(storage, "v1");
        assert_eq!(manager.precache_paths().len(), PRECACHE_PATHS.len());
        assert_eq!(manager.precache_paths()[0], "/");

        let manager = manager.with_precache(vec!["/a/b".to_string()]);
        assert_eq!(manager.precache_paths(), ["/a/b".to_string()]);
    }

    #[test]
    fn test_status_before_install() {
        let dir = TempDir::new().unwrap();
        let storage = CacheStorage::new(dir.path().to_path_buf()).unwrap();
        storage.open("daily-wisdom-v0").unwrap();

        let status = CacheManager::new(storage, DEFAULT_CACHE_VERSION).status().unwrap();
        assert!(!status.installed);
        assert_eq!(status.entries, 0);
        assert_eq!(status.other_caches, vec!["daily-wisdom-v0"]);
    }

    #[test]
    fn test_lookup_without_cache_is_miss() {
        let dir = TempDir::new().unwrap();
        let storage = CacheStorage::new(dir.path().to_path_buf()).unwrap();
        let manager = CacheManager::new(storage.clone(), "v1");
        assert!(manager.lookup("/").is_none());
        // lookup must not create the cache
        assert!(storage.keys().unwrap().is_empty());
    }
}
