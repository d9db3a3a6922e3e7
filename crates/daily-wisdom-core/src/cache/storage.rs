use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::api::Resource;
use crate::error::{Result, WisdomError};
use crate::utils::format_age;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        format_age(self.age_minutes())
    }
}

/// Root of all named caches.
#[derive(Debug, Clone)]
pub struct CacheStorage {
    root: PathBuf,
}

impl CacheStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Names of every cache currently on disk, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn has(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.root.join(name).is_dir()
    }

    /// Open a cache, creating it if needed.
    pub fn open(&self, name: &str) -> Result<Cache> {
        validate_name(name)?;
        let dir = self.root.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(Cache {
            name: name.to_string(),
            dir,
        })
    }

    /// Delete a cache and everything in it. Returns false if it did not exist.
    pub fn delete(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&dir)?;
        debug!(cache = name, "Cache deleted");
        Ok(true)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(WisdomError::Config(format!("invalid cache name: {:?}", name)))
    }
}

/// One named cache of resources keyed by request path.
#[derive(Debug, Clone)]
pub struct Cache {
    name: String,
    dir: PathBuf,
}

impl Cache {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn entry_path(&self, request_path: &str) -> PathBuf {
        self.dir.join(format!("{}.json", entry_file_stem(request_path)))
    }

    fn load<T: DeserializeOwned>(&self, request_path: &str) -> Result<Option<CachedData<T>>> {
        let path = self.entry_path(request_path);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn put(&self, resource: &Resource) -> Result<()> {
        let cached = CachedData::new(resource);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(self.entry_path(&resource.path), contents)?;
        Ok(())
    }

    /// Entry stored for exactly `request_path`, if any.
    pub fn match_path(&self, request_path: &str) -> Result<Option<CachedData<Resource>>> {
        let hit: Option<CachedData<Resource>> = self.load(request_path)?;
        Ok(hit.filter(|cached| {
            let same = cached.data.path == request_path;
            if !same {
                debug!(cache = %self.name, request_path, stored = %cached.data.path, "Entry belongs to another path");
            }
            same
        }))
    }

    /// Every entry in the cache, in file name order.
    pub fn entries(&self) -> Result<Vec<CachedData<Resource>>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = std::fs::read_to_string(&path)?;
            entries.push(serde_json::from_str(&contents)?);
        }
        Ok(entries)
    }
}

/// File stem for a request path. Bytes outside `[A-Za-z0-9.-]` are written
/// as `_XX` hex, so distinct paths never share a file.
fn entry_file_stem(request_path: &str) -> String {
    let mut stem = String::with_capacity(request_path.len() * 2);
    for byte in request_path.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("_{:02X}", byte));
        }
    }
    stem
}
