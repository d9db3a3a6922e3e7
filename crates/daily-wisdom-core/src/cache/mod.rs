//! Offline cache for static resources.
//!
//! `CacheStorage` keeps any number of named caches on disk, one directory per
//! cache and one JSON file per entry. `CacheManager` owns exactly one of them,
//! named with a version tag (`daily-wisdom-v1`), and implements the
//! install / activate / respond lifecycle:
//!
//! - install: fetch every precache path and store them all, or nothing
//! - activate: delete every cache whose name is not the current one
//! - respond: cache, then network, then the cached offline shell

pub mod manager;
pub mod storage;

pub use manager::{
    CacheManager, CacheStatus, ServedFrom, ServedResource, CACHE_PREFIX, DEFAULT_CACHE_VERSION,
    PRECACHE_PATHS,
};
pub use storage::{Cache, CacheStorage, CachedData};
