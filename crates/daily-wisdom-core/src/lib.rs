//! Daily Wisdom core library.
//!
//! One piece of trivia per day, chosen deterministically from the day of the
//! year, with notification preferences and an offline cache of the static
//! assets. Platform concerns (storage, network, permissions, display) are
//! traits so everything here runs without a browser.

pub mod api;
pub mod app;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod selector;
pub mod storage;
pub mod utils;

pub use api::{Fetcher, HttpFetcher, OfflineFetcher, Resource};
pub use app::DailyWisdom;
pub use cache::{CacheManager, CacheStorage, ServedFrom};
pub use catalog::{default_catalog, load_catalog, Catalog, CatalogOrigin, CatalogSource};
pub use config::Config;
pub use error::{Result, WisdomError};
pub use models::{DailySelection, NotificationPayload, NotificationTime, Preferences, Wisdom};
pub use selector::{day_of_year, select_today};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
