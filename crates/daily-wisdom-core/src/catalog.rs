//! Loading the wisdom catalog.
//!
//! Sources are tried in order: a local JSON file, the current offline cache,
//! then the network. If all of them fail, the embedded default list is used;
//! a broken catalog never stops the app from starting.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::api::Fetcher;
use crate::cache::CacheManager;
use crate::error::{Result, WisdomError};
use crate::models::Wisdom;

/// Request path of the catalog in the offline cache and on the network.
pub const CATALOG_PATH: &str = "/anecdotes.json";

/// Where the catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    File,
    Cache,
    Network,
    Embedded,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CatalogOrigin::File => "local file",
            CatalogOrigin::Cache => "offline cache",
            CatalogOrigin::Network => "network",
            CatalogOrigin::Embedded => "built-in list",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub items: Vec<Wisdom>,
    pub origin: CatalogOrigin,
}

/// Where to look for the catalog.
#[derive(Default)]
pub struct CatalogSource<'a> {
    pub file: Option<PathBuf>,
    pub cache: Option<&'a CacheManager>,
    pub fetcher: Option<&'a dyn Fetcher>,
}

/// Parse a catalog body. An empty list is rejected.
pub fn parse_catalog(body: &str) -> Result<Vec<Wisdom>> {
    let items: Vec<Wisdom> = serde_json::from_str(body)?;
    if items.is_empty() {
        return Err(WisdomError::NoItems);
    }
    Ok(items)
}

/// Load the catalog, falling back to the embedded list.
pub async fn load_catalog(source: &CatalogSource<'_>) -> Catalog {
    if let Some(ref path) = source.file {
        match std::fs::read_to_string(path)
            .map_err(WisdomError::from)
            .and_then(|body| parse_catalog(&body))
        {
            Ok(items) => return loaded(items, CatalogOrigin::File),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to load catalog file"),
        }
    }

    if let Some(cache) = source.cache {
        if let Some(resource) = cache.lookup(CATALOG_PATH) {
            match parse_catalog(&resource.body) {
                Ok(items) => return loaded(items, CatalogOrigin::Cache),
                Err(e) => warn!(error = %e, "Cached catalog is unusable"),
            }
        } else {
            debug!("Catalog not in cache");
        }
    }

    if let Some(fetcher) = source.fetcher {
        match fetcher
            .fetch(CATALOG_PATH)
            .await
            .and_then(|resource| parse_catalog(&resource.body))
        {
            Ok(items) => return loaded(items, CatalogOrigin::Network),
            Err(e) => warn!(error = %e, "Failed to fetch catalog"),
        }
    }

    warn!("Using embedded default catalog");
    Catalog {
        items: default_catalog(),
        origin: CatalogOrigin::Embedded,
    }
}

fn loaded(items: Vec<Wisdom>, origin: CatalogOrigin) -> Catalog {
    info!(count = items.len(), ?origin, "Catalog loaded");
    Catalog { items, origin }
}

/// Built-in list used when nothing else loads.
pub fn default_catalog() -> Vec<Wisdom> {
    vec![
        Wisdom::new(
            1,
            "In 1518 a 'dancing plague' struck Strasbourg: hundreds of people danced \
             without stopping for days, some until they collapsed. The cause is still a mystery.",
            "History",
            "📜",
        ),
        Wisdom::new(
            2,
            "Honey never spoils. Archaeologists have found 3,000-year-old pots of honey \
             in Egyptian tombs that were still perfectly edible.",
            "Science",
            "🔬",
        ),
        Wisdom::new(
            3,
            "Octopuses have three hearts and blue blood. Two hearts pump blood to the gills, \
             while the third pumps it to the rest of the body.",
            "Nature",
            "🌿",
        ),
    ]
}
