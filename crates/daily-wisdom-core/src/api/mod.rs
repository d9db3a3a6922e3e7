//! Network access for static resources.
//!
//! `Fetcher` is the seam the cache manager and catalog loader fetch through.
//! `HttpFetcher` resolves request paths against a base URL with reqwest;
//! `OfflineFetcher` fails every request and is used when no base URL is set.

pub mod client;

pub use client::{Fetcher, HttpFetcher, OfflineFetcher, Resource};
