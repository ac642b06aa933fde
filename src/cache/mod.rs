//! Key/value cache used in front of slow-changing reads.
//!
//! Two backends: [`RedisCache`] for deployments and [`MemoryCache`], an
//! in-process TTL map used when no Redis URL is configured.

mod memory;
mod redis;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;
use crate::error::Result;

/// Cache key holding the serialized reference lists.
pub const REFERENCE_DATA_KEY: &str = "static_data";

/// How long cached reference lists stay valid.
pub const REFERENCE_DATA_TTL: Duration = Duration::from_secs(2 * 60 * 60);

#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;
}

/// Picks the cache backend for a server.
///
/// An unreachable or malformed Redis URL is logged and replaced by a
/// [`MemoryCache`], so the server still starts and serves reads.
pub async fn open(redis_url: Option<&str>) -> Arc<dyn Cache> {
    let Some(url) = redis_url else {
        tracing::info!("No Redis URL configured, caching reference data in process");
        return Arc::new(MemoryCache::new());
    };

    match RedisCache::connect(url).await {
        Ok(cache) => {
            tracing::info!("Caching reference data in Redis");
            Arc::new(cache)
        }
        Err(e) => {
            tracing::warn!("Redis unavailable ({e}), caching reference data in process");
            Arc::new(MemoryCache::new())
        }
    }
}
