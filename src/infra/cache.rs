//! Redis-backed cache for rendered views.
//!
//! A view is the JSON body produced for a path (plus its query string).
//! Mutations call [`ViewCache::revalidate`] so the next request for that
//! path recomputes the view from the database.
//!
//! Each path carries a generation counter that `revalidate` bumps. A body
//! rendered from data read under an older generation is never stored, so a
//! render that overlaps a mutation cannot repopulate the cache with stale rows.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError, Script};

use super::HealthProbe;
use crate::config::{Config, CACHE_HEALTH_KEY, CACHE_PREFIX_VIEW, CACHE_PREFIX_VIEW_GENERATION};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stores `ARGV[2]` under `KEYS[2]` for `ARGV[3]` seconds only while the
/// generation at `KEYS[1]` still equals `ARGV[1]`.
const STORE_IF_CURRENT: &str = r"
if tonumber(redis.call('GET', KEYS[1]) or '0') ~= tonumber(ARGV[1]) then
    return 0
end
redis.call('SET', KEYS[2], ARGV[2], 'EX', ARGV[3])
return 1
";

/// Cache of rendered views keyed by request path.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Get the cached body for a view key (`<path>` or `<path>?<query>`).
    async fn get_view(&self, key: &str) -> AppResult<Option<String>>;

    /// Current generation of `path`. Read it before loading the data a
    /// view is rendered from.
    async fn generation(&self, path: &str) -> AppResult<u64>;

    /// Store a rendered body for a view key of `path`, unless `path` was
    /// revalidated after `generation` was read. Returns whether it was stored.
    async fn put_view(
        &self,
        path: &str,
        key: &str,
        body: String,
        generation: u64,
    ) -> AppResult<bool>;

    /// Drop the cached view for `path` and every query variant of it.
    async fn revalidate(&self, path: &str) -> AppResult<()>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    view_ttl: u64,
    store_if_current: Script,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self {
            connection,
            view_ttl: config.view_cache_ttl_seconds,
            store_if_current: Script::new(STORE_IF_CURRENT),
        })
    }

    /// Get a raw string value.
    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    /// Delete all keys matching a pattern.
    /// Uses UNLINK for non-blocking async deletion in Redis.
    pub async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(pattern).await?;

        if keys.is_empty() {
            return Ok(0);
        }

        let count = keys.len() as u64;

        // Fall back to DEL on servers without UNLINK (Redis < 4.0)
        let unlinked: Result<i64, RedisError> =
            redis::cmd("UNLINK").arg(&keys).query_async(&mut conn).await;
        if unlinked.is_err() {
            let _: i64 = conn.del(&keys).await?;
        }

        Ok(count)
    }
}

#[async_trait]
impl ViewCache for Cache {
    async fn get_view(&self, key: &str) -> AppResult<Option<String>> {
        self.get(&view_key(key)).await
    }

    async fn generation(&self, path: &str) -> AppResult<u64> {
        let mut conn = self.connection.clone();
        let generation: Option<u64> = conn.get(generation_key(path)).await?;
        Ok(generation.unwrap_or(0))
    }

    async fn put_view(
        &self,
        path: &str,
        key: &str,
        body: String,
        generation: u64,
    ) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let stored: i64 = self
            .store_if_current
            .key(generation_key(path))
            .key(view_key(key))
            .arg(generation)
            .arg(body)
            .arg(self.view_ttl)
            .invoke_async(&mut conn)
            .await?;
        Ok(stored == 1)
    }

    async fn revalidate(&self, path: &str) -> AppResult<()> {
        // Bump first so renders already in flight cannot store their body
        let mut conn = self.connection.clone();
        let generation: u64 = conn.incr(generation_key(path), 1).await?;

        self.delete(&view_key(path)).await?;
        let dropped = self.delete_pattern(&variants_pattern(path)).await?;
        tracing::debug!(path, generation, dropped, "Revalidated cached view");
        Ok(())
    }
}

#[async_trait]
impl HealthProbe for Cache {
    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: bool = conn.exists(CACHE_HEALTH_KEY).await?;
        Ok(())
    }
}

/// Redis key for a view key.
fn view_key(key: &str) -> String {
    format!("{}{}", CACHE_PREFIX_VIEW, key)
}

/// Redis key of the revalidation counter of a path.
fn generation_key(path: &str) -> String {
    format!("{}{}", CACHE_PREFIX_VIEW_GENERATION, path)
}

/// Glob pattern matching every query variant (`<path>?...`) of a path.
fn variants_pattern(path: &str) -> String {
    format!("{}{}\\?*", CACHE_PREFIX_VIEW, escape_glob(path))
}

/// Escape Redis glob metacharacters so a path matches only itself.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
