use std::sync::Arc;
use std::time::Duration;

use cached::{Cached, TimedCache};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::errors::ClientError;
use crate::session::Session;

const MARKET_DATA_PATH: &str = "/api/v1/market/data";
const SYMBOLS_PATH: &str = "/api/v1/symbols";

/// Market data is refreshed at most every 5 minutes.
const MARKET_DATA_TTL: Duration = Duration::from_secs(300);

/// The symbol list barely changes; refresh at most hourly.
const SYMBOLS_TTL: Duration = Duration::from_secs(3600);

/// TTL cache of raw JSON responses, keyed by request identity.
struct ResponseCache {
    cache: Arc<RwLock<TimedCache<String, Value>>>,
}

impl ResponseCache {
    fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Return the cached value for `key`, or run `fetcher` and cache its result.
    async fn get_or_fetch<F, Fut>(&self, key: String, fetcher: F) -> Result<Value, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Value, ClientError>>,
    {
        {
            let mut cache = self.cache.write().await;
            if let Some(value) = cache.cache_get(&key) {
                debug!("Cache hit for {key}");
                return Ok(value.clone());
            }
        }

        debug!("Cache miss for {key}");
        let value = fetcher().await?;

        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value.clone());
        Ok(value)
    }
}

/// Display-facing reader over an authenticated session.
///
/// Responses are memoized with per-endpoint TTLs so a rendering loop can
/// call these methods freely without hammering the API.
///
/// Unlike the core client, this layer is lenient: any fetch or decode
/// failure is logged and replaced with an empty result. Callers that need
/// to distinguish failures from empty data must use
/// [`crate::TickerChartClient`] instead.
pub struct DataFeed {
    session: Session,
    market_data: ResponseCache,
    symbols: ResponseCache,
}

impl DataFeed {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            market_data: ResponseCache::new(MARKET_DATA_TTL),
            symbols: ResponseCache::new(SYMBOLS_TTL),
        }
    }

    /// Market data for `symbol`, or an empty object if the fetch fails.
    pub async fn market_data(&self, symbol: &str) -> Value {
        let result = self
            .market_data
            .get_or_fetch(symbol.to_string(), || async move {
                self.session
                    .get(MARKET_DATA_PATH, &[("symbol", symbol)])
                    .await
            })
            .await;

        match result {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to fetch market data for {symbol}: {e}");
                Value::Object(serde_json::Map::new())
            }
        }
    }

    /// The list of available symbols, or an empty array if the fetch fails.
    pub async fn symbols(&self) -> Value {
        let result = self
            .symbols
            .get_or_fetch("symbols".to_string(), || async move {
                self.session.get(SYMBOLS_PATH, &[]).await
            })
            .await;

        match result {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to fetch symbols: {e}");
                Value::Array(Vec::new())
            }
        }
    }
}
