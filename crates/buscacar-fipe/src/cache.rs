//! Single-slot TTL cache for the FIPE brand listing.
//!
//! The brand listing fans out into one upstream request per brand, so it is
//! cached for an hour by default. The slot lock is held across a refresh:
//! callers that arrive while a refresh is in flight wait for it and then read
//! the fresh value instead of starting their own.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::types::BrandWithModels;

/// Cache for [`crate::FipeClient::list_brands_with_models`].
pub type BrandCache = TtlCache<Vec<BrandWithModels>>;

#[derive(Debug)]
struct Entry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T> TtlCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value, or runs `fetch` and caches its result if the
    /// slot is empty or older than the TTL.
    ///
    /// # Errors
    ///
    /// Returns the error from `fetch`. A failed refresh leaves any previous
    /// value in place, so it is still used by [`TtlCache::peek`].
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                tracing::debug!("serving cached value");
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(fetch().await?);
        *slot = Some(Entry {
            value: Arc::clone(&value),
            fetched_at: Instant::now(),
        });
        tracing::debug!(ttl_secs = self.ttl.as_secs(), "cache refreshed");
        Ok(value)
    }

    /// Returns the current value regardless of age, without fetching.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot
            .lock()
            .await
            .as_ref()
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Drops the cached value so the next read refetches.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
