//! Access-token cache for the Sheets API.
//!
//! Keeps the last OAuth access token and hands it out until shortly before
//! it expires, so every sheet call does not mint a new token.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Tokens are treated as expired this long before their real expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Cache holding at most one access token.
#[derive(Debug, Default)]
pub struct TokenCache {
    current: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token if it is still fresh.
    pub async fn get(&self) -> Option<String> {
        let current = self.current.lock().await;
        match &*current {
            Some(token) if Instant::now() + EXPIRY_MARGIN < token.expires_at => {
                Some(token.value.clone())
            }
            Some(_) => {
                debug!("Cached access token is about to expire");
                None
            }
            None => None,
        }
    }

    /// Stores a token valid for `lifetime` from now.
    pub async fn store(&self, value: String, lifetime: Duration) {
        let mut current = self.current.lock().await;
        *current = Some(CachedToken {
            value,
            expires_at: Instant::now() + lifetime,
        });
    }

    /// Drops the cached token, forcing a refresh on next use.
    pub async fn invalidate(&self) {
        let mut current = self.current.lock().await;
        *current = None;
    }
}
