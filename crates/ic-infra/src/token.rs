//! In-memory bearer-token store.
//!
//! The token lives for the process only: closing the app logs the
//! operator out, and an absent token simply sends requests without an
//! authorization header.

use async_trait::async_trait;
use tokio::sync::RwLock;

use ic_core::ports::AccessTokenPort;

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl AccessTokenPort for InMemoryTokenStore {
    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn store(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    async fn clear(&self) {
        *self.token.write().await = None;
    }
}
