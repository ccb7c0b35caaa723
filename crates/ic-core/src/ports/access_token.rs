//! Bearer-credential collaborator port.
//!
//! A missing token must never fail a call: requests simply go out without
//! the authorization header and the service's own auth errors surface
//! through the normal failure path.

use async_trait::async_trait;

#[async_trait]
pub trait AccessTokenPort: Send + Sync {
    async fn token(&self) -> Option<String>;

    async fn store(&self, token: String);

    async fn clear(&self);
}
