//! In-Memory Token Store
//!
//! Keeps the remembered token for the lifetime of the process.

use tokio::sync::RwLock;

use crate::domain::collaborator::TokenStore;
use crate::domain::token::AuthToken;
use crate::error::LoginResult;

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<AuthToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    /// Forget the stored token
    pub async fn clear(&self) {
        self.token.write().await.take();
    }
}

impl TokenStore for InMemoryTokenStore {
    async fn save(&self, token: &AuthToken) -> LoginResult<()> {
        *self.token.write().await = Some(token.clone());
        tracing::debug!(expires_at = %token.expires_at, "Token stored in memory");
        Ok(())
    }

    async fn get(&self) -> LoginResult<Option<AuthToken>> {
        Ok(self.token.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_save_replaces_and_clear_forgets() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.get().await.unwrap(), None);

        let first = AuthToken::new("one", DateTime::from_timestamp_millis(1).unwrap());
        let second = AuthToken::new("two", DateTime::from_timestamp_millis(2).unwrap());
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(second));

        store.clear().await;
        assert_eq!(store.get().await.unwrap(), None);
    }
}
