//! In-memory access token table.
//!
//! Tokens are keyed by their SHA-256 digest so the raw bearer values never sit
//! in the table. Not durable: all tokens are lost on process restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AuthError, AuthResult};
use crate::identity::IdentityResolver;

/// Length of generated access and refresh tokens.
const TOKEN_LEN: usize = 48;

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token presented on each request.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: String,
}

/// A row of the token table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Owner of the token.
    pub user_id: String,
    /// Digest of the paired refresh token.
    pub refresh_token_hash: String,
    /// When the pair was recorded.
    pub issued_at: DateTime<Utc>,
}

/// In-memory token table implementing [`IdentityResolver`].
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    tokens: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl std::fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

impl MemoryTokenStore {
    /// Create an empty token table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token pair obtained elsewhere (e.g. from an identity provider).
    ///
    /// Saving an access token that is already present rebinds it.
    pub async fn save(&self, access_token: &str, refresh_token: &str, user_id: impl Into<String>) {
        let user_id = user_id.into();
        let record = TokenRecord {
            user_id: user_id.clone(),
            refresh_token_hash: hash_token(refresh_token),
            issued_at: Utc::now(),
        };

        self.tokens
            .write()
            .await
            .insert(hash_token(access_token), record);

        tracing::debug!(user_id = %user_id, "Saved access token");
    }

    /// Generate and record a new random token pair for a user.
    pub async fn issue(&self, user_id: impl Into<String>) -> TokenPair {
        let pair = TokenPair {
            access_token: generate_token(),
            refresh_token: generate_token(),
        };
        self.save(&pair.access_token, &pair.refresh_token, user_id)
            .await;
        pair
    }

    /// Look up the row for an access token.
    pub async fn find(&self, access_token: &str) -> Option<TokenRecord> {
        self.tokens
            .read()
            .await
            .get(&hash_token(access_token))
            .cloned()
    }

    /// Remove an access token.
    ///
    /// # Returns
    ///
    /// `true` if the token was present
    pub async fn revoke(&self, access_token: &str) -> bool {
        self.tokens
            .write()
            .await
            .remove(&hash_token(access_token))
            .is_some()
    }

    /// Remove every token held by a user.
    ///
    /// # Returns
    ///
    /// The number of tokens removed
    pub async fn revoke_user(&self, user_id: &str) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, record| record.user_id != user_id);
        before - tokens.len()
    }
}

#[async_trait]
impl IdentityResolver for MemoryTokenStore {
    async fn resolve(&self, access_token: &str) -> AuthResult<String> {
        if access_token.is_empty() {
            return Err(AuthError::InvalidToken("empty access token".to_string()));
        }

        self.find(access_token)
            .await
            .map(|record| record.user_id)
            .ok_or(AuthError::Unauthenticated)
    }
}

fn generate_token() -> String {
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let hash = hasher.finalize();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_saved_token_resolves() {
        let store = MemoryTokenStore::new();
        store.save("access-1", "refresh-1", "alice").await;

        assert_eq!(store.resolve("access-1").await.unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let store = MemoryTokenStore::new();

        let err = store.resolve("nope").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_empty_token_is_invalid() {
        let store = MemoryTokenStore::new();

        let err = store.resolve("").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_issued_tokens_are_distinct() {
        let store = MemoryTokenStore::new();
        let a = store.issue("alice").await;
        let b = store.issue("alice").await;

        assert_eq!(a.access_token.len(), TOKEN_LEN);
        assert_ne!(a.access_token, b.access_token);
        assert_ne!(a.access_token, a.refresh_token);
        assert_eq!(store.resolve(&b.access_token).await.unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_raw_tokens_are_not_stored() {
        let store = MemoryTokenStore::new();
        store.save("access-1", "refresh-1", "alice").await;

        let tokens = store.tokens.read().await;
        assert!(!tokens.contains_key("access-1"));
        let record = tokens.values().next().unwrap();
        assert_ne!(record.refresh_token_hash, "refresh-1");
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = MemoryTokenStore::new();
        let pair = store.issue("alice").await;

        assert!(store.revoke(&pair.access_token).await);
        assert!(!store.revoke(&pair.access_token).await);
        assert!(store.find(&pair.access_token).await.is_none());
    }

    #[tokio::test]
    async fn test_revoke_user() {
        let store = MemoryTokenStore::new();
        store.issue("alice").await;
        store.issue("alice").await;
        let bob = store.issue("bob").await;

        assert_eq!(store.revoke_user("alice").await, 2);
        assert_eq!(store.resolve(&bob.access_token).await.unwrap(), "bob");
    }
}
