//! # Grant Authentication
//!
//! Access-token identity resolution for the grant permission service.
//!
//! ## Overview
//!
//! The grant-auth crate handles:
//! - **Identity resolution**: The [`IdentityResolver`] seam mapping an opaque
//!   access token to a user ID
//! - **Token table**: [`MemoryTokenStore`], an in-process table of issued
//!   access/refresh token pairs that implements the resolver
//! - **Errors**: [`AuthError`] and HTTP mapping helpers
//!
//! Exchanging authorization codes with an external identity provider is not
//! part of this crate; callers that complete such an exchange record the
//! resulting tokens with [`MemoryTokenStore::save`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use grant_auth::{IdentityResolver, MemoryTokenStore};
//!
//! async fn resolve_example() {
//!     let tokens = MemoryTokenStore::new();
//!     let pair = tokens.issue("alice").await;
//!
//!     let user_id = tokens.resolve(&pair.access_token).await.unwrap();
//!     assert_eq!(user_id, "alice");
//! }
//! ```

pub mod error;
pub mod identity;
pub mod token;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use identity::IdentityResolver;
pub use token::{MemoryTokenStore, TokenPair, TokenRecord};
