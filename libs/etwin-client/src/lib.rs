//! Client for the Eternaltwin API.
//!
//! The [`EtwinClient`] trait is the seam between consumers and transport:
//! [`HttpEtwinClient`] talks to a live server over HTTPS, while
//! [`MemEtwinClient`] serves seeded data for tests and offline use.

pub mod error;
pub mod http;
pub mod mem;

use async_trait::async_trait;

use etwin_core::auth::AuthContext;
use etwin_core::user::{MaybeCompleteUser, UserId};

pub use crate::error::ClientError;
pub use crate::http::HttpEtwinClient;
pub use crate::mem::MemEtwinClient;

/// Credential presented with each request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// Anonymous access: no `Authorization` header.
    Guest,
    /// OAuth access token, sent as `Authorization: Bearer <token>`.
    Token(String),
}

impl Auth {
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }
}

/// Operations exposed by the Eternaltwin API.
#[async_trait]
pub trait EtwinClient: Send + Sync {
    /// Resolve the caller's credential into an auth context
    /// (`GET /auth/self`).
    async fn get_self(&self, auth: &Auth) -> Result<AuthContext, ClientError>;

    /// Fetch a user by id (`GET /users/{id}`). The server returns the
    /// complete view when `auth` resolves to that user or to an
    /// administrator.
    async fn get_user(&self, auth: &Auth, user_id: UserId) -> Result<MaybeCompleteUser, ClientError>;
}
