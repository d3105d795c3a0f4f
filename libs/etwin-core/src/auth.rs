//! Authentication contexts.
//!
//! `GET /auth/self` resolves the caller's credential into one of three
//! contexts, discriminated on the wire by a `type` field: `Guest` for
//! anonymous callers, `User` for session-authenticated users and
//! `AccessToken` for OAuth access tokens (which identify both the user and
//! the OAuth client acting on their behalf).

use serde::{Deserialize, Serialize};

use crate::oauth::ShortOauthClient;
use crate::user::ShortUser;

/// Permission scope attached to a credential. Only one scope exists today.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthScope {
    Default,
}

/// Context for an anonymous caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(tag = "type", rename = "Guest")]
pub struct GuestAuthContext {
    pub scope: AuthScope,
}

/// Context for a caller authenticated as a user (session cookie or
/// credentials).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(tag = "type", rename = "User")]
pub struct UserAuthContext {
    pub scope: AuthScope,
    pub user: ShortUser,
    pub is_administrator: bool,
}

/// Context for a caller authenticated through an OAuth access token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(tag = "type", rename = "AccessToken")]
pub struct AccessTokenAuthContext {
    pub scope: AuthScope,
    pub client: ShortOauthClient,
    pub user: ShortUser,
}

/// Resolved identity of a caller, as returned by `GET /auth/self`.
///
/// Untagged: each inner struct carries its own `type` tag, which serde uses
/// to pick the matching variant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum AuthContext {
    Guest(GuestAuthContext),
    User(UserAuthContext),
    AccessToken(AccessTokenAuthContext),
}

impl AuthContext {
    /// The user this context resolves to, if any.
    pub fn user(&self) -> Option<&ShortUser> {
        match self {
            Self::Guest(_) => None,
            Self::User(ctx) => Some(&ctx.user),
            Self::AccessToken(ctx) => Some(&ctx.user),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}
