//! OAuth client summaries, as embedded in access-token auth contexts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier of a registered OAuth client.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OauthClientId(Uuid);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid OAuth client id: {0}")]
pub struct OauthClientIdParseError(String);

impl OauthClientId {
    pub const fn from_uuid(inner: Uuid) -> Self {
        Self(inner)
    }
}

impl FromStr for OauthClientId {
    type Err = OauthClientIdParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| OauthClientIdParseError(raw.to_string()))
    }
}

impl fmt::Display for OauthClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable key of a well-known OAuth client, e.g. `eternalfest@clients`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OauthClientKey(String);

impl OauthClientKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OauthClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimal OAuth client reference embedded in other payloads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortOauthClient {
    pub id: OauthClientId,
    pub key: Option<OauthClientKey>,
    pub display_name: String,
}
