//! User identifiers and user records.
//!
//! A user is exposed by the API at three levels of detail: `ShortUser` (id and
//! display name only), `User` (adds administrator status) and `CompleteUser`
//! (adds private fields, only visible to the user themself or an
//! administrator). `GET /users/{id}` returns either of the last two depending
//! on the caller; `MaybeCompleteUser` models that union.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier of an Eternaltwin user (a UUID on the wire).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(Uuid);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid user id: {0}")]
pub struct UserIdParseError(String);

impl UserId {
    pub const fn from_uuid(inner: Uuid) -> Self {
        Self(inner)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(inner: Uuid) -> Self {
        Self(inner)
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserIdParseError(raw.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public display name of a user.
///
/// Must start with a letter, underscore, space or parenthesis; digits are
/// allowed from the second character on.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct UserDisplayName(String);

static USER_DISPLAY_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Letter}_ ()][\p{Letter}_ ()0-9]*$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid user display name: {0:?}")]
pub struct UserDisplayNameParseError(String);

impl UserDisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserDisplayName {
    type Err = UserDisplayNameParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if USER_DISPLAY_NAME_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(UserDisplayNameParseError(raw.to_string()))
        }
    }
}

impl TryFrom<String> for UserDisplayName {
    type Error = UserDisplayNameParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<UserDisplayName> for String {
    fn from(value: UserDisplayName) -> Self {
        value.0
    }
}

impl fmt::Display for UserDisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login name of a user: 2 to 32 chars, lowercase alphanumeric or underscore,
/// no leading digit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-z_][a-z0-9_]{1,31}$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid username: {0:?}")]
pub struct UsernameParseError(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = UsernameParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if USERNAME_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(UsernameParseError(raw.to_string()))
        }
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded value of a user's display name.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserDisplayNameVersion {
    pub value: UserDisplayName,
}

/// Display-name history of a user. The API currently only exposes the
/// `current` version.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserDisplayNameVersions {
    pub current: UserDisplayNameVersion,
}

/// Minimal user reference embedded in other payloads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortUser {
    pub id: UserId,
    pub display_name: UserDisplayNameVersions,
}

/// Public view of a user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct User {
    pub id: UserId,
    pub display_name: UserDisplayNameVersions,
    pub is_administrator: bool,
}

/// Private view of a user, only returned to the user themself or to an
/// administrator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompleteUser {
    pub id: UserId,
    pub display_name: UserDisplayNameVersions,
    pub is_administrator: bool,
    pub created_at: DateTime<Utc>,
    pub username: Option<Username>,
    pub email_address: Option<String>,
    pub has_password: bool,
}

/// Either the public or the private view of a user.
///
/// On the wire the two shapes share a common prefix; complete payloads are
/// recognized by the presence of `has_password` (and the other private
/// fields), so the complete shape must be tried first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum MaybeCompleteUser {
    Complete(CompleteUser),
    Simple(User),
}

impl MaybeCompleteUser {
    pub fn id(&self) -> UserId {
        match self {
            Self::Complete(user) => user.id,
            Self::Simple(user) => user.id,
        }
    }

    pub fn display_name(&self) -> &UserDisplayNameVersions {
        match self {
            Self::Complete(user) => &user.display_name,
            Self::Simple(user) => &user.display_name,
        }
    }

    pub fn is_administrator(&self) -> bool {
        match self {
            Self::Complete(user) => user.is_administrator,
            Self::Simple(user) => user.is_administrator,
        }
    }
}

impl From<User> for ShortUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
        }
    }
}

impl From<CompleteUser> for ShortUser {
    fn from(user: CompleteUser) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
        }
    }
}

impl From<CompleteUser> for User {
    fn from(user: CompleteUser) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
            is_administrator: user.is_administrator,
        }
    }
}

impl From<MaybeCompleteUser> for ShortUser {
    fn from(user: MaybeCompleteUser) -> Self {
        match user {
            MaybeCompleteUser::Complete(user) => user.into(),
            MaybeCompleteUser::Simple(user) => user.into(),
        }
    }
}
