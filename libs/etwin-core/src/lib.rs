//! Wire-level domain model of the Eternaltwin API.
//!
//! The types in this crate mirror the JSON payloads of the production API at
//! `https://eternal-twin.net/api/v1`. Field names on the wire are snake_case;
//! deserialization ignores unknown fields so clients keep working when the
//! server grows its payloads (e.g. the cross-platform `links` object).

pub mod auth;
pub mod oauth;
pub mod user;
