//! Member Types
//!
//! Types describing a registered member and the identity claim derived from
//! it. These are shared between the credential store, the token and session
//! services, and the HTTP responses.
//!
//! # Member IDs
//!
//! Member IDs are rendered as `M` followed by a zero-padded decimal number
//! (`M0001`, `M0042`). [`MemberId`] keeps the number and does the parsing and
//! formatting in one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Prefix of every rendered member ID
const MEMBER_ID_PREFIX: char = 'M';

/// Minimum number of digits after the prefix
const MEMBER_ID_WIDTH: usize = 4;

/// Error returned when a string is not a well-formed member ID
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed member id '{raw}': {reason}")]
pub struct MemberIdError {
    /// The rejected input
    pub raw: String,
    /// What was wrong with it
    pub reason: &'static str,
}

/// Externally visible member identifier (`M####`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u32);

impl MemberId {
    /// ID assigned to the first member of an empty store
    pub const FIRST: MemberId = MemberId(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The ID that follows this one, or `None` past the largest ID
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse an `M####` string
    pub fn parse(raw: &str) -> Result<Self, MemberIdError> {
        let fail = |reason| MemberIdError {
            raw: raw.to_string(),
            reason,
        };

        let digits = raw
            .strip_prefix(MEMBER_ID_PREFIX)
            .ok_or_else(|| fail("missing 'M' prefix"))?;

        if digits.len() < MEMBER_ID_WIDTH {
            return Err(fail("expected at least four digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail("non-digit characters after prefix"));
        }

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| fail("number out of range"))
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", MEMBER_ID_PREFIX, self.0, width = MEMBER_ID_WIDTH)
    }
}

impl FromStr for MemberId {
    type Err = MemberIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MemberId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A registered member as persisted in the member file
///
/// Field names match the on-disk layout: `username`, `password`, `id`,
/// and an optional `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Display name, unique across the store
    pub username: String,
    /// Stored credential secret (plain text or a bcrypt hash, per scheme)
    pub password: String,
    /// Member ID
    pub id: MemberId,
    /// Optional role such as `admin` or `user`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl MemberRecord {
    /// Identity claim for this member
    pub fn claim(&self) -> Claim {
        Claim {
            identity: self.username.clone(),
            member_id: self.id,
            role: self.role.clone(),
        }
    }
}

/// Identity payload carried by a token or a session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Member username
    pub identity: String,
    /// Member ID
    pub member_id: MemberId,
    /// Member role, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claim {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }
}

/// Member information that is safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub username: String,
    pub id: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&MemberRecord> for MemberSummary {
    fn from(record: &MemberRecord) -> Self {
        Self {
            username: record.username.clone(),
            id: record.id,
            role: record.role.clone(),
        }
    }
}
