//! Thought models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::Label;
use crate::{Error, Result};

/// Identifier of a thought.
///
/// Wraps a random (v4) UUID. Conversion to and from text goes through
/// [`ThoughtId::parse`] and `Display`, both for JSON and for the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThoughtId(Uuid);

impl ThoughtId {
    /// Generate a fresh identifier from the OS random source.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the canonical hyphenated UUID form.
    pub fn parse(s: &str) -> Result<Self> {
        // 36 chars rules out the simple, braced and urn forms.
        if s.len() != 36 {
            return Err(Error::InvalidInput(format!("Invalid thought id '{}'", s)));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("Invalid thought id '{}': {}", s, e)))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ThoughtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for ThoughtId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ThoughtId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A title + content note, the primary persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub id: ThoughtId,
    pub title: String,
    pub content: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// One thought paired with one of its labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtWithLabels {
    pub thought: Thought,
    pub labels: Label,
}
