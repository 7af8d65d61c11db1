//! Wire entities for the devops API.
//!
//! # Design
//! Engineers appear in two shapes. A team received from the server embeds
//! fully populated `Engineer` values, while a team submitted to the server
//! carries only `EngineerRef` references. Keeping the two as separate types
//! makes the submit/receive asymmetry visible in signatures.
//!
//! Received shapes default missing fields to empty strings because the
//! backend may echo bare references; unknown fields are ignored by serde.
//! A `null` engineer list reads as empty.

use serde::{Deserialize, Deserializer, Serialize};

/// An engineer as returned by the server. `id` is empty until created.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Engineer {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Reference to an existing engineer inside a team submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineerRef {
    pub id: String,
}

impl EngineerRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&Engineer> for EngineerRef {
    fn from(engineer: &Engineer) -> Self {
        Self::new(engineer.id.clone())
    }
}

/// Request payload for creating or updating an engineer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEngineer {
    pub name: String,
    pub email: String,
}

/// A Dev or Ops team as returned by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub engineers: Vec<Engineer>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Team {
    /// Engineer ids in server order.
    pub fn engineer_ids(&self) -> Vec<String> {
        self.engineers.iter().map(|e| e.id.clone()).collect()
    }
}

/// Request payload for creating or updating a Dev or Ops team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRequest {
    pub name: String,
    pub engineers: Vec<EngineerRef>,
}

impl TeamRequest {
    pub fn new<I, S>(name: impl Into<String>, engineer_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            engineers: engineer_ids.into_iter().map(EngineerRef::new).collect(),
        }
    }
}
