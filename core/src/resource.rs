//! Per-kind resource paths and the `Resource` trait.
//!
//! # Design
//! The three entity kinds share one request pattern but not one path shape:
//! engineers live under a plural root, teams under singular ones, and
//! get-by-id inserts an `/id` segment that update and delete do not. The
//! shapes are data in `PATHS`, so every operation formats its URL from the
//! same table instead of repeating per-kind logic.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{Engineer, NewEngineer, Team, TeamRequest};

/// Entity kinds served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Engineer,
    Dev,
    Ops,
}

/// Path shape of one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePaths {
    /// Collection root, used by list and create.
    pub root: &'static str,
    /// Segment inserted between root and id for get-by-id.
    pub get_prefix: &'static str,
}

const PATHS: [ResourcePaths; 3] = [
    ResourcePaths { root: "/engineers", get_prefix: "/id" },
    ResourcePaths { root: "/dev", get_prefix: "/id" },
    ResourcePaths { root: "/op", get_prefix: "/id" },
];

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Engineer, ResourceKind::Dev, ResourceKind::Ops];

    pub fn paths(self) -> &'static ResourcePaths {
        match self {
            ResourceKind::Engineer => &PATHS[0],
            ResourceKind::Dev => &PATHS[1],
            ResourceKind::Ops => &PATHS[2],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Engineer => "engineer",
            ResourceKind::Dev => "dev",
            ResourceKind::Ops => "ops",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ResourcePaths {
    /// `GET {root}` and `POST {root}`.
    pub fn collection(&self) -> String {
        self.root.to_string()
    }

    /// `GET {root}/id/{id}`.
    pub fn lookup(&self, id: &str) -> String {
        format!("{}{}/{id}", self.root, self.get_prefix)
    }

    /// `PUT {root}/{id}` and `DELETE {root}/{id}`.
    pub fn member(&self, id: &str) -> String {
        format!("{}/{id}", self.root)
    }
}

/// Binds a marker type to its kind, received entity and submission shape.
pub trait Resource {
    const KIND: ResourceKind;

    /// Entity as returned by the server.
    type Entity: DeserializeOwned;

    /// Payload sent on create and update.
    type Submission: Serialize;
}

/// `/engineers`
#[derive(Debug, Clone, Copy)]
pub struct Engineers;

/// `/dev`
#[derive(Debug, Clone, Copy)]
pub struct Devs;

/// `/op`
#[derive(Debug, Clone, Copy)]
pub struct Ops;

impl Resource for Engineers {
    const KIND: ResourceKind = ResourceKind::Engineer;
    type Entity = Engineer;
    type Submission = NewEngineer;
}

impl Resource for Devs {
    const KIND: ResourceKind = ResourceKind::Dev;
    type Entity = Team;
    type Submission = TeamRequest;
}

impl Resource for Ops {
    const KIND: ResourceKind = ResourceKind::Ops;
    type Entity = Team;
    type Submission = TeamRequest;
}
