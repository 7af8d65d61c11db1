//! Bridges declared state and wire entities.
//!
//! # Design
//! Declared state is what the caller's state store keeps. For teams it
//! records engineers by id only, so `team_from_wire` drops names and emails
//! while keeping server order. `team_to_wire` turns each declared id into a
//! reference. `Reconcilable` attaches the projection pair to each resource
//! marker, and `Reconciler` runs the create/read/update/delete lifecycle a
//! scheduler drives, returning refreshed declared state.
//!
//! A read whose entity is gone (404) yields `ReadOutcome::Missing` so the
//! caller can drop its record instead of failing.

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::executor::Executor;
use crate::resource::{Devs, Engineers, Ops, Resource, ResourceKind};
use crate::transport::Transport;
use crate::types::{Engineer, NewEngineer, Team, TeamRequest};

/// Declared state of a Dev or Ops team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredTeam {
    /// Empty until the team has been created.
    pub id: String,
    pub name: String,
    pub engineers: Vec<String>,
}

impl DeclaredTeam {
    pub fn new<I, S>(name: impl Into<String>, engineers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: String::new(),
            name: name.into(),
            engineers: engineers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Declared state of an engineer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredEngineer {
    pub id: String,
    pub name: String,
    pub email: String,
}

pub fn team_to_wire(declared: &DeclaredTeam) -> TeamRequest {
    TeamRequest::new(declared.name.clone(), declared.engineers.iter().cloned())
}

pub fn team_from_wire(team: Team) -> DeclaredTeam {
    let engineers = team.engineer_ids();
    DeclaredTeam {
        id: team.id,
        name: team.name,
        engineers,
    }
}

pub fn engineer_to_wire(declared: &DeclaredEngineer) -> NewEngineer {
    NewEngineer {
        name: declared.name.clone(),
        email: declared.email.clone(),
    }
}

pub fn engineer_from_wire(engineer: Engineer) -> DeclaredEngineer {
    DeclaredEngineer {
        id: engineer.id,
        name: engineer.name,
        email: engineer.email,
    }
}

/// A resource whose entities project to and from declared state.
pub trait Reconcilable: Resource {
    type Declared;

    fn declared_id(declared: &Self::Declared) -> &str;
    fn to_wire(declared: &Self::Declared) -> Self::Submission;
    fn from_wire(entity: Self::Entity) -> Self::Declared;
}

impl Reconcilable for Engineers {
    type Declared = DeclaredEngineer;

    fn declared_id(declared: &DeclaredEngineer) -> &str {
        &declared.id
    }

    fn to_wire(declared: &DeclaredEngineer) -> NewEngineer {
        engineer_to_wire(declared)
    }

    fn from_wire(entity: Engineer) -> DeclaredEngineer {
        engineer_from_wire(entity)
    }
}

macro_rules! team_reconcilable {
    ($marker:ty) => {
        impl Reconcilable for $marker {
            type Declared = DeclaredTeam;

            fn declared_id(declared: &DeclaredTeam) -> &str {
                &declared.id
            }

            fn to_wire(declared: &DeclaredTeam) -> TeamRequest {
                team_to_wire(declared)
            }

            fn from_wire(entity: Team) -> DeclaredTeam {
                team_from_wire(entity)
            }
        }
    };
}

team_reconcilable!(Devs);
team_reconcilable!(Ops);

/// Result of refreshing declared state from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<D> {
    Present(D),
    /// The server no longer has the entity.
    Missing,
}

impl<D> ReadOutcome<D> {
    pub fn present(self) -> Option<D> {
        match self {
            ReadOutcome::Present(declared) => Some(declared),
            ReadOutcome::Missing => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        })
    }
}

/// A failed lifecycle step, with the operation and entity id it concerned.
#[derive(Debug, Error)]
#[error("could not {operation} {kind} {id:?}: {source}")]
pub struct ReconcileError {
    pub operation: Operation,
    pub kind: ResourceKind,
    pub id: String,
    #[source]
    pub source: ApiError,
}

/// Lifecycle operations for one resource kind, in declared-state terms.
pub struct Reconciler<'a, R, T> {
    executor: &'a Executor<T>,
    _kind: PhantomData<R>,
}

impl<T: Transport> Executor<T> {
    pub fn reconciler<R: Reconcilable>(&self) -> Reconciler<'_, R, T> {
        Reconciler {
            executor: self,
            _kind: PhantomData,
        }
    }
}

impl<'a, R: Reconcilable, T: Transport> Reconciler<'a, R, T> {
    /// Submits `declared` and returns the server's authoritative view.
    pub fn create(&self, declared: &R::Declared) -> Result<R::Declared, ReconcileError> {
        let created = self
            .executor
            .create::<R>(&R::to_wire(declared))
            .map_err(|e| self.error(Operation::Create, "", e))?;
        let created = R::from_wire(created);
        info!(kind = %R::KIND, id = R::declared_id(&created), "created");
        Ok(created)
    }

    pub fn read(&self, id: &str) -> Result<ReadOutcome<R::Declared>, ReconcileError> {
        match self.executor.get::<R>(id) {
            Ok(entity) => Ok(ReadOutcome::Present(R::from_wire(entity))),
            Err(err) if err.is_not_found() => {
                debug!(kind = %R::KIND, id, "entity no longer exists");
                Ok(ReadOutcome::Missing)
            }
            Err(err) => Err(self.error(Operation::Read, id, err)),
        }
    }

    /// Submits `declared` under its id, then re-reads the entity so the
    /// returned state reflects what the server stored.
    pub fn update(&self, declared: &R::Declared) -> Result<R::Declared, ReconcileError> {
        let id = R::declared_id(declared);
        self.executor
            .update::<R>(id, &R::to_wire(declared))
            .map_err(|e| self.error(Operation::Update, id, e))?;
        let refreshed = self
            .executor
            .get::<R>(id)
            .map_err(|e| self.error(Operation::Read, id, e))?;
        info!(kind = %R::KIND, id, "updated");
        Ok(R::from_wire(refreshed))
    }

    pub fn delete(&self, id: &str) -> Result<(), ReconcileError> {
        self.executor
            .delete::<R>(id)
            .map_err(|e| self.error(Operation::Delete, id, e))?;
        info!(kind = %R::KIND, id, "deleted");
        Ok(())
    }

    /// Every entity of this kind, in server order.
    pub fn list(&self) -> Result<Vec<R::Declared>, ReconcileError> {
        let entities = self
            .executor
            .list::<R>()
            .map_err(|e| self.error(Operation::List, "", e))?;
        Ok(entities.into_iter().map(R::from_wire).collect())
    }

    fn error(&self, operation: Operation, id: &str, source: ApiError) -> ReconcileError {
        ReconcileError {
            operation,
            kind: R::KIND,
            id: id.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_wire_keeps_declared_order() {
        let declared = DeclaredTeam::new("Dev Team Alpha", ["e1", "e2"]);
        let wire = team_to_wire(&declared);
        assert_eq!(wire.name, "Dev Team Alpha");
        let ids: Vec<&str> = wire.engineers.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
    }

    #[test]
    fn from_wire_drops_engineer_details() {
        let team = Team {
            id: "t1".into(),
            name: "Ops".into(),
            engineers: vec![
                Engineer {
                    id: "e2".into(),
                    name: "Bob".into(),
                    email: "bob@example.com".into(),
                },
                Engineer {
                    id: "e1".into(),
                    name: "Alice".into(),
                    email: "alice@example.com".into(),
                },
            ],
        };
        let declared = team_from_wire(team);
        assert_eq!(declared.id, "t1");
        assert_eq!(declared.engineers, ["e2", "e1"]);
    }

    #[test]
    fn duplicate_references_are_kept() {
        let declared = DeclaredTeam::new("Pair", ["e1", "e1"]);
        assert_eq!(team_to_wire(&declared).engineers.len(), 2);
    }

    #[test]
    fn projection_round_trip_preserves_ids() {
        let mut declared = DeclaredTeam::new("Dev", ["e1", "e2"]);
        declared.id = "d1".into();
        let wire = team_to_wire(&declared);
        let echoed = Team {
            id: declared.id.clone(),
            name: wire.name.clone(),
            engineers: wire
                .engineers
                .iter()
                .map(|r| Engineer {
                    id: r.id.clone(),
                    ..Engineer::default()
                })
                .collect(),
        };
        assert_eq!(team_from_wire(echoed), declared);
    }

    #[test]
    fn engineer_projection() {
        let declared = DeclaredEngineer {
            id: String::new(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
        };
        let wire = engineer_to_wire(&declared);
        assert_eq!(wire.name, "Alice");
        let back = engineer_from_wire(Engineer {
            id: "e1".into(),
            name: wire.name,
            email: wire.email,
        });
        assert_eq!(back.id, "e1");
        assert_eq!(back.email, "alice@example.com");
    }

    #[test]
    fn error_message_names_operation_and_id() {
        let err = ReconcileError {
            operation: Operation::Delete,
            kind: ResourceKind::Dev,
            id: "d1".into(),
            source: ApiError::DeletionUnconfirmed {
                body: "nope".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            r#"could not delete dev "d1": resource deletion not confirmed: nope"#
        );
    }

    #[test]
    fn read_outcome_present() {
        assert_eq!(ReadOutcome::Present(1).present(), Some(1));
        assert_eq!(ReadOutcome::<i32>::Missing.present(), None);
    }
}
