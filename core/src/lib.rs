//! Synchronous client core for the devops team API.
//!
//! # Overview
//! Reconciles Engineer, Dev and Ops entities on a REST backend. A caller
//! hands in declared state, the core sends one request per operation and
//! projects the server's answer back into declared state.
//!
//! # Design
//! - `DevOpsClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without I/O; `Transport` performs the round trip.
//! - `Executor` owns both, plus the configured host; it never retries.
//! - Per-kind path shapes live in a table in `resource`; CRUD code is
//!   generic over the `Resource` marker.
//! - Only 200 and 201 count as success. Deletes must also echo the
//!   `resource deleted` marker in their body.

pub mod client;
pub mod codec;
pub mod config;
pub mod crud;
pub mod error;
pub mod executor;
pub mod http;
pub mod reconcile;
pub mod resource;
pub mod transport;
pub mod types;

pub use client::{DevOpsClient, DELETE_CONFIRMATION};
pub use config::ClientConfig;
pub use crud::Crud;
pub use error::{ApiError, Result};
pub use executor::Executor;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use reconcile::{
    DeclaredEngineer, DeclaredTeam, Operation, ReadOutcome, Reconcilable, ReconcileError, Reconciler,
};
pub use resource::{Devs, Engineers, Ops, Resource, ResourceKind, ResourcePaths};
pub use transport::{Transport, UreqTransport};
pub use types::{Engineer, EngineerRef, NewEngineer, Team, TeamRequest};
