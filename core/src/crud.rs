//! List, get, create, update and delete for every resource kind.
//!
//! Each operation is one round trip: build the request, `execute` it (status
//! check included), decode the accepted body. `Crud` is a borrowed per-kind
//! view for callers that prefer `executor.devs().get(id)` over turbofish.

use std::marker::PhantomData;

use crate::client::confirm_deletion;
use crate::codec;
use crate::error::Result;
use crate::executor::Executor;
use crate::resource::{Devs, Engineers, Ops, Resource};
use crate::transport::Transport;

impl<T: Transport> Executor<T> {
    pub fn list<R: Resource>(&self) -> Result<Vec<R::Entity>> {
        let body = self.execute(&self.client.build_list::<R>())?;
        codec::decode_list(&body)
    }

    pub fn get<R: Resource>(&self, id: &str) -> Result<R::Entity> {
        let body = self.execute(&self.client.build_get::<R>(id))?;
        codec::decode(&body)
    }

    /// Returns the server's view of the new entity, including its id.
    pub fn create<R: Resource>(&self, input: &R::Submission) -> Result<R::Entity> {
        let body = self.execute(&self.client.build_create::<R>(input)?)?;
        codec::decode(&body)
    }

    pub fn update<R: Resource>(&self, id: &str, input: &R::Submission) -> Result<R::Entity> {
        let body = self.execute(&self.client.build_update::<R>(id, input)?)?;
        codec::decode(&body)
    }

    pub fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let body = self.execute(&self.client.build_delete::<R>(id))?;
        confirm_deletion(&body)
    }

    pub fn engineers(&self) -> Crud<'_, Engineers, T> {
        Crud::new(self)
    }

    pub fn devs(&self) -> Crud<'_, Devs, T> {
        Crud::new(self)
    }

    pub fn ops(&self) -> Crud<'_, Ops, T> {
        Crud::new(self)
    }
}

/// Operations of a single resource kind.
pub struct Crud<'a, R, T> {
    executor: &'a Executor<T>,
    _kind: PhantomData<R>,
}

impl<'a, R: Resource, T: Transport> Crud<'a, R, T> {
    pub fn new(executor: &'a Executor<T>) -> Self {
        Self {
            executor,
            _kind: PhantomData,
        }
    }

    pub fn list(&self) -> Result<Vec<R::Entity>> {
        self.executor.list::<R>()
    }

    pub fn get(&self, id: &str) -> Result<R::Entity> {
        self.executor.get::<R>(id)
    }

    pub fn create(&self, input: &R::Submission) -> Result<R::Entity> {
        self.executor.create::<R>(input)
    }

    pub fn update(&self, id: &str, input: &R::Submission) -> Result<R::Entity> {
        self.executor.update::<R>(id, input)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.executor.delete::<R>(id)
    }
}
