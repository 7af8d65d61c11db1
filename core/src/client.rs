//! Stateless HTTP request builder and response parser for the devops API.
//!
//! # Design
//! `DevOpsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Both are generic over a `Resource` marker; paths come from the per-kind
//! table in `resource`. Callers doing their own I/O pair `build_*` with
//! `parse_*`; `Executor` pairs `build_*` with `execute` and the same
//! `check_status`/codec functions the parsers use.

use tracing::warn;

use crate::codec;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::Resource;

/// Substring a delete response body must contain to count as success.
pub const DELETE_CONFIRMATION: &str = "resource deleted";

/// Synchronous, stateless request builder for the devops API.
#[derive(Debug, Clone)]
pub struct DevOpsClient {
    base_url: String,
}

impl DevOpsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list<R: Resource>(&self) -> HttpRequest {
        self.request(HttpMethod::Get, &R::KIND.paths().collection(), None)
    }

    pub fn build_get<R: Resource>(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &R::KIND.paths().lookup(id), None)
    }

    pub fn build_create<R: Resource>(&self, input: &R::Submission) -> Result<HttpRequest> {
        let body = codec::encode(input)?;
        Ok(self.request(HttpMethod::Post, &R::KIND.paths().collection(), Some(body)))
    }

    pub fn build_update<R: Resource>(&self, id: &str, input: &R::Submission) -> Result<HttpRequest> {
        let body = codec::encode(input)?;
        Ok(self.request(HttpMethod::Put, &R::KIND.paths().member(id), Some(body)))
    }

    pub fn build_delete<R: Resource>(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &R::KIND.paths().member(id), None)
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R::Entity>> {
        check_status(&response)?;
        codec::decode_list::<R::Entity>(&response.body)
    }

    /// Shared by get, create and update: all return one entity.
    pub fn parse_entity<R: Resource>(&self, response: HttpResponse) -> Result<R::Entity> {
        check_status(&response)?;
        codec::decode::<R::Entity>(&response.body)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)?;
        confirm_deletion(&response.body)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<Vec<u8>>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }
}

/// Map anything but 200/201 to `RemoteRejected`, keeping the raw body.
pub fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_accepted() {
        return Ok(());
    }
    warn!(status = response.status, "request rejected by server");
    Err(ApiError::RemoteRejected {
        status: response.status,
        body: response.body_text(),
    })
}

/// The backend signals deletion only through its message text, so any body
/// containing the marker passes.
pub fn confirm_deletion(body: &[u8]) -> Result<()> {
    let text = String::from_utf8_lossy(body);
    if text.contains(DELETE_CONFIRMATION) {
        return Ok(());
    }
    warn!(body = %text, "delete response did not confirm removal");
    Err(ApiError::DeletionUnconfirmed {
        body: text.into_owned(),
    })
}
