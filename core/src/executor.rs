//! Executes prepared requests against the configured host.
//!
//! # Design
//! `Executor` pairs a `DevOpsClient` (pure build/parse) with a `Transport`
//! (network I/O). It holds no mutable state, so one executor can serve
//! concurrent operations. There are no retries; every error goes straight
//! back to the caller.

use tracing::debug;

use crate::client::{check_status, DevOpsClient};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct Executor<T = UreqTransport> {
    pub(crate) client: DevOpsClient,
    transport: T,
}

impl Executor<UreqTransport> {
    /// Validates `config` and builds a `ureq` transport with its timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_transport(
            config.base_url(),
            UreqTransport::new(config.timeout),
        ))
    }
}

impl<T: Transport> Executor<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: DevOpsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &DevOpsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` and returns the body of a 200/201 response, unparsed.
    ///
    /// Every CRUD operation goes through here.
    pub fn execute(&self, request: &HttpRequest) -> Result<Vec<u8>> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        check_status(&response)?;
        Ok(response.body)
    }
}
