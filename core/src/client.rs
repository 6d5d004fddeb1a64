//! Shared requester for every AWX resource service.
//!
//! # Design
//! `AwxClient` holds only a normalised `base_url` and a `Transport`, and
//! carries no mutable state between calls. Resource services borrow it and
//! route each operation through `send`, so one client can be shared across
//! threads whenever its transport can.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::execution_environments::ExecutionEnvironmentService;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;

#[derive(Debug, Clone)]
pub struct AwxClient<T> {
    base_url: String,
    transport: T,
}

impl<T> AwxClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/v2/execution_environments/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execution environment endpoints.
    pub fn execution_environments(&self) -> ExecutionEnvironmentService<'_, T> {
        ExecutionEnvironmentService::new(self)
    }
}

impl<T: Transport> AwxClient<T> {
    /// Perform one round trip. Status codes are not interpreted here.
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }
}

impl AwxClient<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, UreqTransport::new(config.timeout))
    }
}
