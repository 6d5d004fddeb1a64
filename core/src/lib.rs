//! Synchronous client binding for the AWX execution environment API.
//!
//! # Overview
//! `AwxClient` owns a base URL and a `Transport`. Resource services borrow
//! the client and map each call to exactly one HTTP round trip:
//!
//! ```no_run
//! use awx_client::{AwxClient, ClientConfig, Fields};
//!
//! let client = AwxClient::from_config(&ClientConfig::new("https://awx.example.com"));
//! let mut fields = Fields::new();
//! fields.insert("name".into(), "Default EE".into());
//! fields.insert("image".into(), "quay.io/ansible/awx-ee:latest".into());
//! let created = client.execution_environments().create(&fields, None)?;
//! println!("created execution environment {}", created.id);
//! # Ok::<(), awx_client::ApiError>(())
//! ```
//!
//! # Design
//! - The client is stateless apart from its immutable base URL and transport.
//! - Each operation is also exposed as `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every response passes through `check_response` before decoding.

pub mod client;
pub mod config;
pub mod error;
pub mod execution_environments;
pub mod http;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::AwxClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use execution_environments::{ExecutionEnvironmentService, EXECUTION_ENVIRONMENT_API_ENDPOINT};
pub use http::{check_response, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{
    ExecutionEnvironment, FieldValue, Fields, ListExecutionEnvironmentsResponse, Pagination,
    QueryParams,
};
pub use validate::validate_params;
