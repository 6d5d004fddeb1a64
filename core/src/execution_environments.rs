//! Execution environment endpoints.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The executing method (`get_by_id`, `list`, ...) glues the two around a
//! single `AwxClient::send`. Callers that run their own I/O can use the
//! halves directly.
//!
//! AWX routes updates and deletes without the trailing slash, and reads with
//! it; the paths below keep that distinction.

use serde::de::DeserializeOwned;

use crate::client::AwxClient;
use crate::error::ApiError;
use crate::http::{check_response, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{ExecutionEnvironment, Fields, ListExecutionEnvironmentsResponse, QueryParams};
use crate::validate::validate_params;

pub const EXECUTION_ENVIRONMENT_API_ENDPOINT: &str = "/api/v2/execution_environments/";

/// CRUD over `/api/v2/execution_environments/`.
#[derive(Debug)]
pub struct ExecutionEnvironmentService<'a, T> {
    client: &'a AwxClient<T>,
}

impl<T> Clone for ExecutionEnvironmentService<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ExecutionEnvironmentService<'_, T> {}

impl<'a, T> ExecutionEnvironmentService<'a, T> {
    pub fn new(client: &'a AwxClient<T>) -> Self {
        Self { client }
    }

    pub fn build_get_by_id(&self, id: i64, params: Option<&QueryParams>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self
                .client
                .url(&format!("{EXECUTION_ENVIRONMENT_API_ENDPOINT}{id}/")),
            query: query_pairs(params),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list(&self, params: Option<&QueryParams>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.client.url(EXECUTION_ENVIRONMENT_API_ENDPOINT),
            query: query_pairs(params),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Fails with `ApiError::Validation` when `name` or `image` is absent.
    pub fn build_create(
        &self,
        fields: &Fields,
        params: Option<&QueryParams>,
    ) -> Result<HttpRequest, ApiError> {
        const MANDATORY_FIELDS: [&str; 2] = ["name", "image"];

        validate_params(fields, &MANDATORY_FIELDS)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.client.url(EXECUTION_ENVIRONMENT_API_ENDPOINT),
            query: query_pairs(params),
            headers: json_headers(),
            body: Some(encode(fields)?),
        })
    }

    pub fn build_update(
        &self,
        id: i64,
        fields: &Fields,
        params: Option<&QueryParams>,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url: self
                .client
                .url(&format!("{EXECUTION_ENVIRONMENT_API_ENDPOINT}{id}")),
            query: query_pairs(params),
            headers: json_headers(),
            body: Some(encode(fields)?),
        })
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self
                .client
                .url(&format!("{EXECUTION_ENVIRONMENT_API_ENDPOINT}{id}")),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<ExecutionEnvironment, ApiError> {
        decode(&response)
    }

    /// Returns the page's results alongside the full envelope.
    pub fn parse_list(
        &self,
        response: HttpResponse,
    ) -> Result<(Vec<ExecutionEnvironment>, ListExecutionEnvironmentsResponse), ApiError> {
        let page: ListExecutionEnvironmentsResponse = decode(&response)?;
        Ok((page.results.clone(), page))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<ExecutionEnvironment, ApiError> {
        decode(&response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<ExecutionEnvironment, ApiError> {
        decode(&response)
    }

    /// An empty body decodes to `ExecutionEnvironment::default()`.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<ExecutionEnvironment, ApiError> {
        check_response(response.status, &response.body)?;
        if response.body.trim().is_empty() {
            return Ok(ExecutionEnvironment::default());
        }
        serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
    }
}

impl<T: Transport> ExecutionEnvironmentService<'_, T> {
    /// Show the details of one execution environment.
    #[tracing::instrument(skip(self))]
    pub fn get_by_id(
        &self,
        id: i64,
        params: Option<&QueryParams>,
    ) -> Result<ExecutionEnvironment, ApiError> {
        let response = self.client.send(self.build_get_by_id(id, params))?;
        self.parse_get_by_id(response)
    }

    /// Fetch a single page. Pass `page` in `params` to move through results.
    #[tracing::instrument(skip(self))]
    pub fn list(
        &self,
        params: Option<&QueryParams>,
    ) -> Result<(Vec<ExecutionEnvironment>, ListExecutionEnvironmentsResponse), ApiError> {
        let response = self.client.send(self.build_list(params))?;
        self.parse_list(response)
    }

    /// Create an execution environment. `name` and `image` are mandatory;
    /// nothing is sent when either is missing.
    #[tracing::instrument(skip(self, fields))]
    pub fn create(
        &self,
        fields: &Fields,
        params: Option<&QueryParams>,
    ) -> Result<ExecutionEnvironment, ApiError> {
        let request = self.build_create(fields, params)?;
        let response = self.client.send(request)?;
        self.parse_create(response)
    }

    /// Partially update an execution environment.
    #[tracing::instrument(skip(self, fields))]
    pub fn update(
        &self,
        id: i64,
        fields: &Fields,
        params: Option<&QueryParams>,
    ) -> Result<ExecutionEnvironment, ApiError> {
        let request = self.build_update(id, fields, params)?;
        let response = self.client.send(request)?;
        self.parse_update(response)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<ExecutionEnvironment, ApiError> {
        let response = self.client.send(self.build_delete(id))?;
        self.parse_delete(response)
    }
}

fn query_pairs(params: Option<&QueryParams>) -> Vec<(String, String)> {
    params
        .map(|params| {
            params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(fields: &Fields) -> Result<String, ApiError> {
    serde_json::to_string(fields).map_err(ApiError::Serialization)
}

fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    check_response(response.status, &response.body)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}
