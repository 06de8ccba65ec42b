//! HTTP client for the MyMoodAI REST API
//!
//! Holds the base URL and default headers, and owns the two request
//! executors every endpoint goes through.

use reqwest::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{Error, Result};

use super::types::Attachment;

/// MyMoodAI API client
///
/// Configuration is fixed at construction. Clones share the underlying
/// connection pool.
#[derive(Clone)]
pub struct MyMoodClient {
    http_client: HttpClient,
    base_url: String,
    authenticated: bool,
}

impl std::fmt::Debug for MyMoodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyMoodClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Builder for MyMoodClient
pub struct MyMoodClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl Default for MyMoodClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MyMoodClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
        }
    }

    /// Set the API key sent as a bearer token
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL (defaults to the production API)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the MyMoodClient
    pub fn build(self) -> Result<MyMoodClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        let api_key = self.api_key.filter(|key| !key.is_empty());
        if let Some(key) = &api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| {
                Error::ConfigError(
                    "API key contains characters that are not allowed in an HTTP header"
                        .to_string(),
                )
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::NetworkError)?;

        Ok(MyMoodClient {
            http_client,
            base_url,
            authenticated: api_key.is_some(),
        })
    }
}

impl MyMoodClient {
    /// Create a client for `base_url`, authenticating with `api_key` when given
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let mut builder = MyMoodClientBuilder::new().base_url(base_url);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    /// Create a new builder
    pub fn builder() -> MyMoodClientBuilder {
        MyMoodClientBuilder::new()
    }

    /// Base URL with trailing slashes removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Absolute URL for an endpoint path, with exactly one slash at the join
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Send a GET request and decode the JSON body
    ///
    /// Query pairs are appended as-is; an empty slice adds no query string.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.url(path);
        debug!(method = "GET", url = %url, "Sending request");

        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(Error::NetworkError)?;
        parse_response(&url, response).await
    }

    /// Send a POST request and decode the JSON body
    ///
    /// Without attachments the payload is sent as JSON. With attachments the
    /// request becomes `multipart/form-data`: top-level payload fields are
    /// sent as text parts and each attachment as a file part.
    pub async fn post<T>(&self, path: &str, payload: &T, attachments: Vec<Attachment>) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path);
        let payload = serde_json::to_value(payload)
            .map_err(|e| Error::InvalidInput(format!("payload is not serializable: {}", e)))?;

        let request = if attachments.is_empty() {
            debug!(method = "POST", url = %url, "Sending JSON request");
            self.http_client.post(&url).json(&payload)
        } else {
            debug!(
                method = "POST",
                url = %url,
                attachments = attachments.len(),
                "Sending multipart request"
            );
            self.http_client
                .post(&url)
                .multipart(multipart_form(payload, attachments)?)
        };

        let response = request.send().await.map_err(Error::NetworkError)?;
        parse_response(&url, response).await
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn multipart_form(payload: Value, attachments: Vec<Attachment>) -> Result<Form> {
    let mut form = Form::new();

    match payload {
        Value::Null => {}
        Value::Object(fields) => {
            for (name, value) in fields {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                form = form.text(name, text);
            }
        }
        other => {
            return Err(Error::InvalidInput(format!(
                "multipart payload must be a JSON object, got {}",
                other
            )));
        }
    }

    for attachment in attachments {
        let part = Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(&attachment.mime_type)
            .map_err(Error::NetworkError)?;
        form = form.part(attachment.field_name, part);
    }

    Ok(form)
}

/// Decode a successful response body, or map the status to an error
async fn parse_response(url: &str, response: reqwest::Response) -> Result<Value> {
    let status = response.status();

    if !status.is_success() {
        return handle_error_response(url, status, response).await;
    }

    let body = response.bytes().await.map_err(Error::NetworkError)?;
    serde_json::from_slice(&body)
        .map_err(|e| Error::InvalidResponse(format!("{} returned malformed JSON: {}", url, e)))
}

/// Handle error responses from the API
async fn handle_error_response<T>(
    url: &str,
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> Result<T> {
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), url = %url, "API request failed");

    match status.as_u16() {
        401 | 403 => Err(Error::Unauthorized {
            status: status.as_u16(),
            body,
        }),
        404 if body.is_empty() => Err(Error::ResourceNotFound(url.to_string())),
        404 => Err(Error::ResourceNotFound(format!("{}: {}", url, body))),
        429 => Err(Error::RateLimited(body)),
        code => Err(Error::ApiError { status: code, body }),
    }
}
