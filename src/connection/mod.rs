//! Connection to a CeresDB instance
//!
//! The session is created once at startup and lives until the process exits.
//! Each submitted line becomes one HTTP request against the query endpoint:
//!
//! ```text
//! POST {scheme}://{host}:{port}{query_path}
//! {"auth": "<username>:<password>", "query": "<line>"}
//! ```
//!
//! Retries and reconnection are not attempted; a failed request is reported
//! to the REPL as a per-query error.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, QueryError, Result};
use crate::executor::{QueryExecutor, ResultData};

/// Credentials and address of the instance to connect to
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username to authenticate as
    pub username: String,

    /// Password for `username`
    pub password: String,

    /// Hostname of the instance
    pub host: String,

    /// Port the instance listens on
    pub port: u16,
}

impl Credentials {
    /// Create a new set of credentials
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            host: host.into(),
            port,
        }
    }

    fn auth_token(&self) -> String {
        format!("{}:{}", self.username, self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Request body sent for every query
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    auth: &'a str,
    query: &'a str,
}

/// An established session with a CeresDB instance
pub struct Session {
    client: Client,
    endpoint: Url,
    auth: String,
    timeout: Duration,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Build the query endpoint for `host:port`
///
/// # Arguments
/// * `credentials` - Address of the instance
/// * `config` - Connection configuration (scheme and path)
///
/// # Returns
/// * `Result<Url>` - Parsed endpoint or error
pub fn endpoint_url(credentials: &Credentials, config: &ConnectionConfig) -> Result<Url> {
    let host = if credentials.host.contains(':') && !credentials.host.starts_with('[') {
        format!("[{}]", credentials.host)
    } else {
        credentials.host.clone()
    };

    let raw = format!(
        "{}://{}:{}{}",
        config.scheme, host, credentials.port, config.query_path
    );

    let url = Url::parse(&raw)
        .map_err(|e| ConnectionError::InvalidEndpoint(format!("{raw}: {e}")))?;
    Ok(url)
}

/// Establish the session used for the lifetime of the shell
///
/// # Arguments
/// * `credentials` - Username, password, host and port
/// * `config` - Connection configuration
///
/// # Returns
/// * `Result<Session>` - Ready session or a fatal connection error
pub fn connect(credentials: &Credentials, config: &ConnectionConfig) -> Result<Session> {
    let endpoint = endpoint_url(credentials, config)?;
    let timeout = config.query_timeout();

    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ceresdb-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConnectionError::ClientBuild(e.to_string()))?;

    info!(
        endpoint = %endpoint,
        username = %credentials.username,
        "session established"
    );

    Ok(Session {
        client,
        endpoint,
        auth: credentials.auth_token(),
        timeout,
    })
}

impl Session {
    /// The URL every query is posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, line: &str) -> std::result::Result<ResultData, QueryError> {
        let request = QueryRequest {
            auth: &self.auth,
            query: line,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QueryError::Timeout
                } else {
                    QueryError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(QueryError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status.as_u16(), &body),
            });
        }

        ResultData::from_body(&body).map_err(|e| QueryError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl QueryExecutor for Session {
    async fn query(&mut self, line: &str) -> Result<ResultData> {
        let started = Instant::now();
        let result = self.send(line).await;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "query finished"
        );
        Ok(result?)
    }
}

/// Extract a readable message from an error response body.
///
/// Prefers an `"error"` string field; falls back to the status and raw body.
fn rejection_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => format!("Query failed with status {status}"),
        None => format!("Query failed with status {status}: {}", body.trim()),
    }
}
