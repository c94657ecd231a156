//! User sources: where the records come from.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use roster_core::{FetchError, UserRecord};

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// Fetches the full list of users in one call.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// HTTP Source
// =============================================================================

/// `GET <endpoint>` returning a JSON array of users.
pub struct HttpUserSource {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpUserSource {
    /// Build a source with an explicit request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FetchError::Transport(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        tracing::debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;
        parse_users(body.as_ref())
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

fn map_transport_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout { duration: timeout }
    } else {
        FetchError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> FetchError {
    FetchError::Status {
        status: status.as_u16(),
    }
}

/// Decode a response body. Anything but a JSON array of records is
/// malformed.
pub fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>, FetchError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FetchError::MalformedBody(e.to_string()))?;
    if !value.is_array() {
        return Err(FetchError::MalformedBody(
            "expected a JSON array of users".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| FetchError::MalformedBody(e.to_string()))
}

// =============================================================================
// Static Source
// =============================================================================

/// In-memory source, optionally slow or failing. Useful offline and in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct StaticUserSource {
    users: Vec<UserRecord>,
    delay: Duration,
    fail_with: Option<String>,
}

impl StaticUserSource {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            delay: Duration::ZERO,
            fail_with: None,
        }
    }

    /// A source whose every fetch fails with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            users: Vec::new(),
            delay: Duration::ZERO,
            fail_with: Some(message.into()),
        }
    }

    /// Delay each fetch by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl UserSource for StaticUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.fail_with {
            Some(message) => Err(FetchError::Transport(message.clone())),
            None => Ok(self.users.clone()),
        }
    }

    fn describe(&self) -> String {
        format!("static ({} users)", self.users.len())
    }
}
