use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://api.letsbuildthatapp.com/jsondecodable/courses";

#[derive(Clone, Debug)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl SourceConfig {
    /// Reads `COURSES_URL` and `COURSES_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self, FetchError> {
        dotenvy::dotenv().ok();

        Self::from_vars(env::var("COURSES_URL").ok(), env::var("COURSES_TIMEOUT_SECS").ok())
    }

    pub fn from_vars(endpoint: Option<String>, timeout: Option<String>) -> Result<Self, FetchError> {
        let mut config = Self::default();

        if let Some(endpoint) = endpoint {
            Url::parse(&endpoint)
                .map_err(|e| FetchError::Config(format!("COURSES_URL is not a valid url: {}", e)))?;
            config.endpoint = endpoint;
        }

        if let Some(secs) = timeout {
            config.timeout = Some(parse_timeout(&secs)?);
        }

        Ok(config)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, FetchError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(FetchError::Config(format!(
            "COURSES_TIMEOUT_SECS must be a positive integer, got {:?}",
            raw
        ))),
    }
}

/// Status and body of a response, whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait CourseSource: Send + Sync {
    fn endpoint(&self) -> &str;

    /// Only fails when no response was received at all.
    async fn get(&self) -> Result<RawResponse, FetchError>;
}

pub struct HttpCourseSource {
    client: Client,
    config: SourceConfig,
}

impl HttpCourseSource {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn get(&self) -> Result<RawResponse, FetchError> {
        let response = self.client.get(&self.config.endpoint).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!("GET {} -> {} ({} bytes)", self.config.endpoint, status, body.len());

        Ok(RawResponse { status, body })
    }
}

/// Canned source for tests and demos: answers every request with the same response.
pub struct StaticCourseSource {
    endpoint: String,
    response: RawResponse,
}

impl StaticCourseSource {
    pub fn new(endpoint: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            endpoint: endpoint.into(),
            response: RawResponse {
                status,
                body: body.into(),
            },
        }
    }
}

#[async_trait]
impl CourseSource for StaticCourseSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self) -> Result<RawResponse, FetchError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_fixed_endpoint() {
        let config = SourceConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert!(matches!(parse_timeout("0"), Err(FetchError::Config(_))));
        assert!(matches!(parse_timeout("soon"), Err(FetchError::Config(_))));
    }

    #[test]
    fn endpoint_override_replaces_default() {
        let config =
            SourceConfig::from_vars(Some("http://localhost:8080/courses".to_string()), None).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/courses");
        assert!(config.timeout.is_none());

        let config = SourceConfig::from_vars(None, None).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let result = SourceConfig::from_vars(Some("not a url".to_string()), None);
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn garbage_timeout_is_a_config_error() {
        let result = SourceConfig::from_vars(None, Some("soon".to_string()));
        assert!(matches!(result, Err(FetchError::Config(_))));

        let config = SourceConfig::from_vars(None, Some(" 30 ".to_string())).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
