//! HTTP utilities for controller REST calls

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP client wrapper for controller API calls
#[derive(Clone, Debug)]
pub struct ControllerHttpClient {
    client: Client,
}

impl ControllerHttpClient {
    /// Create a new HTTP client from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// GET a URL and parse the body as JSON
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let body = read_body(url, response).await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// POST a JSON body, replacing the remote object
    pub async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        let body = read_body(url, response).await?;

        Ok(lenient_json(body))
    }

    /// DELETE a URL
    pub async fn delete(&self, url: &str) -> Result<Value> {
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        let body = read_body(url, response).await?;

        Ok(lenient_json(body))
    }
}

/// Read the body and map non-2xx statuses onto the error taxonomy
async fn read_body(url: &str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let sanitized = sanitize_for_log(&body);
    match status {
        StatusCode::NOT_FOUND => {
            tracing::error!("Page not found: {}", url);
            Err(Error::NotFound {
                url: url.to_string(),
            })
        }
        StatusCode::FORBIDDEN => {
            tracing::error!("Access denied: {}", url);
            Err(Error::Forbidden {
                url: url.to_string(),
            })
        }
        _ => {
            tracing::error!("API error: {} - {}", status, sanitized);
            Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
                body: sanitized,
            })
        }
    }
}

/// Mutating calls may answer with nothing, JSON, or plain text
fn lenient_json(body: String) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("line1\nline2\r\t"), "line1line2");
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ClientConfig::new("127.0.0.1").with_port(port);
        let client = ControllerHttpClient::new(&config).unwrap();
        let url = format!("http://127.0.0.1:{}/api/tenants/", port);

        let err = tokio_test::block_on(client.get(&url)).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_lenient_json() {
        assert_eq!(lenient_json(String::new()), Value::Null);
        assert_eq!(lenient_json("{\"ok\":true}".to_string())["ok"], true);
        assert_eq!(
            lenient_json("created".to_string()),
            Value::String("created".to_string())
        );
    }
}
