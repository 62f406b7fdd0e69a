//! Controller Client
//!
//! Main handle for the controller REST API, combining configuration,
//! URL construction and the HTTP transport.

use super::http::ControllerHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

/// Separator between the parts of a composite key
pub const KEY_SEPARATOR: &str = ":";

/// REST collections exposed by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tenants,
    Networks,
    EndpointGroups,
    Policys,
    Rules,
    Globals,
}

impl Collection {
    /// Path segment under `/api/`
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Tenants => "tenants",
            Collection::Networks => "networks",
            Collection::EndpointGroups => "endpointGroups",
            // The controller really does spell it this way
            Collection::Policys => "policys",
            Collection::Rules => "rules",
            Collection::Globals => "globals",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join key parts into a composite key (`tenant:network:group`)
pub fn composite_key(parts: &[&str]) -> String {
    parts.join(KEY_SEPARATOR)
}

/// Main controller client
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ControllerClient {
    config: ClientConfig,
    base_url: Url,
    pub http: ControllerHttpClient,
}

impl ControllerClient {
    /// Create a new client for the configured controller
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = ControllerHttpClient::new(&config)?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    /// Client for a host with default port and no timeout
    pub fn for_host(host: &str) -> Result<Self> {
        Self::new(ClientConfig::new(host))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Base API URL, e.g. `http://localhost:9999/api/`
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build the unqualified collection URL: `{base}{collection}/`
    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}{}/", self.base_url, collection)
    }

    /// Build an object URL: `{base}{collection}/{k1}:{k2}:.../`
    ///
    /// Each key part is percent-encoded so it stays inside its path segment.
    pub fn object_url(&self, collection: Collection, key_parts: &[&str]) -> String {
        let encoded: Vec<String> = key_parts
            .iter()
            .map(|part| urlencoding::encode(part).into_owned())
            .collect();
        format!(
            "{}{}/{}/",
            self.base_url,
            collection,
            encoded.join(KEY_SEPARATOR)
        )
    }

    // =========================================================================
    // Transport passthrough
    // =========================================================================

    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Value> {
        self.http.post(url, body).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.http.delete(url).await
    }
}
