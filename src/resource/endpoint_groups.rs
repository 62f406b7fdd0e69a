//! Endpoint group operations

use super::list_collection;
use crate::api::client::{composite_key, Collection, ControllerClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Endpoint group document sent on create
///
/// `policies` is the complete attached list; a create replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointGroupPayload {
    pub tenant_name: String,
    pub group_name: String,
    pub network_name: String,
    pub policies: Vec<String>,
}

impl EndpointGroupPayload {
    pub fn new(
        tenant_name: &str,
        network_name: &str,
        group_name: &str,
        policies: &[String],
    ) -> Self {
        Self {
            tenant_name: tenant_name.to_string(),
            group_name: group_name.to_string(),
            network_name: network_name.to_string(),
            policies: policies.to_vec(),
        }
    }
}

/// Endpoint group as returned by the list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointGroupRecord {
    pub tenant_name: String,
    pub network_name: String,
    pub group_name: String,
    pub policies: Vec<String>,
}

impl EndpointGroupRecord {
    /// Composite key `tenant:network:group`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.network_name, &self.group_name])
    }
}

/// Create or replace an endpoint group
pub async fn create_endpoint_group(
    client: &ControllerClient,
    tenant_name: &str,
    network_name: &str,
    group_name: &str,
    policies: &[String],
) -> Result<()> {
    tracing::info!(
        "Creating endpoint group {}:{}:{}",
        tenant_name,
        network_name,
        group_name
    );

    let url = client.object_url(
        Collection::EndpointGroups,
        &[tenant_name, network_name, group_name],
    );
    let payload = EndpointGroupPayload::new(tenant_name, network_name, group_name, policies);
    let response = client
        .post(&url, &payload)
        .await
        .inspect_err(|e| tracing::error!("Epg create failure: {}", e))?;

    tracing::debug!("Epg create response is: {}", response);
    Ok(())
}

/// Delete an endpoint group
pub async fn delete_endpoint_group(
    client: &ControllerClient,
    tenant_name: &str,
    network_name: &str,
    group_name: &str,
) -> Result<()> {
    tracing::info!(
        "Deleting endpoint group {}:{}:{}",
        tenant_name,
        network_name,
        group_name
    );

    let url = client.object_url(
        Collection::EndpointGroups,
        &[tenant_name, network_name, group_name],
    );
    client
        .delete(&url)
        .await
        .inspect_err(|e| tracing::error!("Epg delete failure: {}", e))?;

    Ok(())
}

/// List all endpoint groups
pub async fn list_endpoint_groups(client: &ControllerClient) -> Result<Vec<EndpointGroupRecord>> {
    list_collection(client, Collection::EndpointGroups).await
}
