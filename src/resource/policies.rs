//! Policy operations

use super::list_collection;
use crate::api::client::{composite_key, Collection, ControllerClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPayload {
    pub tenant_name: String,
    pub policy_name: String,
}

impl PolicyPayload {
    pub fn new(tenant_name: &str, policy_name: &str) -> Self {
        Self {
            tenant_name: tenant_name.to_string(),
            policy_name: policy_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyRecord {
    pub tenant_name: String,
    pub policy_name: String,
}

impl PolicyRecord {
    /// Composite key `tenant:policy`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.policy_name])
    }
}

/// Create or replace a policy
pub async fn create_policy(
    client: &ControllerClient,
    tenant_name: &str,
    policy_name: &str,
) -> Result<()> {
    tracing::info!("Creating policy {}:{}", tenant_name, policy_name);

    let url = client.object_url(Collection::Policys, &[tenant_name, policy_name]);
    let response = client
        .post(&url, &PolicyPayload::new(tenant_name, policy_name))
        .await
        .inspect_err(|e| tracing::error!("Policy create failure: {}", e))?;

    tracing::debug!("Create policy response is: {}", response);
    Ok(())
}

/// Delete a policy
pub async fn delete_policy(
    client: &ControllerClient,
    tenant_name: &str,
    policy_name: &str,
) -> Result<()> {
    tracing::info!("Deleting policy {}:{}", tenant_name, policy_name);

    let url = client.object_url(Collection::Policys, &[tenant_name, policy_name]);
    client
        .delete(&url)
        .await
        .inspect_err(|e| tracing::error!("Policy delete failure: {}", e))?;

    Ok(())
}

/// List all policies
pub async fn list_policies(client: &ControllerClient) -> Result<Vec<PolicyRecord>> {
    list_collection(client, Collection::Policys).await
}
