//! Tenant operations

use super::list_collection;
use crate::api::client::{Collection, ControllerClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Subnet pool every tenant is created with
pub const DEFAULT_SUBNET_POOL: &str = "10.1.1.1/8";
pub const DEFAULT_SUBNET_LEN: u32 = 24;
pub const DEFAULT_VLANS: &str = "100-1100";
pub const DEFAULT_VXLANS: &str = "1000-1100";

/// Tenant document sent on create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantPayload {
    pub key: String,
    pub tenant_name: String,
    pub subnet_pool: String,
    pub subnet_len: u32,
    pub vlans: String,
    pub vxlans: String,
}

impl TenantPayload {
    pub fn new(tenant_name: &str) -> Self {
        Self {
            key: tenant_name.to_string(),
            tenant_name: tenant_name.to_string(),
            subnet_pool: DEFAULT_SUBNET_POOL.to_string(),
            subnet_len: DEFAULT_SUBNET_LEN,
            vlans: DEFAULT_VLANS.to_string(),
            vxlans: DEFAULT_VXLANS.to_string(),
        }
    }
}

/// Tenant as returned by the list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantRecord {
    pub key: String,
    pub tenant_name: String,
    pub subnet_pool: String,
    pub subnet_len: u32,
    pub vlans: String,
    pub vxlans: String,
}

impl TenantRecord {
    /// Composite key (the tenant name)
    pub fn key(&self) -> String {
        self.tenant_name.clone()
    }
}

/// Create or replace a tenant
pub async fn create_tenant(client: &ControllerClient, tenant_name: &str) -> Result<()> {
    tracing::info!("Creating tenant {}", tenant_name);

    let url = client.object_url(Collection::Tenants, &[tenant_name]);
    let response = client
        .post(&url, &TenantPayload::new(tenant_name))
        .await
        .inspect_err(|e| tracing::error!("Tenant create failure: {}", e))?;

    tracing::debug!("Tenant create response is: {}", response);
    Ok(())
}

/// Delete a tenant
pub async fn delete_tenant(client: &ControllerClient, tenant_name: &str) -> Result<()> {
    tracing::info!("Deleting tenant {}", tenant_name);

    let url = client.object_url(Collection::Tenants, &[tenant_name]);
    client
        .delete(&url)
        .await
        .inspect_err(|e| tracing::error!("Tenant delete failure: {}", e))?;

    Ok(())
}

/// List all tenants
pub async fn list_tenants(client: &ControllerClient) -> Result<Vec<TenantRecord>> {
    list_collection(client, Collection::Tenants).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_carries_fixed_defaults() {
        let payload = serde_json::to_value(TenantPayload::new("blue")).unwrap();
        assert_eq!(
            payload,
            json!({
                "key": "blue",
                "tenantName": "blue",
                "subnetPool": "10.1.1.1/8",
                "subnetLen": 24,
                "vlans": "100-1100",
                "vxlans": "1000-1100",
            })
        );
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: TenantRecord = serde_json::from_value(json!({"tenantName": "red"})).unwrap();
        assert_eq!(record.key(), "red");
        assert_eq!(record.subnet_len, 0);
    }
}
