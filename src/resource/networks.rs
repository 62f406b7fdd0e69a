//! Network operations

use super::list_collection;
use crate::api::client::{composite_key, Collection, ControllerClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network encapsulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encap {
    #[default]
    Vxlan,
    Vlan,
}

impl fmt::Display for Encap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encap::Vxlan => f.write_str("vxlan"),
            Encap::Vlan => f.write_str("vlan"),
        }
    }
}

/// Caller-supplied attributes of a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub name: String,
    /// VLAN or VXLAN id
    pub pkt_tag: u32,
    pub subnet: String,
    pub gateway: String,
    pub encap: Encap,
}

impl NetworkSpec {
    pub fn new(name: &str, pkt_tag: u32, subnet: &str, gateway: &str) -> Self {
        Self {
            name: name.to_string(),
            pkt_tag,
            subnet: subnet.to_string(),
            gateway: gateway.to_string(),
            encap: Encap::default(),
        }
    }

    pub fn encap(mut self, encap: Encap) -> Self {
        self.encap = encap;
        self
    }
}

/// Network document sent on create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPayload {
    pub tenant_name: String,
    pub network_name: String,
    pub pkt_tag: u32,
    pub is_public: bool,
    pub is_private: bool,
    pub encap: Encap,
    pub subnet: String,
    pub gateway: String,
}

impl NetworkPayload {
    pub fn new(tenant_name: &str, spec: &NetworkSpec) -> Self {
        Self {
            tenant_name: tenant_name.to_string(),
            network_name: spec.name.clone(),
            pkt_tag: spec.pkt_tag,
            is_public: false,
            is_private: true,
            encap: spec.encap,
            subnet: spec.subnet.clone(),
            gateway: spec.gateway.clone(),
        }
    }
}

/// Network as returned by the list endpoint
///
/// `encap` stays a string so unknown encapsulations still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkRecord {
    pub tenant_name: String,
    pub network_name: String,
    pub pkt_tag: u32,
    pub is_public: bool,
    pub is_private: bool,
    pub encap: String,
    pub subnet: String,
    pub gateway: String,
}

impl NetworkRecord {
    /// Composite key `tenant:network`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.network_name])
    }
}

/// Create or replace a network
pub async fn create_network(
    client: &ControllerClient,
    tenant_name: &str,
    spec: &NetworkSpec,
) -> Result<()> {
    tracing::info!("Creating network {}:{}", tenant_name, spec.name);

    let url = client.object_url(Collection::Networks, &[tenant_name, &spec.name]);
    let response = client
        .post(&url, &NetworkPayload::new(tenant_name, spec))
        .await
        .inspect_err(|e| tracing::error!("Network create failure: {}", e))?;

    tracing::debug!("Network create response is: {}", response);
    Ok(())
}

/// Delete a network
pub async fn delete_network(
    client: &ControllerClient,
    tenant_name: &str,
    network_name: &str,
) -> Result<()> {
    tracing::info!("Deleting network {}:{}", tenant_name, network_name);

    let url = client.object_url(Collection::Networks, &[tenant_name, network_name]);
    client
        .delete(&url)
        .await
        .inspect_err(|e| tracing::error!("Network delete failure: {}", e))?;

    Ok(())
}

/// List all networks across tenants
pub async fn list_networks(client: &ControllerClient) -> Result<Vec<NetworkRecord>> {
    list_collection(client, Collection::Networks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let spec = NetworkSpec::new("net1", 1, "10.0.0.0/24", "10.0.0.1");
        let payload = serde_json::to_value(NetworkPayload::new("blue", &spec)).unwrap();
        assert_eq!(
            payload,
            json!({
                "tenantName": "blue",
                "networkName": "net1",
                "pktTag": 1,
                "isPublic": false,
                "isPrivate": true,
                "encap": "vxlan",
                "subnet": "10.0.0.0/24",
                "gateway": "10.0.0.1",
            })
        );
    }

    #[test]
    fn test_vlan_encap_serializes_lowercase() {
        let spec = NetworkSpec::new("net2", 100, "10.1.0.0/24", "10.1.0.1").encap(Encap::Vlan);
        let payload = serde_json::to_value(NetworkPayload::new("blue", &spec)).unwrap();
        assert_eq!(payload["encap"], "vlan");
        assert_eq!(Encap::Vlan.to_string(), "vlan");
    }

    #[test]
    fn test_record_key() {
        let record: NetworkRecord = serde_json::from_value(json!({
            "tenantName": "blue",
            "networkName": "net1",
            "encap": "geneve",
        }))
        .unwrap();
        assert_eq!(record.key(), "blue:net1");
        assert_eq!(record.encap, "geneve");
    }
}
