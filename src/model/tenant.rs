use super::{register, sorted_keys, Network, Policy};
use crate::api::client::ControllerClient;
use crate::error::{CascadeError, Result};
use crate::resource::{networks::Encap, tenants, NetworkSpec};
use std::collections::HashMap;

/// Handle for a tenant and the networks and policies created through it
#[derive(Debug)]
pub struct Tenant {
    client: ControllerClient,
    name: String,
    networks: HashMap<String, Network>,
    policies: HashMap<String, Policy>,
}

impl Tenant {
    /// Attach to a tenant, creating it only if the controller does not list it
    pub async fn new(client: &ControllerClient, name: &str) -> Result<Self> {
        let existing = tenants::list_tenants(client).await?;

        if existing.iter().any(|t| t.key() == name) {
            tracing::debug!("Tenant {} already exists", name);
        } else {
            tenants::create_tenant(client, name).await?;
        }

        Ok(Self {
            client: client.clone(),
            name: name.to_string(),
            networks: HashMap::new(),
            policies: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.name
    }

    // =========================================================================
    // Networks
    // =========================================================================

    /// Create (or attach to) a vxlan network in this tenant
    pub async fn new_network(
        &mut self,
        name: &str,
        pkt_tag: u32,
        subnet: &str,
        gateway: &str,
    ) -> Result<&mut Network> {
        self.new_network_with_encap(name, pkt_tag, subnet, gateway, Encap::Vxlan)
            .await
    }

    pub async fn new_network_with_encap(
        &mut self,
        name: &str,
        pkt_tag: u32,
        subnet: &str,
        gateway: &str,
        encap: Encap,
    ) -> Result<&mut Network> {
        let spec = NetworkSpec::new(name, pkt_tag, subnet, gateway).encap(encap);
        let network = Network::new(&self.client, &self.name, spec).await?;

        Ok(register(&mut self.networks, name, network))
    }

    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.get(name)
    }

    pub fn network_mut(&mut self, name: &str) -> Option<&mut Network> {
        self.networks.get_mut(name)
    }

    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }

    /// Delete a network created through this tenant; unknown names are ignored
    ///
    /// The network's endpoint groups are not deleted.
    pub async fn delete_network(&mut self, name: &str) -> Result<()> {
        let Some(network) = self.networks.get(name) else {
            return Ok(());
        };

        network.delete_remote().await?;
        self.networks.remove(name);
        Ok(())
    }

    // =========================================================================
    // Policies
    // =========================================================================

    /// Create a policy in this tenant
    pub async fn new_policy(&mut self, name: &str) -> Result<&mut Policy> {
        let policy = Policy::new(&self.client, &self.name, name).await?;

        Ok(register(&mut self.policies, name, policy))
    }

    pub fn policy(&self, name: &str) -> Option<&Policy> {
        self.policies.get(name)
    }

    pub fn policy_mut(&mut self, name: &str) -> Option<&mut Policy> {
        self.policies.get_mut(name)
    }

    pub fn policies(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values()
    }

    /// Delete a policy created through this tenant; unknown names are ignored
    pub async fn delete_policy(&mut self, name: &str) -> Result<()> {
        let Some(policy) = self.policies.get(name) else {
            return Ok(());
        };

        policy.delete_remote().await?;
        self.policies.remove(name);
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Delete the tenant only; children stay on the controller
    pub async fn delete(self) -> Result<()> {
        tenants::delete_tenant(&self.client, &self.name).await
    }

    /// Delete every known child and then the tenant
    ///
    /// Order: endpoint groups, networks, rules, policies, tenant. Stops at
    /// the first failure and hands the tenant back with whatever children
    /// are still live, so the cascade can be retried.
    pub async fn delete_cascade(mut self) -> std::result::Result<(), CascadeError<Self>> {
        if let Err(error) = self.delete_children().await {
            return Err(CascadeError::new(self, error));
        }
        if let Err(error) = tenants::delete_tenant(&self.client, &self.name).await {
            return Err(CascadeError::new(self, error));
        }
        Ok(())
    }

    async fn delete_children(&mut self) -> Result<()> {
        for name in sorted_keys(&self.networks) {
            if let Some(network) = self.networks.get_mut(&name) {
                network.delete_children().await?;
                network.delete_remote().await?;
            }
            self.networks.remove(&name);
        }

        for name in sorted_keys(&self.policies) {
            if let Some(policy) = self.policies.get_mut(&name) {
                policy.delete_children().await?;
                policy.delete_remote().await?;
            }
            self.policies.remove(&name);
        }

        Ok(())
    }
}
