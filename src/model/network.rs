use super::{register, sorted_keys, EndpointGroup};
use crate::api::client::{composite_key, ControllerClient};
use crate::error::{CascadeError, Result};
use crate::resource::{networks, Encap, NetworkSpec};
use std::collections::HashMap;

/// Handle for a network and the endpoint groups created through it
#[derive(Debug)]
pub struct Network {
    client: ControllerClient,
    tenant_name: String,
    spec: NetworkSpec,
    groups: HashMap<String, EndpointGroup>,
}

impl Network {
    /// Attach to a network, creating it only if the controller does not list it
    ///
    /// An existing network keeps its remote attributes; `spec` is not pushed.
    pub async fn new(
        client: &ControllerClient,
        tenant_name: &str,
        spec: NetworkSpec,
    ) -> Result<Self> {
        let key = composite_key(&[tenant_name, &spec.name]);
        let existing = networks::list_networks(client).await?;

        if existing.iter().any(|n| n.key() == key) {
            tracing::debug!("Network {} already exists", key);
        } else {
            networks::create_network(client, tenant_name, &spec).await?;
        }

        Ok(Self {
            client: client.clone(),
            tenant_name: tenant_name.to_string(),
            spec,
            groups: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    /// Composite key `tenant:network`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.spec.name])
    }

    pub fn pkt_tag(&self) -> u32 {
        self.spec.pkt_tag
    }

    pub fn subnet(&self) -> &str {
        &self.spec.subnet
    }

    pub fn gateway(&self) -> &str {
        &self.spec.gateway
    }

    pub fn encap(&self) -> Encap {
        self.spec.encap
    }

    /// Create an endpoint group in this network with the given policies attached
    pub async fn new_group(
        &mut self,
        name: &str,
        policies: Vec<String>,
    ) -> Result<&mut EndpointGroup> {
        let group = EndpointGroup::new(
            &self.client,
            &self.tenant_name,
            &self.spec.name,
            name,
            policies,
        )
        .await?;

        Ok(register(&mut self.groups, name, group))
    }

    pub fn group(&self, name: &str) -> Option<&EndpointGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut EndpointGroup> {
        self.groups.get_mut(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &EndpointGroup> {
        self.groups.values()
    }

    /// Delete a group created through this network; unknown names are ignored
    pub async fn delete_group(&mut self, name: &str) -> Result<()> {
        let Some(group) = self.groups.get(name) else {
            return Ok(());
        };

        group.delete_remote().await?;
        self.groups.remove(name);
        Ok(())
    }

    pub(crate) async fn delete_remote(&self) -> Result<()> {
        networks::delete_network(&self.client, &self.tenant_name, &self.spec.name).await
    }

    /// Delete the network only; its groups stay on the controller
    pub async fn delete(self) -> Result<()> {
        self.delete_remote().await
    }

    /// Delete every known endpoint group, then the network
    ///
    /// On failure the network comes back holding the groups still live.
    pub async fn delete_cascade(mut self) -> std::result::Result<(), CascadeError<Self>> {
        if let Err(error) = self.delete_children().await {
            return Err(CascadeError::new(self, error));
        }
        if let Err(error) = self.delete_remote().await {
            return Err(CascadeError::new(self, error));
        }
        Ok(())
    }

    pub(crate) async fn delete_children(&mut self) -> Result<()> {
        for name in sorted_keys(&self.groups) {
            if let Some(group) = self.groups.get(&name) {
                group.delete_remote().await?;
            }
            self.groups.remove(&name);
        }
        Ok(())
    }
}
