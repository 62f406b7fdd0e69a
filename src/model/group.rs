use crate::api::client::{composite_key, ControllerClient};
use crate::error::Result;
use crate::resource::{endpoint_groups, EndpointGroupPayload};

/// Handle for an endpoint group
///
/// Policy changes rewrite the whole remote policy list from the local copy.
/// Only one writer per group may be active at a time; two handles editing
/// the same group concurrently lose updates (last write wins).
#[derive(Debug)]
pub struct EndpointGroup {
    client: ControllerClient,
    tenant_name: String,
    network_name: String,
    name: String,
    policies: Vec<String>,
}

impl EndpointGroup {
    /// Create or replace the group on the controller
    pub async fn new(
        client: &ControllerClient,
        tenant_name: &str,
        network_name: &str,
        name: &str,
        policies: Vec<String>,
    ) -> Result<Self> {
        endpoint_groups::create_endpoint_group(client, tenant_name, network_name, name, &policies)
            .await?;

        Ok(Self {
            client: client.clone(),
            tenant_name: tenant_name.to_string(),
            network_name: network_name.to_string(),
            name: name.to_string(),
            policies,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Composite key `tenant:network:group`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.network_name, &self.name])
    }

    /// Attached policy names, in attach order
    pub fn policies(&self) -> &[String] {
        &self.policies
    }

    /// The document the next update will send
    pub fn payload(&self) -> EndpointGroupPayload {
        EndpointGroupPayload::new(
            &self.tenant_name,
            &self.network_name,
            &self.name,
            &self.policies,
        )
    }

    /// Attach a policy and push the new list
    ///
    /// On failure the local list is left as it was.
    pub async fn add_policy(&mut self, policy_name: &str) -> Result<()> {
        self.policies.push(policy_name.to_string());

        if let Err(e) = self.sync().await {
            self.policies.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Detach the first occurrence of a policy and push the new list
    ///
    /// A policy that is not attached is a no-op with no remote call.
    pub async fn remove_policy(&mut self, policy_name: &str) -> Result<()> {
        let Some(pos) = self.policies.iter().position(|p| p == policy_name) else {
            return Ok(());
        };
        let removed = self.policies.remove(pos);

        if let Err(e) = self.sync().await {
            self.policies.insert(pos, removed);
            return Err(e);
        }
        Ok(())
    }

    async fn sync(&self) -> Result<()> {
        endpoint_groups::create_endpoint_group(
            &self.client,
            &self.tenant_name,
            &self.network_name,
            &self.name,
            &self.policies,
        )
        .await
    }

    pub(crate) async fn delete_remote(&self) -> Result<()> {
        endpoint_groups::delete_endpoint_group(
            &self.client,
            &self.tenant_name,
            &self.network_name,
            &self.name,
        )
        .await
    }

    pub async fn delete(self) -> Result<()> {
        self.delete_remote().await
    }
}
