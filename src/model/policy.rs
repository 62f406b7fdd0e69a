use super::{register, sorted_keys, Rule};
use crate::api::client::{composite_key, ControllerClient};
use crate::error::{CascadeError, Result};
use crate::resource::{policies, RuleSpec};
use std::collections::HashMap;

/// Handle for a policy and the rules added through it
#[derive(Debug)]
pub struct Policy {
    client: ControllerClient,
    tenant_name: String,
    name: String,
    rules: HashMap<String, Rule>,
}

impl Policy {
    /// Create or replace the policy on the controller
    pub async fn new(client: &ControllerClient, tenant_name: &str, name: &str) -> Result<Self> {
        policies::create_policy(client, tenant_name, name).await?;

        Ok(Self {
            client: client.clone(),
            tenant_name: tenant_name.to_string(),
            name: name.to_string(),
            rules: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    /// Composite key `tenant:policy`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.name])
    }

    /// Add a rule to this policy
    pub async fn add_rule(&mut self, spec: RuleSpec) -> Result<&mut Rule> {
        let rule_id = spec.rule_id.clone();
        let rule = Rule::new(&self.client, &self.tenant_name, &self.name, spec).await?;

        Ok(register(&mut self.rules, &rule_id, rule))
    }

    pub fn rule(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.get(rule_id)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Delete a rule added through this policy; unknown ids are ignored
    pub async fn delete_rule(&mut self, rule_id: &str) -> Result<()> {
        let Some(rule) = self.rules.get(rule_id) else {
            return Ok(());
        };

        rule.delete_remote().await?;
        self.rules.remove(rule_id);
        Ok(())
    }

    pub(crate) async fn delete_remote(&self) -> Result<()> {
        policies::delete_policy(&self.client, &self.tenant_name, &self.name).await
    }

    /// Delete the policy only; its rules stay on the controller
    pub async fn delete(self) -> Result<()> {
        self.delete_remote().await
    }

    /// Delete every known rule, then the policy
    ///
    /// On failure the policy comes back holding the rules still live.
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
        for rule_id in sorted_keys(&self.rules) {
            if let Some(rule) = self.rules.get(&rule_id) {
                rule.delete_remote().await?;
            }
            self.rules.remove(&rule_id);
        }
        Ok(())
    }
}
