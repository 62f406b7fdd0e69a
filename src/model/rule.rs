use crate::api::client::{composite_key, ControllerClient};
use crate::error::Result;
use crate::resource::{rules, RulePayload, RuleSpec};

/// Handle for a single rule
#[derive(Debug)]
pub struct Rule {
    client: ControllerClient,
    tenant_name: String,
    policy_name: String,
    spec: RuleSpec,
}

impl Rule {
    /// Create or replace the rule on the controller
    pub async fn new(
        client: &ControllerClient,
        tenant_name: &str,
        policy_name: &str,
        spec: RuleSpec,
    ) -> Result<Self> {
        rules::create_rule(client, tenant_name, policy_name, &spec).await?;

        Ok(Self {
            client: client.clone(),
            tenant_name: tenant_name.to_string(),
            policy_name: policy_name.to_string(),
            spec,
        })
    }

    pub fn id(&self) -> &str {
        &self.spec.rule_id
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    /// Composite key `tenant:policy:ruleId`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.policy_name, &self.spec.rule_id])
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    pub fn payload(&self) -> RulePayload<'_> {
        RulePayload::new(&self.tenant_name, &self.policy_name, &self.spec)
    }

    pub(crate) async fn delete_remote(&self) -> Result<()> {
        rules::delete_rule(
            &self.client,
            &self.tenant_name,
            &self.policy_name,
            &self.spec.rule_id,
        )
        .await
    }

    pub async fn delete(self) -> Result<()> {
        self.delete_remote().await
    }
}
