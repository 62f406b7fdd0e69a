//! Rule operations
//!
//! Rule documents name their peer relative to the owning endpoint group.
//! Ingress rules (`direction = "in"`) send the peer as `fromEndpointGroup`,
//! `fromNetwork` and `fromIpAddress`; every other direction uses the `to*`
//! keys instead.

use super::list_collection;
use crate::api::client::{composite_key, Collection, ControllerClient};
use crate::error::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Traffic direction a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    #[default]
    Both,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Both => "both",
        }
    }

    /// Wire keys for (endpoint group, network, ip address) of the peer
    fn peer_keys(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Direction::In => ("fromEndpointGroup", "fromNetwork", "fromIpAddress"),
            Direction::Out | Direction::Both => ("toEndpointGroup", "toNetwork", "toIpAddress"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    #[default]
    Allow,
    Deny,
}

impl RuleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleAction::Allow => "allow",
            RuleAction::Deny => "deny",
        }
    }
}

/// Caller-supplied attributes of a rule
///
/// Defaults: priority 1, direction both, port 0, action allow, everything
/// else empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub rule_id: String,
    pub priority: u32,
    pub direction: Direction,
    pub endpoint_group: String,
    pub network: String,
    pub ip_address: String,
    pub protocol: String,
    pub port: u16,
    pub action: RuleAction,
}

impl RuleSpec {
    pub fn new(rule_id: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            priority: 1,
            direction: Direction::default(),
            endpoint_group: String::new(),
            network: String::new(),
            ip_address: String::new(),
            protocol: String::new(),
            port: 0,
            action: RuleAction::default(),
        }
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn endpoint_group(mut self, endpoint_group: &str) -> Self {
        self.endpoint_group = endpoint_group.to_string();
        self
    }

    pub fn network(mut self, network: &str) -> Self {
        self.network = network.to_string();
        self
    }

    pub fn ip_address(mut self, ip_address: &str) -> Self {
        self.ip_address = ip_address.to_string();
        self
    }

    pub fn protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn action(mut self, action: RuleAction) -> Self {
        self.action = action;
        self
    }
}

/// Rule document sent on create
#[derive(Debug, Clone, Copy)]
pub struct RulePayload<'a> {
    pub tenant_name: &'a str,
    pub policy_name: &'a str,
    pub spec: &'a RuleSpec,
}

impl<'a> RulePayload<'a> {
    pub fn new(tenant_name: &'a str, policy_name: &'a str, spec: &'a RuleSpec) -> Self {
        Self {
            tenant_name,
            policy_name,
            spec,
        }
    }
}

impl Serialize for RulePayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let spec = self.spec;
        let (group_key, network_key, ip_key) = spec.direction.peer_keys();

        let mut map = serializer.serialize_map(Some(11))?;
        map.serialize_entry("tenantName", self.tenant_name)?;
        map.serialize_entry("policyName", self.policy_name)?;
        map.serialize_entry("ruleId", &spec.rule_id)?;
        map.serialize_entry("priority", &spec.priority)?;
        map.serialize_entry("direction", &spec.direction)?;
        map.serialize_entry(group_key, &spec.endpoint_group)?;
        map.serialize_entry(network_key, &spec.network)?;
        map.serialize_entry(ip_key, &spec.ip_address)?;
        map.serialize_entry("protocol", &spec.protocol)?;
        map.serialize_entry("port", &spec.port)?;
        map.serialize_entry("action", &spec.action)?;
        map.end()
    }
}

/// Rule as returned by the list endpoint
///
/// Both peer key sets are optional; use [`RuleRecord::peer_endpoint_group`]
/// and friends to read whichever one the direction selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleRecord {
    pub tenant_name: String,
    pub policy_name: String,
    pub rule_id: String,
    pub priority: u32,
    pub direction: String,
    pub from_endpoint_group: String,
    pub from_network: String,
    pub from_ip_address: String,
    pub to_endpoint_group: String,
    pub to_network: String,
    pub to_ip_address: String,
    pub protocol: String,
    pub port: u16,
    pub action: String,
}

impl RuleRecord {
    /// Composite key `tenant:policy:ruleId`
    pub fn key(&self) -> String {
        composite_key(&[&self.tenant_name, &self.policy_name, &self.rule_id])
    }

    fn is_ingress(&self) -> bool {
        self.direction == Direction::In.as_str()
    }

    pub fn peer_endpoint_group(&self) -> &str {
        if self.is_ingress() {
            &self.from_endpoint_group
        } else {
            &self.to_endpoint_group
        }
    }

    pub fn peer_network(&self) -> &str {
        if self.is_ingress() {
            &self.from_network
        } else {
            &self.to_network
        }
    }

    pub fn peer_ip_address(&self) -> &str {
        if self.is_ingress() {
            &self.from_ip_address
        } else {
            &self.to_ip_address
        }
    }
}

/// Create or replace a rule inside a policy
pub async fn create_rule(
    client: &ControllerClient,
    tenant_name: &str,
    policy_name: &str,
    spec: &RuleSpec,
) -> Result<()> {
    tracing::info!(
        "Adding rule {} to policy {}:{}",
        spec.rule_id,
        tenant_name,
        policy_name
    );

    let url = client.object_url(Collection::Rules, &[tenant_name, policy_name, &spec.rule_id]);
    let payload = RulePayload::new(tenant_name, policy_name, spec);
    let response = client
        .post(&url, &payload)
        .await
        .inspect_err(|e| tracing::error!("Rule add failure: {}", e))?;

    tracing::debug!("Rule add response is: {}", response);
    Ok(())
}

/// Delete a rule
pub async fn delete_rule(
    client: &ControllerClient,
    tenant_name: &str,
    policy_name: &str,
    rule_id: &str,
) -> Result<()> {
    tracing::info!("Deleting rule {}:{}:{}", tenant_name, policy_name, rule_id);

    let url = client.object_url(Collection::Rules, &[tenant_name, policy_name, rule_id]);
    client
        .delete(&url)
        .await
        .inspect_err(|e| tracing::error!("Rule delete failure: {}", e))?;

    Ok(())
}

/// List all rules
pub async fn list_rules(client: &ControllerClient) -> Result<Vec<RuleRecord>> {
    list_collection(client, Collection::Rules).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload_for(spec: &RuleSpec) -> Value {
        serde_json::to_value(RulePayload::new("blue", "allow-http", spec)).unwrap()
    }

    #[test]
    fn test_spec_defaults() {
        let spec = RuleSpec::new("1");
        assert_eq!(spec.priority, 1);
        assert_eq!(spec.direction, Direction::Both);
        assert_eq!(spec.port, 0);
        assert_eq!(spec.action, RuleAction::Allow);
        assert!(spec.protocol.is_empty());
    }

    #[test]
    fn test_ingress_payload_uses_from_keys() {
        let spec = RuleSpec::new("1")
            .direction(Direction::In)
            .endpoint_group("web")
            .network("net1")
            .ip_address("10.0.0.5")
            .protocol("tcp")
            .port(80);

        assert_eq!(
            payload_for(&spec),
            json!({
                "tenantName": "blue",
                "policyName": "allow-http",
                "ruleId": "1",
                "priority": 1,
                "direction": "in",
                "fromEndpointGroup": "web",
                "fromNetwork": "net1",
                "fromIpAddress": "10.0.0.5",
                "protocol": "tcp",
                "port": 80,
                "action": "allow",
            })
        );
    }

    #[test]
    fn test_egress_payload_uses_to_keys() {
        let spec = RuleSpec::new("2")
            .direction(Direction::Out)
            .priority(10)
            .endpoint_group("db")
            .action(RuleAction::Deny);
        let payload = payload_for(&spec);

        assert_eq!(payload["toEndpointGroup"], "db");
        assert_eq!(payload["toNetwork"], "");
        assert_eq!(payload["toIpAddress"], "");
        assert_eq!(payload["priority"], 10);
        assert_eq!(payload["action"], "deny");
        assert!(payload.get("fromEndpointGroup").is_none());
        assert!(payload.get("fromNetwork").is_none());
        assert!(payload.get("fromIpAddress").is_none());
    }

    #[test]
    fn test_default_direction_uses_to_keys() {
        let payload = payload_for(&RuleSpec::new("3"));
        assert_eq!(payload["direction"], "both");
        assert!(payload.get("toEndpointGroup").is_some());
        assert!(payload.get("fromEndpointGroup").is_none());
        assert_eq!(payload.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_record_peer_follows_direction() {
        let ingress: RuleRecord = serde_json::from_value(json!({
            "tenantName": "blue",
            "policyName": "allow-http",
            "ruleId": "1",
            "direction": "in",
            "fromEndpointGroup": "web",
        }))
        .unwrap();
        assert_eq!(ingress.key(), "blue:allow-http:1");
        assert_eq!(ingress.peer_endpoint_group(), "web");

        let egress: RuleRecord = serde_json::from_value(json!({
            "direction": "out",
            "toNetwork": "net2",
            "fromNetwork": "ignored",
        }))
        .unwrap();
        assert_eq!(egress.peer_network(), "net2");
        assert_eq!(egress.peer_ip_address(), "");
    }
}
