//! Resource operations
//!
//! One create/delete/list triplet per controller collection. Creates POST a
//! full replacement document; the controller has no partial update.
//!
//! - [`tenants`] - top-level isolation domains
//! - [`networks`] - virtual segments inside a tenant
//! - [`endpoint_groups`] - named endpoint sets policies attach to
//! - [`policies`] - named rule collections
//! - [`rules`] - single allow/deny directives
//! - [`globals`] - controller-wide fabric settings

pub mod endpoint_groups;
pub mod globals;
pub mod networks;
pub mod policies;
pub mod rules;
pub mod tenants;

use crate::api::client::{Collection, ControllerClient};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use endpoint_groups::{
    create_endpoint_group, delete_endpoint_group, list_endpoint_groups, EndpointGroupPayload,
    EndpointGroupRecord,
};
pub use globals::{get_global_settings, set_fabric_mode, FabricMode, GlobalPayload, GlobalRecord};
pub use networks::{
    create_network, delete_network, list_networks, Encap, NetworkPayload, NetworkRecord,
    NetworkSpec,
};
pub use policies::{create_policy, delete_policy, list_policies, PolicyPayload, PolicyRecord};
pub use rules::{
    create_rule, delete_rule, list_rules, Direction, RuleAction, RulePayload, RuleRecord,
    RuleSpec,
};
pub use tenants::{create_tenant, delete_tenant, list_tenants, TenantPayload, TenantRecord};

/// GET a collection and decode it as an array of records
pub(crate) async fn list_collection<T: DeserializeOwned>(
    client: &ControllerClient,
    collection: Collection,
) -> Result<Vec<T>> {
    let url = client.collection_url(collection);
    let body = client.get(&url).await?;
    decode_list(&url, body)
}

/// Decode a list body; `null` (empty response) lists as nothing
pub(crate) fn decode_list<T: DeserializeOwned>(url: &str, body: Value) -> Result<Vec<T>> {
    if body.is_null() {
        return Ok(Vec::new());
    }

    serde_json::from_value(body).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_list_null_is_empty() {
        let records: Vec<TenantRecord> = decode_list("u", Value::Null).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_list_rejects_object() {
        let result: Result<Vec<TenantRecord>> = decode_list("u", json!({"tenantName": "blue"}));
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn test_decode_list_ignores_unknown_fields() {
        let records: Vec<PolicyRecord> = decode_list(
            "u",
            json!([{"tenantName": "blue", "policyName": "web", "link-sets": {}}]),
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key(), "blue:web");
    }
}
