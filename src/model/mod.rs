//! Object model
//!
//! Stateful handles over controller resources. A handle exists only while
//! its remote object is live: constructors create the remote object and
//! `delete(self)` consumes the handle.
//!
//! Child maps are a local cache filled by the handle's own create calls.
//! They are never refreshed from the controller.
//!
//! ```no_run
//! use netpolicy_client::api::client::ControllerClient;
//! use netpolicy_client::model::Tenant;
//!
//! async fn example() -> netpolicy_client::Result<()> {
//!     let client = ControllerClient::for_host("netmaster")?;
//!     let mut tenant = Tenant::new(&client, "blue").await?;
//!     let network = tenant.new_network("net1", 1, "10.0.0.0/24", "10.0.0.1").await?;
//!     network.new_group("web", vec!["allow-http".to_string()]).await?;
//!     Ok(())
//! }
//! ```

mod group;
mod network;
mod policy;
mod rule;
mod tenant;

pub use group::EndpointGroup;
pub use network::Network;
pub use policy::Policy;
pub use rule::Rule;
pub use tenant::Tenant;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Insert or replace a child and hand back a reference to it
fn register<'a, V>(children: &'a mut HashMap<String, V>, key: &str, child: V) -> &'a mut V {
    match children.entry(key.to_string()) {
        Entry::Occupied(mut slot) => {
            slot.insert(child);
            slot.into_mut()
        }
        Entry::Vacant(slot) => slot.insert(child),
    }
}

/// Child names in a stable order, for cascades
fn sorted_keys<V>(children: &HashMap<String, V>) -> Vec<String> {
    let mut keys: Vec<String> = children.keys().cloned().collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces_existing_entry() {
        let mut children = HashMap::new();
        *register(&mut children, "a", 1) += 10;
        assert_eq!(children["a"], 11);

        register(&mut children, "a", 5);
        assert_eq!(children.len(), 1);
        assert_eq!(children["a"], 5);
    }

    #[test]
    fn test_sorted_keys() {
        let children: HashMap<String, ()> = ["net2", "net1", "net10"]
            .iter()
            .map(|k| (k.to_string(), ()))
            .collect();
        assert_eq!(sorted_keys(&children), vec!["net1", "net10", "net2"]);
    }
}
