//! Controller-wide settings

use crate::api::client::{Collection, ControllerClient};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Name of the single global settings object
pub const GLOBAL_KEY: &str = "global";

/// Fabric infrastructure mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FabricMode {
    #[default]
    Default,
    AciOpflex,
    Aci,
}

/// Global settings document sent on update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalPayload {
    pub name: String,
    #[serde(rename = "network-infra-type")]
    pub network_infra_type: FabricMode,
    pub vlans: String,
    pub vxlans: String,
}

impl GlobalPayload {
    pub fn new(mode: FabricMode) -> Self {
        Self {
            name: GLOBAL_KEY.to_string(),
            network_infra_type: mode,
            vlans: "1-4094".to_string(),
            vxlans: "1-10000".to_string(),
        }
    }
}

/// Global settings as stored on the controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GlobalRecord {
    pub name: String,
    #[serde(rename = "network-infra-type")]
    pub network_infra_type: String,
    pub vlans: String,
    pub vxlans: String,
}

/// Switch the fabric mode on the configured controller
pub async fn set_fabric_mode(client: &ControllerClient, mode: FabricMode) -> Result<()> {
    tracing::info!("Setting fabric mode {:?} on {}", mode, client.host());

    let url = client.object_url(Collection::Globals, &[GLOBAL_KEY]);
    client
        .post(&url, &GlobalPayload::new(mode))
        .await
        .inspect_err(|e| tracing::error!("setFabricMode failed: {}", e))?;

    Ok(())
}

/// Read the global settings object
pub async fn get_global_settings(client: &ControllerClient) -> Result<GlobalRecord> {
    let url = client.object_url(Collection::Globals, &[GLOBAL_KEY]);
    let body = client.get(&url).await?;

    serde_json::from_value(body).map_err(|source| Error::Decode { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let payload = serde_json::to_value(GlobalPayload::new(FabricMode::AciOpflex)).unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "global",
                "network-infra-type": "aci-opflex",
                "vlans": "1-4094",
                "vxlans": "1-10000",
            })
        );
    }

    #[test]
    fn test_default_mode() {
        let payload = serde_json::to_value(GlobalPayload::new(FabricMode::default())).unwrap();
        assert_eq!(payload["network-infra-type"], "default");
    }
}
