use clap::Args;
use k8s_openapi::api::core::v1::ConfigMap;
use serde::{Deserialize, Serialize};

use crate::consts::{INSTALL_CONFIG_KEY, INSTALL_CONFIG_MAP};
use crate::{Error, Result};

/// Operator-wide settings shared by every generated manifest.
#[derive(Debug, Args, Clone, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Container image the router Deployment runs.
    #[clap(long, env = "IMAGE")]
    pub router_image: String,
}

impl OperatorConfig {
    pub fn new(router_image: impl Into<String>) -> Self {
        Self {
            router_image: router_image.into(),
        }
    }
}

/// The subset of the installer's configuration this crate reads.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    #[serde(default)]
    pub metadata: InstallConfigMetadata,
    #[serde(default)]
    pub base_domain: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct InstallConfigMetadata {
    #[serde(default)]
    pub name: String,
}

impl InstallConfig {
    pub fn new(name: impl Into<String>, base_domain: impl Into<String>) -> Self {
        Self {
            metadata: InstallConfigMetadata { name: name.into() },
            base_domain: base_domain.into(),
        }
    }

    // Parses an install-config.yaml document. Fields other than the cluster name and base
    // domain are ignored.
    pub fn from_yaml(doc: &str) -> Result<Self> {
        serde_yaml::from_str(doc).map_err(Error::MalformedInstallConfig)
    }

    // Reads the install config out of the installer's `cluster-config-v1` ConfigMap.
    pub fn from_config_map(config_map: &ConfigMap) -> Result<Self> {
        let doc = config_map
            .data
            .as_ref()
            .and_then(|data| data.get(INSTALL_CONFIG_KEY))
            .ok_or_else(|| {
                Error::InvalidInstallConfig(format!(
                    "ConfigMap {INSTALL_CONFIG_MAP} has no {INSTALL_CONFIG_KEY} key"
                ))
            })?;
        Self::from_yaml(doc)
    }
}
