use serde::de::DeserializeOwned;

use crate::{Error, Result};

// A manifest template compiled into the crate.
pub(crate) struct Asset {
    pub name: &'static str,
    pub contents: &'static str,
}

macro_rules! asset {
    ($path:literal) => {
        Asset {
            name: $path,
            contents: include_str!(concat!("../assets/", $path)),
        }
    };
}

pub(crate) const NAMESPACE: Asset = asset!("router/namespace.yaml");
pub(crate) const SERVICE_ACCOUNT: Asset = asset!("router/service-account.yaml");
pub(crate) const CLUSTER_ROLE: Asset = asset!("router/cluster-role.yaml");
pub(crate) const CLUSTER_ROLE_BINDING: Asset = asset!("router/cluster-role-binding.yaml");
pub(crate) const DEPLOYMENT: Asset = asset!("router/deployment.yaml");
pub(crate) const SERVICE_INTERNAL: Asset = asset!("router/service-internal.yaml");
pub(crate) const SERVICE_CLOUD: Asset = asset!("router/service-cloud.yaml");

impl Asset {
    // Each call decodes a fresh object, so callers own and may mutate the result.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_str(self.contents)
            .map_err(|source| Error::TemplateError {
                asset: self.name,
                source,
            })
    }

    pub fn malformed(&self, reason: &'static str) -> Error {
        Error::MalformedTemplate {
            asset: self.name,
            reason,
        }
    }
}
