use std::collections::BTreeMap;

use crate::consts::{CERTIFICATE_SECRET_PREFIX, DEFAULT_NODE_SELECTOR_KEY, ROUTER_POD_LABEL};
use crate::selector::match_labels;
use crate::{ClusterIngress, Error, InstallConfig, Result};

// Returns the ClusterIngress name, which every per-router name is derived from.
pub fn resource_name(ci: &ClusterIngress) -> Result<&str> {
    match ci.metadata.name.as_deref() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::InvalidResource("metadata.name must not be empty".to_string())),
    }
}

pub fn default_certificate_secret_name(name: &str) -> String {
    format!("{CERTIFICATE_SECRET_PREFIX}{name}")
}

/// Secret holding the router's default certificate.
///
/// Both the Deployment's volume and the internal Service's serving-cert annotation use this
/// value, so the router always serves the certificate the Service advertises.
pub fn certificate_secret_name(ci: &ClusterIngress) -> Result<String> {
    let name = resource_name(ci)?;
    match ci.spec.default_certificate_secret.as_deref() {
        None => Ok(default_certificate_secret_name(name)),
        Some("") => Err(Error::InvalidResource(
            "spec.defaultCertificateSecret must not be empty when set".to_string(),
        )),
        Some(secret) => Ok(secret.to_string()),
    }
}

pub fn default_node_selector() -> BTreeMap<String, String> {
    BTreeMap::from([(DEFAULT_NODE_SELECTOR_KEY.to_string(), String::new())])
}

// An override replaces the default outright; the two are never merged.
pub fn node_selector(ci: &ClusterIngress) -> Result<BTreeMap<String, String>> {
    let Some(selector) = ci
        .spec
        .node_placement
        .as_ref()
        .and_then(|placement| placement.node_selector.as_ref())
    else {
        return Ok(default_node_selector());
    };

    let labels = match_labels(selector)?;
    if labels.is_empty() {
        return Err(Error::InvalidResource(
            "spec.nodePlacement.nodeSelector must have at least one label".to_string(),
        ));
    }
    Ok(labels)
}

pub fn default_ingress_domain(install: &InstallConfig) -> Result<String> {
    if install.metadata.name.is_empty() {
        return Err(Error::InvalidInstallConfig(
            "metadata.name must not be empty".to_string(),
        ));
    }
    if install.base_domain.is_empty() {
        return Err(Error::InvalidInstallConfig(
            "baseDomain must not be empty".to_string(),
        ));
    }
    Ok(format!("{}.{}", install.metadata.name, install.base_domain))
}

pub fn deployment_name(name: &str) -> String {
    format!("router-{name}")
}

pub fn internal_service_name(name: &str) -> String {
    format!("router-internal-{name}")
}

pub fn cloud_service_name(name: &str) -> String {
    format!("router-{name}")
}

// Labels selecting the router pods of one ClusterIngress.
pub fn pod_selector(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(ROUTER_POD_LABEL.to_string(), deployment_name(name))])
}
