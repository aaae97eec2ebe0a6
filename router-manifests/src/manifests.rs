use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{Namespace, Service, ServiceAccount},
    rbac::v1::{ClusterRole, ClusterRoleBinding},
};
use serde::Serialize;

use crate::{Error, Result};

/// Every object that makes up one router, as generated by [`crate::Factory::router_manifests`].
#[derive(Clone, Debug, PartialEq)]
pub struct RouterManifests {
    pub namespace: Namespace,
    pub service_account: ServiceAccount,
    pub cluster_role: ClusterRole,
    pub cluster_role_binding: ClusterRoleBinding,
    pub deployment: Deployment,
    pub service_internal: Service,
    /// Absent when the ClusterIngress asks for user-defined load balancing.
    pub service_cloud: Option<Service>,
}

impl RouterManifests {
    /// Renders the objects as a multi-document YAML stream, in the order they should be
    /// applied: namespace first, RBAC before the workload, Services last.
    pub fn to_yaml(&self) -> Result<String> {
        let mut docs = vec![
            to_document(&self.namespace)?,
            to_document(&self.service_account)?,
            to_document(&self.cluster_role)?,
            to_document(&self.cluster_role_binding)?,
            to_document(&self.deployment)?,
            to_document(&self.service_internal)?,
        ];
        if let Some(service_cloud) = &self.service_cloud {
            docs.push(to_document(service_cloud)?);
        }
        Ok(docs.join("---\n"))
    }
}

fn to_document<T: Serialize>(obj: &T) -> Result<String> {
    serde_yaml::to_string(obj).map_err(Error::SerializationError)
}
