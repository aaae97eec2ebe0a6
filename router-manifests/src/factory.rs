/*
Copyright 2024 The Kubernetes Authors.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use std::collections::BTreeMap;

use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{EnvVar, Namespace, Service, ServiceAccount},
    rbac::v1::{ClusterRole, ClusterRoleBinding},
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use tracing::debug;

use crate::assets::{self, Asset};
use crate::consts::{
    CANONICAL_HOSTNAME_ENV, DEFAULT_CLUSTER_INGRESS_NAME, NAMESPACE_LABELS_ENV,
    OPERATOR_NAMESPACE, ROUTE_LABELS_ENV, SERVING_CERT_SECRET_ANNOTATION,
};
use crate::naming::{
    certificate_secret_name, cloud_service_name, default_ingress_domain, deployment_name,
    internal_service_name, node_selector, pod_selector, resource_name,
};
use crate::selector::encode_selector;
use crate::*;

/// Generates the desired state of a router from a [`ClusterIngress`].
///
/// The factory only reads its [`OperatorConfig`] and the arguments it is given, and every
/// method returns a freshly built object. It is safe to share between threads and to call
/// repeatedly; equal inputs produce equal outputs.
#[derive(Clone, Debug)]
pub struct Factory {
    config: OperatorConfig,
}

impl Factory {
    pub fn new(config: OperatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    pub fn router_namespace(&self) -> Result<Namespace> {
        assets::NAMESPACE.decode()
    }

    pub fn router_service_account(&self) -> Result<ServiceAccount> {
        assets::SERVICE_ACCOUNT.decode()
    }

    pub fn router_cluster_role(&self) -> Result<ClusterRole> {
        assets::CLUSTER_ROLE.decode()
    }

    pub fn router_cluster_role_binding(&self) -> Result<ClusterRoleBinding> {
        assets::CLUSTER_ROLE_BINDING.decode()
    }

    /// Builds the router Deployment for `ci`.
    ///
    /// Selectors are passed to the router through `NAMESPACE_LABELS` and `ROUTE_LABELS`;
    /// an absent or empty selector leaves its variable out entirely. The pod always carries
    /// a node selector and mounts the resolved default certificate secret as its first
    /// volume.
    pub fn router_deployment(&self, ci: &ClusterIngress) -> Result<Deployment> {
        let name = resource_name(ci)?;
        let secret_name = certificate_secret_name(ci)?;
        let node_selector = node_selector(ci)?;
        let namespace_labels = encode_selector(ci.spec.namespace_selector.as_ref())?;
        let route_labels = encode_selector(ci.spec.route_selector.as_ref())?;
        let canonical_hostname = match ci.spec.ingress_domain.as_deref() {
            Some("") => {
                return Err(Error::InvalidResource(
                    "spec.ingressDomain must not be empty when set".to_string(),
                ))
            }
            domain => domain,
        };

        let template = &assets::DEPLOYMENT;
        let mut deployment: Deployment = template.decode()?;
        deployment.metadata.name = Some(deployment_name(name));

        let spec = deployment
            .spec
            .as_mut()
            .ok_or_else(|| template.malformed("deployment has no spec"))?;
        if let Some(replicas) = ci.spec.replicas {
            spec.replicas = Some(replicas);
        }

        let pod_labels = pod_selector(name);
        spec.selector = LabelSelector {
            match_labels: Some(pod_labels.clone()),
            ..Default::default()
        };
        spec.template
            .metadata
            .get_or_insert_with(ObjectMeta::default)
            .labels
            .get_or_insert_with(BTreeMap::new)
            .extend(pod_labels);

        let pod_spec = spec
            .template
            .spec
            .as_mut()
            .ok_or_else(|| template.malformed("pod template has no spec"))?;
        pod_spec.node_selector = Some(node_selector);

        let container = pod_spec
            .containers
            .first_mut()
            .ok_or_else(|| template.malformed("pod template has no containers"))?;
        container.image = Some(self.config.router_image.clone());

        let env = container.env.get_or_insert_with(Vec::new);
        if let Some(hostname) = canonical_hostname {
            env.push(env_var(CANONICAL_HOSTNAME_ENV, hostname));
        }
        if !namespace_labels.is_empty() {
            env.push(env_var(NAMESPACE_LABELS_ENV, &namespace_labels));
        }
        if !route_labels.is_empty() {
            env.push(env_var(ROUTE_LABELS_ENV, &route_labels));
        }

        let secret = pod_spec
            .volumes
            .as_mut()
            .and_then(|volumes| volumes.first_mut())
            .and_then(|volume| volume.secret.as_mut())
            .ok_or_else(|| template.malformed("first volume is not a secret volume"))?;
        secret.secret_name = Some(secret_name);

        debug!(
            clusteringress = name,
            image = %self.config.router_image,
            secret = ?secret.secret_name,
            "generated router deployment"
        );
        Ok(deployment)
    }

    /// Builds the cluster-internal Service for `ci`.
    ///
    /// The Service requests a serving certificate into the same secret the Deployment
    /// mounts.
    pub fn router_service_internal(&self, ci: &ClusterIngress) -> Result<Service> {
        let name = resource_name(ci)?;
        let secret_name = certificate_secret_name(ci)?;

        let template = &assets::SERVICE_INTERNAL;
        let mut service: Service = template.decode()?;
        service.metadata.name = Some(internal_service_name(name));
        service
            .metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(SERVING_CERT_SECRET_ANNOTATION.to_string(), secret_name);
        select_router_pods(template, &mut service, name)?;

        debug!(clusteringress = name, "generated internal router service");
        Ok(service)
    }

    pub fn router_service_cloud(&self, ci: &ClusterIngress) -> Result<Service> {
        let name = resource_name(ci)?;

        let template = &assets::SERVICE_CLOUD;
        let mut service: Service = template.decode()?;
        service.metadata.name = Some(cloud_service_name(name));
        select_router_pods(template, &mut service, name)?;

        debug!(clusteringress = name, "generated cloud router service");
        Ok(service)
    }

    /// Builds the ClusterIngress a fresh cluster starts with.
    pub fn default_cluster_ingress(&self, install: &InstallConfig) -> Result<ClusterIngress> {
        let domain = default_ingress_domain(install)?;

        let mut ci = ClusterIngress::new(
            DEFAULT_CLUSTER_INGRESS_NAME,
            ClusterIngressSpec {
                ingress_domain: Some(domain),
                high_availability: Some(ClusterIngressHighAvailability {
                    type_: HighAvailabilityType::Cloud,
                }),
                ..Default::default()
            },
        );
        ci.metadata.namespace = Some(OPERATOR_NAMESPACE.to_string());
        Ok(ci)
    }

    /// Builds every object the router for `ci` needs, or nothing if any of them fails.
    pub fn router_manifests(&self, ci: &ClusterIngress) -> Result<RouterManifests> {
        let service_cloud = if ci.spec.wants_cloud_service() {
            Some(self.router_service_cloud(ci)?)
        } else {
            None
        };

        Ok(RouterManifests {
            namespace: self.router_namespace()?,
            service_account: self.router_service_account()?,
            cluster_role: self.router_cluster_role()?,
            cluster_role_binding: self.router_cluster_role_binding()?,
            deployment: self.router_deployment(ci)?,
            service_internal: self.router_service_internal(ci)?,
            service_cloud,
        })
    }
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

fn select_router_pods(template: &Asset, service: &mut Service, name: &str) -> Result<()> {
    let spec = service
        .spec
        .as_mut()
        .ok_or_else(|| template.malformed("service has no spec"))?;
    spec.selector = Some(pod_selector(name));
    Ok(())
}
