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

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ClusterIngress describes one router instance.
///
/// Every field is optional. An absent field falls back to an operator default when the
/// router's objects are generated; see [`crate::naming`] for the fallbacks.
///
/// ```yaml
/// apiVersion: ingress.openshift.io/v1alpha1
/// kind: ClusterIngress
/// metadata:
///   name: default
///   namespace: openshift-ingress-operator
/// spec:
///   ingressDomain: apps.example.com
///   routeSelector:
///     matchLabels:
///       shard: a
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "ingress.openshift.io",
    version = "v1alpha1",
    kind = "ClusterIngress",
    plural = "clusteringresses",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterIngressSpec {
    /// DNS name under which routes are exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_domain: Option<String>,

    /// Nodes the router pods may be scheduled on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_placement: Option<NodePlacement>,

    /// Secret holding the router's default certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_certificate_secret: Option<String>,

    /// Restricts the router to routes in matching namespaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<LabelSelector>,

    /// Restricts the router to matching routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_selector: Option<LabelSelector>,

    /// Desired number of router pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// How the router is exposed outside the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_availability: Option<ClusterIngressHighAvailability>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<LabelSelector>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ClusterIngressHighAvailability {
    #[serde(rename = "type")]
    pub type_: HighAvailabilityType,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum HighAvailabilityType {
    /// A cloud load balancer fronts the router.
    #[default]
    Cloud,
    /// The cluster administrator provides their own load balancing.
    UserDefined,
}

impl ClusterIngressSpec {
    /// Whether a LoadBalancer Service should be generated for this router.
    pub fn wants_cloud_service(&self) -> bool {
        self.high_availability
            .as_ref()
            .map_or(true, |ha| ha.type_ == HighAvailabilityType::Cloud)
    }
}
