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

//! Pure generation of the Kubernetes objects that run an ingress router.
//!
//! A [`Factory`] is built once from an [`OperatorConfig`] and turns a [`ClusterIngress`]
//! into the router's Namespace, RBAC objects, Deployment and Services. Nothing in this
//! crate talks to a cluster; the same input always yields the same objects.

use thiserror::Error;

pub use config::{InstallConfig, InstallConfigMetadata, OperatorConfig};
pub use crd::{
    ClusterIngress, ClusterIngressHighAvailability, ClusterIngressSpec, HighAvailabilityType,
    NodePlacement,
};
pub use factory::Factory;
pub use manifests::RouterManifests;

mod assets;
pub mod config;
pub mod consts;
pub mod crd;
mod factory;
mod manifests;
pub mod naming;
pub mod selector;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid ClusterIngress: {0}")]
    InvalidResource(String),
    #[error("unsupported label selector: {0}")]
    UnsupportedSelector(String),
    #[error("invalid install config: {0}")]
    InvalidInstallConfig(String),
    #[error("failed to parse install config: {0}")]
    MalformedInstallConfig(#[source] serde_yaml::Error),
    #[error("failed to decode manifest template {asset}: {source}")]
    TemplateError {
        asset: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("malformed manifest template {asset}: {reason}")]
    MalformedTemplate {
        asset: &'static str,
        reason: &'static str,
    },
    #[error("failed to serialize manifests: {0}")]
    SerializationError(#[source] serde_yaml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
