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

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use router_manifests::*;
use tracing::*;
use tracing_subscriber::EnvFilter;

/// Prints the manifests of the default router for a cluster.
#[derive(Debug, Parser)]
#[clap(name = "render-manifests")]
struct Cli {
    #[clap(flatten)]
    operator: OperatorConfig,
    /// Path to the installer's install-config.yaml.
    #[clap(short, long)]
    install_config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let doc = std::fs::read_to_string(&cli.install_config).with_context(|| {
        format!(
            "failed to read install config {}",
            cli.install_config.display()
        )
    })?;
    let install = InstallConfig::from_yaml(&doc)?;

    let factory = Factory::new(cli.operator);
    let ingress = factory.default_cluster_ingress(&install)?;
    info!(
        domain = ?ingress.spec.ingress_domain,
        "rendering manifests for the default ClusterIngress"
    );

    let manifests = factory.router_manifests(&ingress)?;
    print!("{}", manifests.to_yaml()?);
    Ok(())
}
