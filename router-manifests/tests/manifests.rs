use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{SecretVolumeSource, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use router_manifests::consts::{
    NAMESPACE_LABELS_ENV, ROUTE_LABELS_ENV, SERVING_CERT_SECRET_ANNOTATION,
};
use router_manifests::naming::default_certificate_secret_name;
use router_manifests::*;

const IMAGE: &str = "quay.io/openshift/router:latest";

fn selector(key: &str, value: &str) -> LabelSelector {
    LabelSelector {
        match_labels: Some(BTreeMap::from([(key.to_string(), value.to_string())])),
        ..Default::default()
    }
}

fn env_value(deployment: &Deployment, name: &str) -> Option<String> {
    deployment.spec.as_ref()?.template.spec.as_ref()?.containers[0]
        .env
        .as_ref()?
        .iter()
        .find(|var| var.name == name)
        .and_then(|var| var.value.clone())
}

fn secret_volume(deployment: &Deployment) -> &SecretVolumeSource {
    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
    pod_spec.volumes.as_ref().unwrap()[0]
        .secret
        .as_ref()
        .expect("router Deployment has no secret volume")
}

fn serving_cert_secret(service: &Service) -> Option<&String> {
    service
        .metadata
        .annotations
        .as_ref()?
        .get(SERVING_CERT_SECRET_ANNOTATION)
}

fn node_selector(deployment: &Deployment) -> BTreeMap<String, String> {
    deployment
        .spec
        .as_ref()
        .unwrap()
        .template
        .spec
        .as_ref()
        .unwrap()
        .node_selector
        .clone()
        .unwrap_or_default()
}

#[test]
fn test_manifests() {
    let config = OperatorConfig::new(IMAGE);
    let f = Factory::new(config.clone());

    let mut ci = ClusterIngress::new(
        "default",
        ClusterIngressSpec {
            namespace_selector: Some(selector("foo", "bar")),
            route_selector: Some(selector("baz", "quux")),
            ..Default::default()
        },
    );

    f.router_namespace().expect("invalid RouterNamespace");
    f.router_service_account().expect("invalid RouterServiceAccount");
    f.router_cluster_role().expect("invalid RouterClusterRole");
    f.router_cluster_role_binding()
        .expect("invalid RouterClusterRoleBinding");

    let deployment = f.router_deployment(&ci).expect("invalid router Deployment");
    assert_eq!(
        env_value(&deployment, NAMESPACE_LABELS_ENV).as_deref(),
        Some("foo=bar")
    );
    assert_eq!(
        env_value(&deployment, ROUTE_LABELS_ENV).as_deref(),
        Some("baz=quux")
    );
    assert!(
        !node_selector(&deployment).is_empty(),
        "router Deployment has no default node selector"
    );

    let default_secret_name = default_certificate_secret_name("default");
    assert_eq!(default_secret_name, "router-certs-default");
    assert_eq!(
        secret_volume(&deployment).secret_name.as_ref(),
        Some(&default_secret_name)
    );

    let svc = f
        .router_service_internal(&ci)
        .expect("invalid RouterServiceInternal");
    assert_eq!(serving_cert_secret(&svc), Some(&default_secret_name));

    let secret_name = "secret-custom".to_string();
    ci.spec.default_certificate_secret = Some(secret_name.clone());
    ci.spec.node_placement = Some(NodePlacement {
        node_selector: Some(selector("xyzzy", "quux")),
    });

    let deployment = f.router_deployment(&ci).expect("invalid router Deployment");
    assert_eq!(
        node_selector(&deployment),
        BTreeMap::from([("xyzzy".to_string(), "quux".to_string())])
    );
    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
    let image = pod_spec.containers[0].image.clone();
    assert_eq!(image.as_deref(), Some(config.router_image.as_str()));
    assert_eq!(secret_volume(&deployment).secret_name.as_ref(), Some(&secret_name));

    let svc = f
        .router_service_internal(&ci)
        .expect("invalid RouterServiceInternal");
    assert_eq!(serving_cert_secret(&svc), Some(&secret_name));

    f.router_service_cloud(&ci).expect("invalid RouterServiceCloud");
}

#[test]
fn test_selectors_absent_from_environment() {
    let f = Factory::new(OperatorConfig::new(IMAGE));
    let ci = ClusterIngress::new("default", ClusterIngressSpec::default());
    let deployment = f.router_deployment(&ci).unwrap();

    let env = deployment.spec.unwrap().template.spec.unwrap().containers[0]
        .env
        .clone()
        .unwrap_or_default();
    assert!(env
        .iter()
        .all(|var| var.name != NAMESPACE_LABELS_ENV && var.name != ROUTE_LABELS_ENV));
}

#[test]
fn test_deployment_is_deterministic() {
    let f = Factory::new(OperatorConfig::new(IMAGE));
    let ci = ClusterIngress::new(
        "shard-b",
        ClusterIngressSpec {
            namespace_selector: Some(LabelSelector {
                match_labels: Some(BTreeMap::from([
                    ("c".to_string(), "3".to_string()),
                    ("a".to_string(), "1".to_string()),
                    ("b".to_string(), "2".to_string()),
                ])),
                ..Default::default()
            }),
            ingress_domain: Some("apps.example.com".to_string()),
            ..Default::default()
        },
    );

    let first = f.router_deployment(&ci).unwrap();
    let second = f.router_deployment(&ci).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        env_value(&first, NAMESPACE_LABELS_ENV).as_deref(),
        Some("a=1,b=2,c=3")
    );
}

#[test]
fn test_secret_name_consistency() {
    let f = Factory::new(OperatorConfig::new(IMAGE));
    for secret in [None, Some("S".to_string())] {
        let ci = ClusterIngress::new(
            "edge",
            ClusterIngressSpec {
                default_certificate_secret: secret,
                ..Default::default()
            },
        );
        let deployment = f.router_deployment(&ci).unwrap();
        let svc = f.router_service_internal(&ci).unwrap();
        assert_eq!(
            secret_volume(&deployment).secret_name.as_ref(),
            serving_cert_secret(&svc)
        );
    }
}

#[test]
fn test_default_cluster_ingress() {
    let ic = InstallConfig::new("user", "cluster.openshift.com");
    let def = Factory::new(OperatorConfig::new("test"))
        .default_cluster_ingress(&ic)
        .unwrap();
    assert_eq!(
        def.spec.ingress_domain.as_deref(),
        Some("user.cluster.openshift.com")
    );
}

#[test]
fn test_empty_names_rejected() {
    let f = Factory::new(OperatorConfig::new(IMAGE));

    let ci = ClusterIngress::new("", ClusterIngressSpec::default());
    assert!(matches!(
        f.router_deployment(&ci),
        Err(Error::InvalidResource(_))
    ));

    for ic in [
        InstallConfig::new("", "cluster.openshift.com"),
        InstallConfig::new("user", ""),
    ] {
        assert!(matches!(
            f.default_cluster_ingress(&ic),
            Err(Error::InvalidInstallConfig(_))
        ));
    }
}
