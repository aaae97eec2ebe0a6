// The namespace the router workloads run in.
pub const ROUTER_NAMESPACE: &str = "openshift-ingress";

// The namespace the operator and its ClusterIngress objects live in.
pub const OPERATOR_NAMESPACE: &str = "openshift-ingress-operator";

// Name of the ClusterIngress created for a fresh cluster.
pub const DEFAULT_CLUSTER_INGRESS_NAME: &str = "default";

// Annotation asking the service CA to issue a serving certificate into the named secret.
pub const SERVING_CERT_SECRET_ANNOTATION: &str =
    "service.alpha.openshift.io/serving-cert-secret-name";

// Prefix of the default certificate secret; the ClusterIngress name is appended.
pub const CERTIFICATE_SECRET_PREFIX: &str = "router-certs-";

// Pod label distinguishing the routers of different ClusterIngress objects.
pub const ROUTER_POD_LABEL: &str = "router";

// Node label every router lands on unless the ClusterIngress overrides placement.
pub const DEFAULT_NODE_SELECTOR_KEY: &str = "node-role.kubernetes.io/worker";

// Router environment: namespaces whose routes are admitted.
pub const NAMESPACE_LABELS_ENV: &str = "NAMESPACE_LABELS";

// Router environment: routes that are admitted.
pub const ROUTE_LABELS_ENV: &str = "ROUTE_LABELS";

// Router environment: hostname reported in route status.
pub const CANONICAL_HOSTNAME_ENV: &str = "ROUTER_CANONICAL_HOSTNAME";

// ConfigMap in kube-system holding the installer's configuration.
pub const INSTALL_CONFIG_MAP: &str = "cluster-config-v1";

// Key of the install config document inside `INSTALL_CONFIG_MAP`.
pub const INSTALL_CONFIG_KEY: &str = "install-config";
