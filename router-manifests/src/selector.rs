use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use crate::{Error, Result};

// Encodes a label selector the way the router reads it from its environment:
// `k1=v1,k2=v2`, ordered by key. An absent or empty selector encodes to "".
pub fn encode_selector(selector: Option<&LabelSelector>) -> Result<String> {
    let Some(selector) = selector else {
        return Ok(String::new());
    };
    let labels = match_labels(selector)?;
    Ok(labels
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(","))
}

// Returns the exact-match labels of a selector. Set-based expressions cannot be
// expressed as plain labels, so any expression term is an error rather than being dropped.
pub fn match_labels(selector: &LabelSelector) -> Result<BTreeMap<String, String>> {
    if let Some(expressions) = &selector.match_expressions {
        if !expressions.is_empty() {
            let terms: Vec<String> = expressions
                .iter()
                .map(|expr| format!("{} {}", expr.key, expr.operator))
                .collect();
            return Err(Error::UnsupportedSelector(format!(
                "matchExpressions are not supported: {}",
                terms.join(", ")
            )));
        }
    }
    Ok(selector.match_labels.clone().unwrap_or_default())
}
