// src/secrets/kubectl.rs
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::process::Command;

use super::{kubeconfig_entry, SecretLookup};
use crate::error::{Error, ErrorKind, Result};

/// Reads secrets through `kubectl get secret -o json`, using whatever
/// credentials kubectl itself is configured with.
#[derive(Debug, Clone)]
pub struct KubectlSecretStore {
    kubectl_path: String,
}

#[derive(Deserialize)]
struct SecretManifest {
    #[serde(default)]
    data: BTreeMap<String, String>,
}

impl KubectlSecretStore {
    pub fn new(kubectl_path: impl Into<String>) -> Self {
        Self {
            kubectl_path: kubectl_path.into(),
        }
    }
}

impl Default for KubectlSecretStore {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl SecretLookup for KubectlSecretStore {
    fn fetch(&self, name: &str, namespace: &str) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.kubectl_path);
        command.args(["get", "secret", name, "-o", "json"]);
        if !namespace.is_empty() {
            command.args(["--namespace", namespace]);
        }

        let output = command.output().map_err(|e| {
            Error::with_source(
                ErrorKind::Transient,
                format!("failed to run {}", self.kubectl_path),
                e,
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr, name, namespace));
        }

        let data = parse_secret(&output.stdout, name, namespace)?;
        kubeconfig_entry(data, name, namespace)
    }
}

fn classify_failure(stderr: &str, name: &str, namespace: &str) -> Error {
    let stderr = stderr.trim();
    // Only the API server's answer counts. kubectl also says "not found" about
    // its own contexts and credential plugins.
    let missing_secret = format!("secrets \"{}\" not found", name);
    if stderr.contains("(NotFound)") || stderr.contains(&missing_secret) {
        Error::new(
            ErrorKind::NotFound,
            format!(
                "can't find secret {:?} in namespace {:?}: {}",
                name, namespace, stderr
            ),
        )
    } else {
        Error::new(
            ErrorKind::Transient,
            format!(
                "kubectl failed reading secret {:?} in namespace {:?}: {}",
                name, namespace, stderr
            ),
        )
    }
}

// Secret values are base64 in the API representation.
fn parse_secret(json: &[u8], name: &str, namespace: &str) -> Result<BTreeMap<String, Vec<u8>>> {
    let manifest: SecretManifest = serde_json::from_slice(json).map_err(|e| {
        Error::with_source(
            ErrorKind::Decoding,
            format!(
                "invalid secret manifest for {:?} in namespace {:?}",
                name, namespace
            ),
            e,
        )
    })?;

    manifest
        .data
        .into_iter()
        .map(|(key, value)| {
            let bytes = general_purpose::STANDARD.decode(value.as_bytes()).map_err(|e| {
                Error::with_source(
                    ErrorKind::Decoding,
                    format!("secret {:?} key {:?} is not valid base64", name, key),
                    e,
                )
            })?;
            Ok((key, bytes))
        })
        .collect()
}
