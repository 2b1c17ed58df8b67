// src/secrets/mod.rs
mod kubectl;
mod memory;

pub use kubectl::KubectlSecretStore;
pub use memory::MemorySecretStore;

use std::collections::BTreeMap;

use crate::error::{Error, ErrorKind, Result};

/// Key under which a secret carries the kubeconfig document.
pub const KUBECONFIG_KEY: &str = "kubeConfig";

/// Read-only access to namespaced secrets.
///
/// `fetch` returns the raw bytes stored under [`KUBECONFIG_KEY`]. Implementations
/// fail with `NotFound` when no secret exists, `MissingKey` when the secret has
/// no kubeconfig entry and `Transient` when the store itself is unavailable.
pub trait SecretLookup: Send + Sync {
    fn fetch(&self, name: &str, namespace: &str) -> Result<Vec<u8>>;
}

pub(crate) fn kubeconfig_entry(
    mut data: BTreeMap<String, Vec<u8>>,
    name: &str,
    namespace: &str,
) -> Result<Vec<u8>> {
    data.remove(KUBECONFIG_KEY).ok_or_else(|| {
        Error::new(
            ErrorKind::MissingKey,
            format!(
                "secret {:?} in namespace {:?} has no {:?} key",
                name, namespace, KUBECONFIG_KEY
            ),
        )
    })
}
