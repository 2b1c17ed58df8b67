// src/secrets/memory.rs
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{kubeconfig_entry, SecretLookup, KUBECONFIG_KEY};
use crate::error::{Error, ErrorKind, Result};

/// In-process secret store. Counts lookups and can be told to fail every call
/// as if the backing store were unreachable.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: BTreeMap<(String, String), BTreeMap<String, Vec<u8>>>,
    unavailable: Option<String>,
    calls: AtomicUsize,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a secret with arbitrary data keys.
    pub fn insert(
        &mut self,
        namespace: &str,
        name: &str,
        data: impl IntoIterator<Item = (String, Vec<u8>)>,
    ) {
        self.secrets.insert(
            (namespace.to_string(), name.to_string()),
            data.into_iter().collect(),
        );
    }

    /// Adds a secret holding `kubeconfig` under the conventional key.
    pub fn insert_kubeconfig(
        &mut self,
        namespace: &str,
        name: &str,
        kubeconfig: impl Into<Vec<u8>>,
    ) {
        self.insert(
            namespace,
            name,
            [(KUBECONFIG_KEY.to_string(), kubeconfig.into())],
        );
    }

    pub fn set_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SecretLookup for MemorySecretStore {
    fn fetch(&self, name: &str, namespace: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.unavailable {
            return Err(Error::new(
                ErrorKind::Transient,
                format!("secret store unavailable: {}", reason),
            ));
        }

        let data = self
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    format!("can't find secret {:?} in namespace {:?}", name, namespace),
                )
            })?;
        kubeconfig_entry(data, name, namespace)
    }
}
