// src/resolver/resolve.rs
use crate::error::Result;
use crate::kubeconfig::{self, ConnectionProfile};
use crate::secrets::SecretLookup;

/// Where a remote kubeconfig lives. An empty name means "use the cluster the
/// caller is already connected to".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretRef {
    pub name: String,
    pub namespace: String,
}

impl SecretRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn is_ambient(&self) -> bool {
        self.name.is_empty()
    }
}

/// Which connection a reference selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Ambient,
    Secret,
}

pub fn select_source(secret_name: &str) -> Source {
    if secret_name.is_empty() {
        Source::Ambient
    } else {
        Source::Secret
    }
}

/// Returns `ambient` untouched when `secret_name` is empty. Otherwise reads the
/// kubeconfig stored in the secret and decodes it. Nothing is cached; every call
/// does its own lookup.
pub fn resolve(
    secret_name: &str,
    secret_namespace: &str,
    ambient: &ConnectionProfile,
    secrets: &dyn SecretLookup,
) -> Result<ConnectionProfile> {
    match select_source(secret_name) {
        Source::Ambient => Ok(ambient.clone()),
        Source::Secret => {
            let context = || {
                format!(
                    "resolve: secret {:?} in namespace {:?}",
                    secret_name, secret_namespace
                )
            };
            let bytes = secrets
                .fetch(secret_name, secret_namespace)
                .map_err(|e| e.context(context()))?;
            kubeconfig::profile_from_bytes(&bytes).map_err(|e| e.context(context()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::kubeconfig::render_kubeconfig;
    use crate::secrets::MemorySecretStore;

    fn ambient() -> ConnectionProfile {
        ConnectionProfile::new("https://kubernetes.default.svc", "ca", "cert", "key")
    }

    fn remote() -> ConnectionProfile {
        ConnectionProfile::new("https://10.0.0.1:6443", "remote-ca", "remote-cert", "remote-key")
    }

    #[test]
    fn empty_name_returns_ambient_without_lookup() {
        let store = MemorySecretStore::new();
        for namespace in ["", "default", "my-ns"] {
            let profile = resolve("", namespace, &ambient(), &store).unwrap();
            assert_eq!(profile, ambient());
        }
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn named_secret_is_fetched_and_decoded() {
        let mut store = MemorySecretStore::new();
        let kubeconfig = render_kubeconfig(&remote(), "foo").unwrap();
        store.insert_kubeconfig("my-ns", "my-secret", kubeconfig);

        let profile = resolve("my-secret", "my-ns", &ambient(), &store).unwrap();
        assert_eq!(profile.host, "https://10.0.0.1:6443");
        assert_eq!(profile, remote());

        resolve("my-secret", "my-ns", &ambient(), &store).unwrap();
        assert_eq!(store.calls(), 2);
    }

    #[test]
    fn lookup_errors_keep_their_kind() {
        let mut store = MemorySecretStore::new();
        store.insert("my-ns", "no-key", [("test".to_string(), b"test".to_vec())]);

        let err = resolve("no-key", "my-ns", &ambient(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
        assert!(err.to_string().contains("\"no-key\""));

        let err = resolve("absent", "my-ns", &ambient(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // Same name in another namespace is a different secret.
        let err = resolve("no-key", "other-ns", &ambient(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        store.set_unavailable("timeout");
        let err = resolve("no-key", "my-ns", &ambient(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transient);
    }

    #[test]
    fn payload_errors_keep_their_kind() {
        let mut store = MemorySecretStore::new();
        store.insert_kubeconfig("ns", "not-yaml", "test");
        store.insert_kubeconfig("ns", "empty-doc", "apiVersion: v1\nkind: Config\n");

        let err = resolve("not-yaml", "ns", &ambient(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);

        let err = resolve("empty-doc", "ns", &ambient(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn select_source_branches_on_name() {
        assert_eq!(select_source(""), Source::Ambient);
        assert_eq!(select_source("kubeconfig"), Source::Secret);
        assert!(SecretRef::default().is_ambient());
        assert!(!SecretRef::new("a", "b").is_ambient());
    }
}
