// src/resolver/service.rs
use std::fs;
use std::path::Path;

use super::resolve::{resolve, select_source, SecretRef, Source};
use crate::error::{Error, ErrorKind, Result};
use crate::kubeconfig::{self, ConnectionProfile};
use crate::secrets::SecretLookup;
use crate::utils::logging::Logger;

/// Turns a resolved profile into an API client. Client construction lives
/// outside this crate.
pub trait ClientFactory {
    type Client;

    fn new_client(&self, profile: &ConnectionProfile) -> Result<Self::Client>;
}

/// Something that can produce a connection profile for a secret reference.
pub trait ProfileSource: Send + Sync {
    fn profile_for(
        &self,
        reference: &SecretRef,
        ambient: &ConnectionProfile,
    ) -> Result<ConnectionProfile>;
}

/// Collaborators for [`KubeConfig`]. Both are required.
#[derive(Default)]
pub struct Config {
    pub secrets: Option<Box<dyn SecretLookup>>,
    pub logger: Option<Box<dyn Logger>>,
}

/// Connects callers to remote clusters based on kubeconfig secrets.
pub struct KubeConfig {
    secrets: Box<dyn SecretLookup>,
    logger: Box<dyn Logger>,
}

impl KubeConfig {
    pub fn new(config: Config) -> Result<Self> {
        let secrets = config
            .secrets
            .ok_or_else(|| Error::invalid_argument("Config.secrets must not be empty"))?;
        let logger = config
            .logger
            .ok_or_else(|| Error::invalid_argument("Config.logger must not be empty"))?;

        Ok(Self { secrets, logger })
    }

    pub fn resolve(
        &self,
        reference: &SecretRef,
        ambient: &ConnectionProfile,
    ) -> Result<ConnectionProfile> {
        match select_source(&reference.name) {
            Source::Ambient => self
                .logger
                .debug_log("no kubeconfig secret configured, using current cluster"),
            Source::Secret => self.logger.debug_log(&format!(
                "reading kubeconfig from secret {:?} in namespace {:?}",
                reference.name, reference.namespace
            )),
        }

        let result = resolve(
            &reference.name,
            &reference.namespace,
            ambient,
            &*self.secrets,
        );
        match &result {
            Ok(profile) => self
                .logger
                .debug_log(&format!("resolved connection to {}", profile.host)),
            Err(e) => self
                .logger
                .log(&format!("failed to resolve connection: {}", e)),
        }
        result
    }

    /// Returns `ambient_client` when the reference is empty, otherwise builds a
    /// fresh client for the cluster stored in the secret.
    pub fn client_for<F: ClientFactory>(
        &self,
        reference: &SecretRef,
        ambient_client: F::Client,
        factory: &F,
    ) -> Result<F::Client> {
        if reference.is_ambient() {
            return Ok(ambient_client);
        }

        let profile = self.resolve(reference, &ConnectionProfile::default())?;
        factory.new_client(&profile).map_err(|e| {
            e.context(format!(
                "creating client for secret {:?} in namespace {:?}",
                reference.name, reference.namespace
            ))
        })
    }
}

impl ProfileSource for KubeConfig {
    fn profile_for(
        &self,
        reference: &SecretRef,
        ambient: &ConnectionProfile,
    ) -> Result<ConnectionProfile> {
        self.resolve(reference, ambient)
    }
}

/// Reads the ambient profile from a kubeconfig file on disk.
pub fn load_ambient_profile(path: &Path) -> Result<ConnectionProfile> {
    let bytes = fs::read(path).map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Transient
        };
        Error::with_source(
            kind,
            format!("failed to read kubeconfig {}", path.display()),
            e,
        )
    })?;
    kubeconfig::profile_from_bytes(&bytes)
        .map_err(|e| e.context(format!("loading kubeconfig {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubeconfig::render_kubeconfig;
    use crate::secrets::MemorySecretStore;
    use crate::utils::logging::NoopLogger;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingLogger {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Logger for RecordingLogger {
        fn log(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }

        fn debug_log(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("[DEBUG] {}", message));
        }
    }

    struct HostClientFactory;

    impl ClientFactory for HostClientFactory {
        type Client = String;

        fn new_client(&self, profile: &ConnectionProfile) -> Result<String> {
            if profile.host.is_empty() {
                return Err(Error::invalid_argument("host must not be empty"));
            }
            Ok(format!("client for {}", profile.host))
        }
    }

    fn remote() -> ConnectionProfile {
        ConnectionProfile::new("https://10.0.0.1:6443", "ca", "cert", "key")
    }

    fn service(store: MemorySecretStore, logger: RecordingLogger) -> KubeConfig {
        KubeConfig::new(Config {
            secrets: Some(Box::new(store)),
            logger: Some(Box::new(logger)),
        })
        .unwrap()
    }

    #[test]
    fn new_requires_collaborators() {
        let err = KubeConfig::new(Config::default()).err().unwrap();
        assert!(err.is_invalid_argument());

        let err = KubeConfig::new(Config {
            secrets: Some(Box::new(MemorySecretStore::new())),
            logger: None,
        })
        .err()
        .unwrap();
        assert!(err.is_invalid_argument());

        assert!(KubeConfig::new(Config {
            secrets: Some(Box::new(MemorySecretStore::new())),
            logger: Some(Box::new(NoopLogger)),
        })
        .is_ok());
    }

    #[test]
    fn client_for_reuses_ambient_client() {
        let k = service(MemorySecretStore::new(), RecordingLogger::default());

        let client = k
            .client_for(&SecretRef::default(), "current".to_string(), &HostClientFactory)
            .unwrap();
        assert_eq!(client, "current");
    }

    #[test]
    fn client_for_builds_remote_client() {
        let mut store = MemorySecretStore::new();
        let kubeconfig = render_kubeconfig(&remote(), "acme").unwrap();
        store.insert_kubeconfig("org-acme", "acme-kubeconfig", kubeconfig);
        let logger = RecordingLogger::default();
        let k = service(store, logger.clone());

        let reference = SecretRef::new("acme-kubeconfig", "org-acme");
        let client = k
            .client_for(&reference, "current".to_string(), &HostClientFactory)
            .unwrap();
        assert_eq!(client, "client for https://10.0.0.1:6443");

        let lines = logger.lines.lock().unwrap();
        assert!(lines.iter().any(|l| l.contains("acme-kubeconfig")));
        assert!(lines.iter().all(|l| !l.contains("key")));
    }

    #[test]
    fn factory_errors_are_wrapped() {
        let mut store = MemorySecretStore::new();
        let hostless = ConnectionProfile::new("", "ca", "cert", "key");
        store.insert_kubeconfig("ns", "hostless", render_kubeconfig(&hostless, "c").unwrap());
        let k = service(store, RecordingLogger::default());

        let err = k
            .client_for(
                &SecretRef::new("hostless", "ns"),
                "current".to_string(),
                &HostClientFactory,
            )
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("hostless"));
    }

    #[test]
    fn failures_are_logged() {
        let logger = RecordingLogger::default();
        let k = service(MemorySecretStore::new(), logger.clone());

        let err = k
            .profile_for(&SecretRef::new("missing", "ns"), &remote())
            .unwrap_err();
        assert!(err.is_not_found());

        let lines = logger.lines.lock().unwrap();
        assert!(lines
            .iter()
            .any(|l| l.starts_with("failed to resolve connection")));
    }

    #[test]
    fn ambient_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, render_kubeconfig(&remote(), "local").unwrap()).unwrap();

        assert_eq!(load_ambient_profile(&path).unwrap(), remote());

        let err = load_ambient_profile(&dir.path().join("absent")).unwrap_err();
        assert!(err.is_not_found());

        fs::write(&path, "clusters: 1").unwrap();
        assert!(load_ambient_profile(&path).unwrap_err().is_decoding());
    }
}
