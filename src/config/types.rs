// config/types.rs
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};

use crate::resolver::SecretRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub secret_name: String,
    pub secret_namespace: String,
    pub ambient_kubeconfig: String,
    pub kubectl_path: String,
    pub log_file: Option<String>,
    pub debug: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            secret_name: String::new(),
            secret_namespace: "default".to_string(),
            ambient_kubeconfig: default_kubeconfig_path(),
            kubectl_path: "kubectl".to_string(),
            log_file: None,
            debug: false,
        }
    }
}

fn default_kubeconfig_path() -> String {
    match dirs::home_dir() {
        Some(home) => home.join(".kube").join("config").display().to_string(),
        None => "~/.kube/config".to_string(),
    }
}

impl ResolverConfig {
    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to_file(&self, path: &str) -> io::Result<()> {
        let config_str = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, config_str)
    }

    pub fn secret_ref(&self) -> SecretRef {
        SecretRef::new(self.secret_name.clone(), self.secret_namespace.clone())
    }

    pub fn ambient_kubeconfig_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.ambient_kubeconfig).to_string())
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }

    /// Applies command line overrides, then validates the result.
    pub fn with_overrides(
        mut self,
        secret_name: Option<String>,
        secret_namespace: Option<String>,
    ) -> io::Result<Self> {
        if let Some(name) = secret_name {
            self.secret_name = name;
        }
        if let Some(namespace) = secret_namespace {
            self.secret_namespace = namespace;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> io::Result<()> {
        if !self.secret_name.is_empty() {
            if self.secret_namespace.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("secret_namespace must be set for secret {}", self.secret_name),
                ));
            }
            return Ok(());
        }
        // The ambient kubeconfig is only read when no secret is configured
        if !Path::new(&self.ambient_kubeconfig_path()).exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Kubeconfig not found at: {}", self.ambient_kubeconfig),
            ));
        }
        Ok(())
    }
}
