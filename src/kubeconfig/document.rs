// src/kubeconfig/document.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, ErrorKind, Result};

pub const API_VERSION: &str = "v1";
pub const KIND: &str = "Config";

/// A kubectl configuration document. Credential fields hold base64 text, exactly
/// as they appear in the YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionDocument {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedCluster>,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<NamedUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,
    #[serde(rename = "current-context")]
    pub current_context: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preferences: Preferences,
}

// kubectl writes `clusters: null` for an empty config.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub server: String,
    #[serde(rename = "certificate-authority-data")]
    pub certificate_authority_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedUser {
    pub name: String,
    pub user: UserKeyPair,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserKeyPair {
    #[serde(rename = "client-certificate-data")]
    pub client_certificate_data: String,
    #[serde(rename = "client-key-data")]
    pub client_key_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub cluster: String,
    pub user: String,
}

/// Always written as `{}`. Whatever a foreign document puts here is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {}

impl ConnectionDocument {
    /// The context entry named by `current-context`, if any.
    pub fn current_context(&self) -> Option<&NamedContext> {
        if self.current_context.is_empty() {
            return None;
        }
        self.contexts
            .iter()
            .find(|c| c.name == self.current_context)
    }
}

pub fn serialize(doc: &ConnectionDocument) -> Result<Vec<u8>> {
    let yaml = serde_yaml::to_string(doc)
        .map_err(|e| Error::with_source(ErrorKind::Encoding, "failed to encode kubeconfig", e))?;
    Ok(yaml.into_bytes())
}

pub fn deserialize(bytes: &[u8]) -> Result<ConnectionDocument> {
    serde_yaml::from_slice(bytes)
        .map_err(|e| Error::with_source(ErrorKind::Decoding, "failed to parse kubeconfig", e))
}
