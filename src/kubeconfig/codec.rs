// src/kubeconfig/codec.rs
use base64::{engine::general_purpose, Engine as _};

use super::document::{
    self, Cluster, ConnectionDocument, Context, NamedCluster, NamedContext, NamedUser,
    Preferences, UserKeyPair, API_VERSION, KIND,
};
use super::profile::ConnectionProfile;
use crate::error::{Error, ErrorKind, Result};

const USER_SUFFIX: &str = "-user";
const CONTEXT_SUFFIX: &str = "-context";

pub fn user_name(cluster_name: &str) -> String {
    format!("{}{}", cluster_name, USER_SUFFIX)
}

pub fn context_name(cluster_name: &str) -> String {
    format!("{}{}", cluster_name, CONTEXT_SUFFIX)
}

/// Builds a single cluster/user/context document for `profile`. Names are
/// derived from `cluster_name` only.
pub fn to_document(
    profile: Option<&ConnectionProfile>,
    cluster_name: &str,
) -> Result<ConnectionDocument> {
    let profile =
        profile.ok_or_else(|| Error::invalid_argument("connection profile must not be empty"))?;
    if cluster_name.is_empty() {
        return Err(Error::invalid_argument("cluster name must not be empty"));
    }

    let user = user_name(cluster_name);
    let context = context_name(cluster_name);

    Ok(ConnectionDocument {
        api_version: API_VERSION.to_string(),
        kind: KIND.to_string(),
        clusters: vec![NamedCluster {
            name: cluster_name.to_string(),
            cluster: Cluster {
                server: profile.host.clone(),
                certificate_authority_data: general_purpose::STANDARD.encode(&profile.ca_data),
            },
        }],
        users: vec![NamedUser {
            name: user.clone(),
            user: UserKeyPair {
                client_certificate_data: general_purpose::STANDARD.encode(&profile.cert_data),
                client_key_data: general_purpose::STANDARD.encode(&profile.key_data),
            },
        }],
        contexts: vec![NamedContext {
            name: context.clone(),
            context: Context {
                cluster: cluster_name.to_string(),
                user,
            },
        }],
        current_context: context,
        preferences: Preferences {},
    })
}

/// Flattens a document holding exactly one cluster, user and context.
/// Anything else is rejected instead of guessing which entry was meant.
pub fn to_profile(doc: &ConnectionDocument) -> Result<ConnectionProfile> {
    let entries = (&doc.clusters[..], &doc.users[..], &doc.contexts[..]);
    let (cluster, user, context) = match entries {
        ([cluster], [user], [context]) => (cluster, user, context),
        _ => {
            return Err(Error::malformed(format!(
                "expected exactly one cluster, user and context, found {}, {} and {}",
                doc.clusters.len(),
                doc.users.len(),
                doc.contexts.len()
            )))
        }
    };

    if !doc.current_context.is_empty() && doc.current_context != context.name {
        return Err(Error::malformed(format!(
            "current-context {:?} does not match context {:?}",
            doc.current_context, context.name
        )));
    }
    if context.context.cluster != cluster.name {
        return Err(Error::malformed(format!(
            "context {:?} references unknown cluster {:?}",
            context.name, context.context.cluster
        )));
    }
    if context.context.user != user.name {
        return Err(Error::malformed(format!(
            "context {:?} references unknown user {:?}",
            context.name, context.context.user
        )));
    }

    let ca_data = decode_field(
        "certificate-authority-data",
        &cluster.cluster.certificate_authority_data,
    )?;
    let cert_data = decode_field("client-certificate-data", &user.user.client_certificate_data)?;
    let key_data = decode_field("client-key-data", &user.user.client_key_data)?;

    Ok(ConnectionProfile {
        host: cluster.cluster.server.clone(),
        ca_data,
        cert_data,
        key_data,
    })
}

fn decode_field(field: &str, value: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(value.trim())
        .map_err(|e| {
            Error::with_source(
                ErrorKind::Decoding,
                format!("{} is not valid base64", field),
                e,
            )
        })
}

/// Renders `profile` as kubeconfig YAML.
pub fn render_kubeconfig(profile: &ConnectionProfile, cluster_name: &str) -> Result<Vec<u8>> {
    let doc = to_document(Some(profile), cluster_name)?;
    document::serialize(&doc)
}

/// Parses kubeconfig YAML into a connection profile.
pub fn profile_from_bytes(bytes: &[u8]) -> Result<ConnectionProfile> {
    let doc = document::deserialize(bytes)?;
    to_profile(&doc)
}
