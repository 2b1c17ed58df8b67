// src/kubeconfig/mod.rs
mod codec;
pub mod document;
mod profile;

pub use codec::{
    context_name, profile_from_bytes, render_kubeconfig, to_document, to_profile, user_name,
};
pub use document::{
    deserialize, serialize, ConnectionDocument, NamedCluster, NamedContext, NamedUser,
};
pub use profile::ConnectionProfile;
