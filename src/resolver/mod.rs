// src/resolver/mod.rs
mod resolve;
mod service;
pub mod testing;

pub use resolve::{resolve, select_source, SecretRef, Source};
pub use service::{load_ambient_profile, ClientFactory, Config, KubeConfig, ProfileSource};
