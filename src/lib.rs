pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod resolver;
pub mod secrets;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
pub use kubeconfig::{ConnectionDocument, ConnectionProfile};
pub use resolver::{resolve, KubeConfig, SecretRef};
pub use secrets::{SecretLookup, KUBECONFIG_KEY};
