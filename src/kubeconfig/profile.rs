// src/kubeconfig/profile.rs
use std::fmt;
use url::Url;

use crate::error::{Error, ErrorKind, Result};

/// Everything a client builder needs to talk to one API server.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub host: String,
    pub ca_data: Vec<u8>,
    pub cert_data: Vec<u8>,
    pub key_data: Vec<u8>,
}

impl ConnectionProfile {
    pub fn new(
        host: impl Into<String>,
        ca_data: impl Into<Vec<u8>>,
        cert_data: impl Into<Vec<u8>>,
        key_data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            host: host.into(),
            ca_data: ca_data.into(),
            cert_data: cert_data.into(),
            key_data: key_data.into(),
        }
    }

    /// Checks that `host` is an absolute http(s) URL.
    pub fn validate_host(&self) -> Result<Url> {
        let url = Url::parse(&self.host).map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidArgument,
                format!("host {:?} is not a valid URL", self.host),
                e,
            )
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::invalid_argument(format!(
                "host {:?} has unsupported scheme {:?}",
                self.host, other
            ))),
        }
    }
}

// Key material stays out of debug output and logs.
impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("host", &self.host)
            .field("ca_data", &format_args!("<{} bytes>", self.ca_data.len()))
            .field("cert_data", &format_args!("<{} bytes>", self.cert_data.len()))
            .field("key_data", &format_args!("<{} bytes>", self.key_data.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_host() {
        let profile = ConnectionProfile::new("https://10.0.0.1:6443", "", "", "");
        assert_eq!(profile.validate_host().unwrap().port(), Some(6443));

        let profile = ConnectionProfile::new("10.0.0.1:6443", "", "", "");
        assert!(profile.validate_host().unwrap_err().is_invalid_argument());

        let profile = ConnectionProfile::new("ftp://10.0.0.1", "", "", "");
        assert!(profile.validate_host().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn debug_hides_key_material() {
        let profile = ConnectionProfile::new("http://127.0.0.1", "ca", "cert", "secret-key");
        let out = format!("{:?}", profile);
        assert!(out.contains("http://127.0.0.1"));
        assert!(out.contains("<10 bytes>"));
        assert!(!out.contains("secret-key"));
    }
}
