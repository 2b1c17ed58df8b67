// src/resolver/testing.rs
//! Canned [`ProfileSource`] for tests of code that depends on resolution.

use super::resolve::SecretRef;
use super::service::ProfileSource;
use crate::error::{Error, ErrorKind, Result};
use crate::kubeconfig::ConnectionProfile;

#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    profile: ConnectionProfile,
    error: Option<ErrorKind>,
}

impl StaticProfileSource {
    pub fn new(profile: ConnectionProfile) -> Self {
        Self {
            profile,
            error: None,
        }
    }

    /// Every call fails with `kind`.
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            profile: ConnectionProfile::default(),
            error: Some(kind),
        }
    }
}

impl ProfileSource for StaticProfileSource {
    fn profile_for(
        &self,
        reference: &SecretRef,
        _ambient: &ConnectionProfile,
    ) -> Result<ConnectionProfile> {
        match self.error {
            Some(kind) => Err(Error::new(
                kind,
                format!("static profile source for secret {:?}", reference.name),
            )),
            None => Ok(self.profile.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_configured_profile_or_error() {
        let profile = ConnectionProfile::new("https://10.0.0.1:6443", "ca", "cert", "key");
        let source = StaticProfileSource::new(profile.clone());
        let got = source
            .profile_for(&SecretRef::new("any", "ns"), &ConnectionProfile::default())
            .unwrap();
        assert_eq!(got, profile);

        let source: Box<dyn ProfileSource> =
            Box::new(StaticProfileSource::failing(ErrorKind::NotFound));
        let err = source
            .profile_for(&SecretRef::new("any", "ns"), &profile)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
