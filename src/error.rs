// src/error.rs
use std::fmt;
use std::io;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of every failure the crate can surface. Callers match on
/// this instead of inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty or absent required argument (cluster name, profile, collaborator).
    InvalidArgument,
    /// The serializer failed on an in-memory document.
    Encoding,
    /// Bytes are not a well-formed document, or a credential field is not base64.
    Decoding,
    /// Well-formed document whose context/cluster/user references do not resolve.
    MalformedDocument,
    /// No secret with the given name in the given namespace.
    NotFound,
    /// The secret exists but has no `kubeConfig` key.
    MissingKey,
    /// The secret store could not be reached. Callers may retry.
    Transient,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Encoding => write!(f, "encoding error"),
            Self::Decoding => write!(f, "decoding error"),
            Self::MalformedDocument => write!(f, "malformed document"),
            Self::NotFound => write!(f, "not found"),
            Self::MissingKey => write!(f, "missing key"),
            Self::Transient => write!(f, "transient error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind}: {context}")]
pub struct Error {
    kind: ErrorKind,
    context: String,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            source: None,
        }
    }

    pub fn with_source(
        kind: ErrorKind,
        context: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, context)
    }

    pub fn malformed(context: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDocument, context)
    }

    /// Wraps `self` under an outer message. The kind is carried over unchanged.
    pub fn context(self, context: impl Into<String>) -> Self {
        let kind = self.kind;
        Self::with_source(kind, context, self)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind == ErrorKind::InvalidArgument
    }

    pub fn is_decoding(&self) -> bool {
        self.kind == ErrorKind::Decoding
    }

    pub fn is_malformed_document(&self) -> bool {
        self.kind == ErrorKind::MalformedDocument
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_missing_key(&self) -> bool {
        self.kind == ErrorKind::MissingKey
    }

    pub fn is_transient(&self) -> bool {
        self.kind == ErrorKind::Transient
    }
}

/// Display of `err` followed by each of its causes, outermost first.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match error.kind {
            ErrorKind::InvalidArgument => io::ErrorKind::InvalidInput,
            ErrorKind::Decoding | ErrorKind::MalformedDocument => io::ErrorKind::InvalidData,
            ErrorKind::NotFound | ErrorKind::MissingKey => io::ErrorKind::NotFound,
            ErrorKind::Encoding | ErrorKind::Transient => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}
