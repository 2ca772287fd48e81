use alloc::string::String;
use core::fmt;

/// A set-once slot of [`SignatureOptions`](crate::SignatureOptions).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    /// The message hash function.
    Hash,
    /// The padding (encoding) scheme.
    Padding,
    /// The prehash request.
    Prehash,
    /// The context / user identifier.
    Context,
    /// The preferred provider.
    Provider,
    /// The explicit salt length.
    SaltSize,
}

impl Field {
    /// Name of the slot as used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Padding => "padding",
            Self::Prehash => "prehash",
            Self::Context => "context",
            Self::Provider => "provider",
            Self::SaltSize => "salt size",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors used throughout this crate.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A set-once option was supplied a second time.
    ///
    /// This is a usage error on the caller's side, not a data error.
    #[error("SignatureOptions cannot specify {0} twice")]
    AlreadySet(Field),
    /// The input was malformed, contradictory or unsupported by the algorithm.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A recognized padding family was given parameters in an unsupported shape.
    #[error("Lookup error: {0}")]
    Lookup(String),
    /// A required value was queried but never supplied.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;
