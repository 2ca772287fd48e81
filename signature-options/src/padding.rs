//! RSA padding scheme selection.

use alloc::format;
use core::fmt;

use tracing::debug;

use crate::{
    error::{Error, Result},
    hash::HashFunction,
    options::SignatureOptions,
};

/// Hash name meaning "the input is already a digest".
const RAW: &str = "Raw";

/// The RSA signature encoding a back end has to construct.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaddingScheme {
    /// No encoding; the input is signed as is.
    ///
    /// With a prehash function the input must be one of its digests.
    Raw {
        /// Hash the input was produced with, if it is checked.
        prehash: Option<HashFunction>,
    },
    /// PKCS #1 v1.5 over a hash computed by the scheme.
    Pkcs1v15 {
        /// Message hash.
        hash: HashFunction,
    },
    /// PKCS #1 v1.5 over a caller supplied digest.
    Pkcs1v15Raw {
        /// Hash used to produce the digest, if the `DigestInfo` prefix is wanted.
        prehash: Option<HashFunction>,
    },
    /// PSS with MGF1.
    Pss {
        /// Message and MGF1 hash.
        hash: HashFunction,
        /// Salt length; the hash length when unset.
        salt_size: Option<usize>,
    },
    /// PSS with MGF1 over a caller supplied digest.
    PssRaw {
        /// Hash used to produce the digest, and for MGF1.
        hash: HashFunction,
        /// Salt length; the hash length when unset.
        salt_size: Option<usize>,
    },
    /// ISO-9796-2 digital signature scheme 2.
    Iso9796Ds2 {
        /// Message hash.
        hash: HashFunction,
        /// Whether the trailer field is implicit.
        implicit: bool,
        /// Salt length; the hash length when unset.
        salt_size: Option<usize>,
    },
    /// ISO-9796-2 digital signature scheme 3 (deterministic, no salt).
    Iso9796Ds3 {
        /// Message hash.
        hash: HashFunction,
        /// Whether the trailer field is implicit.
        implicit: bool,
    },
    /// ANSI X9.31.
    X931 {
        /// Message hash.
        hash: HashFunction,
    },
}

impl PaddingScheme {
    /// Select the padding scheme described by `options`.
    ///
    /// Fails with [`Error::Lookup`] when the combination of padding, hash
    /// and prehash does not describe an available scheme.
    pub fn select(options: &SignatureOptions) -> Result<Self> {
        let scheme = Self::try_select(options).ok_or_else(|| {
            Error::lookup(format!(
                "Invalid or unavailable signature padding scheme {options}"
            ))
        })?;
        debug!(padding = scheme.name(), %options, "selected signature padding");
        Ok(scheme)
    }

    fn try_select(options: &SignatureOptions) -> Option<Self> {
        let raw_hash = options.hash_function().is_none_or(|hash| hash == RAW);
        let prehash = match options.prehash_fn() {
            Some(name) => Some(name.parse::<HashFunction>().ok()?),
            None => None,
        };

        let padding = match options.padding() {
            None | Some(RAW) => {
                // the only valid hash for raw padding is none at all
                return raw_hash.then_some(Self::Raw { prehash });
            }
            Some(padding) => padding,
        };

        if padding == "PKCS1v15" && raw_hash {
            return Some(Self::Pkcs1v15Raw { prehash });
        }

        let hash = options.hash_function()?.parse::<HashFunction>().ok()?;
        let salt_size = options.salt_size();
        let implicit = !options.using_explicit_trailer_field();

        match padding {
            "PKCS1v15" => Some(Self::Pkcs1v15 { hash }),
            "PSS" => Some(Self::Pss { hash, salt_size }),
            "PSS_Raw" => Some(Self::PssRaw { hash, salt_size }),
            "ISO_9796_DS2" => Some(Self::Iso9796Ds2 {
                hash,
                implicit,
                salt_size,
            }),
            "ISO_9796_DS3" => Some(Self::Iso9796Ds3 { hash, implicit }),
            "X9.31" => Some(Self::X931 { hash }),
            _ => None,
        }
    }

    /// Canonical padding name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw { .. } => "Raw",
            Self::Pkcs1v15 { .. } | Self::Pkcs1v15Raw { .. } => "PKCS1v15",
            Self::Pss { .. } => "PSS",
            Self::PssRaw { .. } => "PSS_Raw",
            Self::Iso9796Ds2 { .. } => "ISO_9796_DS2",
            Self::Iso9796Ds3 { .. } => "ISO_9796_DS3",
            Self::X931 { .. } => "X9.31",
        }
    }

    /// The hash the encoding is computed with, if any.
    pub fn hash(&self) -> Option<HashFunction> {
        match *self {
            Self::Raw { prehash } | Self::Pkcs1v15Raw { prehash } => prehash,
            Self::Pkcs1v15 { hash }
            | Self::Pss { hash, .. }
            | Self::PssRaw { hash, .. }
            | Self::Iso9796Ds2 { hash, .. }
            | Self::Iso9796Ds3 { hash, .. }
            | Self::X931 { hash } => Some(hash),
        }
    }

    /// Expected input length for raw schemes which check it.
    pub fn raw_input_len(&self) -> Option<usize> {
        match *self {
            Self::Raw { prehash } => prehash.map(HashFunction::output_len),
            _ => None,
        }
    }
}

impl fmt::Display for PaddingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hash() {
            Some(hash) => write!(f, "{}({hash})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}
