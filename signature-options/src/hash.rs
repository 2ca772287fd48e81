//! Hash function names understood by legacy padding strings.

use alloc::format;
use core::{fmt, str::FromStr};

use digest::Digest;

use crate::error::{Error, Result};

/// A hash function a padding scheme can be built over.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HashFunction {
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA-512/256
    Sha512_256,
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// SM3
    Sm3,
    /// RIPEMD-160
    Ripemd160,
}

impl HashFunction {
    /// Canonical name, e.g. `SHA-256` or `SHA-3(256)`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha512_256 => "SHA-512-256",
            Self::Sha3_224 => "SHA-3(224)",
            Self::Sha3_256 => "SHA-3(256)",
            Self::Sha3_384 => "SHA-3(384)",
            Self::Sha3_512 => "SHA-3(512)",
            Self::Sm3 => "SM3",
            Self::Ripemd160 => "RIPEMD-160",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha1 => sha1::Sha1::output_size(),
            Self::Sha224 => sha2::Sha224::output_size(),
            Self::Sha256 => sha2::Sha256::output_size(),
            Self::Sha384 => sha2::Sha384::output_size(),
            Self::Sha512 => sha2::Sha512::output_size(),
            Self::Sha512_256 => sha2::Sha512_256::output_size(),
            Self::Sha3_224 => sha3::Sha3_224::output_size(),
            Self::Sha3_256 => sha3::Sha3_256::output_size(),
            Self::Sha3_384 => sha3::Sha3_384::output_size(),
            Self::Sha3_512 => sha3::Sha3_512::output_size(),
            Self::Sm3 => sm3::Sm3::output_size(),
            Self::Ripemd160 => ripemd::Ripemd160::output_size(),
        }
    }
}

impl FromStr for HashFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA-1" | "SHA1" | "SHA-160" | "SHA160" => Ok(Self::Sha1),
            "SHA-224" | "SHA224" => Ok(Self::Sha224),
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-384" | "SHA384" => Ok(Self::Sha384),
            "SHA-512" | "SHA512" => Ok(Self::Sha512),
            "SHA-512-256" | "SHA-512/256" => Ok(Self::Sha512_256),
            "SHA-3(224)" | "SHA3-224" => Ok(Self::Sha3_224),
            "SHA-3(256)" | "SHA3-256" => Ok(Self::Sha3_256),
            "SHA-3(384)" | "SHA3-384" => Ok(Self::Sha3_384),
            "SHA-3(512)" | "SHA3-512" => Ok(Self::Sha3_512),
            "SM3" => Ok(Self::Sm3),
            "RIPEMD-160" | "RIPEMD160" => Ok(Self::Ripemd160),
            _ => Err(Error::lookup(format!("Unavailable hash function '{s}'"))),
        }
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
