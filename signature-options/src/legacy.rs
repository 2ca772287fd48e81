//! Compatibility parsing of single-string signature parameters.
//!
//! Before [`SignatureOptions`] existed, each algorithm family accepted its
//! own ad hoc parameter string: `"EMSA1(SHA-256)"` for ECDSA,
//! `"PSS(SHA-256,MGF1,32)"` for RSA, `"Ed25519ph"` for Ed25519 and so on.
//! [`parse_legacy`] maps each of those grammars onto the options a caller
//! would build today with the fluent interface.

use alloc::format;
use core::fmt;

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    options::SignatureOptions,
    scan::ScanName,
};

/// Name prefixes of the post-quantum schemes with a deterministic mode.
const PQ_PREFIXES: &[&str] = &["Dilithium", "ML-DSA", "SLH-DSA"];

/// Names of the post-quantum schemes matched exactly.
const PQ_NAMES: &[&str] = &["SPHINCS+", "XMSS", "HSS-LMS"];

/// Encoding of the signature value for multi-part schemes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SignatureFormat {
    /// Fixed size concatenation of the signature components.
    #[default]
    Standard,
    /// DER encoded `SEQUENCE` of the signature components.
    DerSequence,
}

/// The algorithm families with distinct legacy grammars.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlgorithmFamily {
    /// RSA; parameters are a padding specification.
    Rsa,
    /// SM2; parameters are a user identifier and optionally a hash.
    Sm2,
    /// Ed25519; parameters select pure or prehashed mode.
    Ed25519,
    /// Ed448; parameters select pure or prehashed mode.
    Ed448,
    /// Lattice and hash based schemes with a deterministic mode.
    PostQuantum,
    /// DSA, ECDSA, ECKCDSA, GOST and everything else; parameters name a hash.
    DsaFamily,
}

impl AlgorithmFamily {
    /// Family of the algorithm named `algo_name`.
    pub fn from_name(algo_name: &str) -> Self {
        match algo_name {
            "RSA" => Self::Rsa,
            "SM2" => Self::Sm2,
            "Ed25519" => Self::Ed25519,
            "Ed448" => Self::Ed448,
            name if PQ_NAMES.contains(&name)
                || PQ_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) =>
            {
                Self::PostQuantum
            }
            _ => Self::DsaFamily,
        }
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rsa => "RSA",
            Self::Sm2 => "SM2",
            Self::Ed25519 => "Ed25519",
            Self::Ed448 => "Ed448",
            Self::PostQuantum => "post-quantum",
            Self::DsaFamily => "DSA family",
        })
    }
}

/// Build [`SignatureOptions`] from a legacy parameter string.
///
/// `format` only matters for the DSA family, where
/// [`SignatureFormat::DerSequence`] requests a DER encoded signature.
pub fn parse_legacy(
    algo_name: &str,
    params: &str,
    format: SignatureFormat,
) -> Result<SignatureOptions> {
    let family = AlgorithmFamily::from_name(algo_name);
    trace!(algo_name, params, %family, "parsing legacy signature parameters");

    match family {
        AlgorithmFamily::PostQuantum => parse_post_quantum(algo_name, params),
        AlgorithmFamily::Sm2 => parse_sm2(params),
        AlgorithmFamily::Ed25519 => parse_eddsa(params, "Ed25519ph", None),
        AlgorithmFamily::Ed448 => parse_eddsa(params, "Ed448ph", Some("Ed448")),
        AlgorithmFamily::Rsa => parse_rsa(params),
        AlgorithmFamily::DsaFamily => parse_dsa_family(params, format),
    }
}

fn parse_post_quantum(algo_name: &str, params: &str) -> Result<SignatureOptions> {
    match params {
        "" | "Randomized" => Ok(SignatureOptions::new()),
        "Deterministic" => Ok(SignatureOptions::new().with_deterministic_signature()),
        _ => Err(Error::invalid_argument(format!(
            "Unexpected parameters for signing with {algo_name}"
        ))),
    }
}

/// `Ident` or `Ident,Hash`; the hash defaults to SM3.
fn parse_sm2(params: &str) -> Result<SignatureOptions> {
    if params.is_empty() {
        return SignatureOptions::for_hash("SM3");
    }

    let (userid, hash) = params.split_once(',').unwrap_or((params, "SM3"));
    SignatureOptions::for_hash(hash)?.with_context(userid)
}

/// Pure mode unless `prehash_mode` or an explicit prehash hash is named.
fn parse_eddsa(
    params: &str,
    prehash_mode: &str,
    pure_name: Option<&str>,
) -> Result<SignatureOptions> {
    match params {
        "" | "Identity" | "Pure" => Ok(SignatureOptions::new()),
        p if pure_name == Some(p) => Ok(SignatureOptions::new()),
        p if p == prehash_mode => SignatureOptions::new().with_prehash(None),
        hash => SignatureOptions::new().with_prehash(Some(hash)),
    }
}

/// Empty, `EMSA1(Hash)`, or a bare hash name.
fn parse_dsa_family(params: &str, format: SignatureFormat) -> Result<SignatureOptions> {
    let options = if params.is_empty() {
        SignatureOptions::new()
    } else if params.starts_with("EMSA1") {
        let req = ScanName::parse(params)?;
        if req.name() != "EMSA1" || req.arg_count() != 1 {
            return Err(Error::invalid_argument(format!(
                "Unexpected EMSA1 parameters '{params}'"
            )));
        }
        SignatureOptions::for_hash(req.arg(0)?)?
    } else {
        SignatureOptions::for_hash(params)?
    };

    Ok(match format {
        SignatureFormat::DerSequence => options.with_der_encoded_signature(),
        SignatureFormat::Standard => options,
    })
}

/// Canonical RSA padding name for a historical alias.
fn canonical_padding(name: &str) -> &str {
    match name {
        "EMSA_PKCS1" | "EMSA-PKCS1-v1_5" | "EMSA3" => "PKCS1v15",
        "PSSR_Raw" => "PSS_Raw",
        "PSSR" | "EMSA-PSS" | "PSS-MGF1" | "EMSA4" => "PSS",
        "EMSA_X931" | "EMSA2" | "X9.31" => "X9.31",
        other => other,
    }
}

fn parse_rsa(params: &str) -> Result<SignatureOptions> {
    let req = ScanName::parse(params)?;
    let padding = canonical_padding(req.name());
    if padding != req.name() {
        debug!(alias = req.name(), padding, "rewrote legacy padding alias");
    }

    let unsupported = || {
        Error::lookup(format!(
            "Unsupported parameters '{params}' for {padding} padding"
        ))
    };
    let options = SignatureOptions::new();

    match padding {
        "Raw" => match req.arg_count() {
            0 => options.with_padding(padding),
            1 => options.with_padding(padding)?.with_prehash(Some(req.arg(0)?)),
            _ => Err(Error::invalid_argument(format!(
                "Raw padding accepts at most one argument, got '{params}'"
            ))),
        },

        "PKCS1v15" => match req.arg_count() {
            1 => options.with_padding(padding)?.with_hash(req.arg(0)?),
            2 if req.arg(0)? == "Raw" => options
                .with_padding(padding)?
                .with_hash(req.arg(0)?)?
                .with_prehash(Some(req.arg(1)?)),
            _ => Err(unsupported()),
        },

        "PSS" | "PSS_Raw" => {
            if !req.arg_count_between(1, 3) || req.arg_or(1, "MGF1") != "MGF1" {
                return Err(unsupported());
            }
            let options = options.with_padding(padding)?.with_hash(req.arg(0)?)?;
            if req.arg_count() == 3 {
                options.with_salt_size(req.arg_as_integer(2)?)
            } else {
                Ok(options)
            }
        }

        "ISO_9796_DS2" => {
            if !req.arg_count_between(1, 3) {
                return Err(unsupported());
            }
            let implicit = req.arg_or(1, "exp") == "imp";
            let mut options = options.with_padding(padding)?.with_hash(req.arg(0)?)?;
            if req.arg_count() == 3 {
                options = options.with_salt_size(req.arg_as_integer(2)?)?;
            }
            if !implicit {
                options = options.with_explicit_trailer_field();
            }
            Ok(options)
        }

        // DS3 is deterministic DS2 without a salt
        "ISO_9796_DS3" => {
            if !req.arg_count_between(1, 2) {
                return Err(unsupported());
            }
            let options = options.with_padding(padding)?.with_hash(req.arg(0)?)?;
            if req.arg_count() == 2 && req.arg(1)? != "imp" {
                Ok(options.with_explicit_trailer_field())
            } else {
                Ok(options)
            }
        }

        "X9.31" => {
            if req.arg_count() != 1 {
                return Err(unsupported());
            }
            options.with_padding(padding)?.with_hash(req.arg(0)?)
        }

        _ => Err(Error::lookup(format!(
            "Invalid or unavailable signature padding scheme '{params}'"
        ))),
    }
}
