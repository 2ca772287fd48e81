#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

extern crate alloc;

mod checks;
mod error;
mod hash;
mod legacy;
mod options;
mod padding;
mod scan;

pub use crate::{
    checks::validate_for_hash_based_signature,
    error::{Error, Field, Result},
    hash::HashFunction,
    legacy::{AlgorithmFamily, SignatureFormat, parse_legacy},
    options::SignatureOptions,
    padding::PaddingScheme,
    scan::ScanName,
};
