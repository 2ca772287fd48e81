//! Option checks shared by signature back ends.

use alloc::format;

use crate::{
    error::{Error, Result},
    options::{SignatureOptions, check_acceptable_hash},
};

/// Check `options` for a scheme which takes at most one fixed hash and no
/// other knobs, e.g. pure EdDSA or SM2.
///
/// `hash_fn` is the only hash `algo_name` accepts, or `None` if it takes no
/// explicit hash at all. Padding and prehashing are always rejected. RSA
/// and the other padding-capable families do their own checks instead.
pub fn validate_for_hash_based_signature(
    options: &SignatureOptions,
    algo_name: &str,
    hash_fn: Option<&str>,
) -> Result<()> {
    if let Some(requested) = options.hash_function() {
        check_acceptable_hash(requested, algo_name, hash_fn)?;
    }

    if options.using_padding() {
        return Err(Error::invalid_argument(format!(
            "{algo_name} does not support padding modes"
        )));
    }

    if options.using_prehash() {
        return Err(Error::invalid_argument(format!(
            "{algo_name} does not support prehashing"
        )));
    }

    Ok(())
}
