//! Signature generation/verification options.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::error::{Error, Field, Result};

/// Provider name which is equivalent to not naming a provider at all.
const BASE_PROVIDER: &str = "base";

/// Signature generation/verification options.
///
/// Every optional field starts out unset and may be set at most once. Each
/// `with_*` method leaves the receiver untouched and returns a new value with
/// the field filled in; supplying a field twice fails with
/// [`Error::AlreadySet`].
///
/// ```
/// use signature_options::SignatureOptions;
///
/// let options = SignatureOptions::new()
///     .with_padding("PSS")?
///     .with_hash("SHA-256")?
///     .with_salt_size(32)?;
///
/// assert_eq!(options.padding_with_hash()?, "PSS(SHA-256)");
/// assert!(options.with_hash("SHA-512").is_err());
/// # Ok::<(), signature_options::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SignatureOptions {
    hash_fn: Option<String>,
    padding: Option<String>,
    prehash: Option<String>,
    context: Option<Vec<u8>>,
    provider: Option<String>,
    salt_size: Option<usize>,
    use_prehash: bool,
    use_der: bool,
    deterministic_sig: bool,
    explicit_trailer_field: bool,
}

impl SignatureOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `SignatureOptions::new().with_hash(hash)`.
    pub fn for_hash(hash: &str) -> Result<Self> {
        Self::new().with_hash(hash)
    }

    /// Specify the hash function used to digest the message.
    pub fn with_hash(&self, hash: &str) -> Result<Self> {
        if self.using_hash() {
            return Err(Error::AlreadySet(Field::Hash));
        }
        if hash.is_empty() {
            return Err(Error::invalid_argument("hash function name cannot be empty"));
        }

        Ok(Self {
            hash_fn: Some(hash.to_string()),
            ..self.clone()
        })
    }

    /// Specify a padding scheme.
    ///
    /// This is mostly/only used for RSA. Schemes which do not support a
    /// padding option reject it when the signer or verifier is created.
    pub fn with_padding(&self, padding: &str) -> Result<Self> {
        if self.using_padding() {
            return Err(Error::AlreadySet(Field::Padding));
        }
        if padding.is_empty() {
            return Err(Error::invalid_argument("padding scheme name cannot be empty"));
        }

        Ok(Self {
            padding: Some(padding.to_string()),
            ..self.clone()
        })
    }

    /// Request that the message is prehashed.
    ///
    /// Some schemes, such as Ed25519, normally sign the entire message but
    /// also offer a variant where the message is hashed first and the hash is
    /// signed. `None` requests the algorithm specific default prehash
    /// function.
    pub fn with_prehash(&self, prehash: Option<&str>) -> Result<Self> {
        if self.using_prehash() {
            return Err(Error::AlreadySet(Field::Prehash));
        }

        Ok(Self {
            use_prehash: true,
            prehash: prehash.map(ToString::to_string),
            ..self.clone()
        })
    }

    /// Specify a context.
    ///
    /// This is typically a fixed string identifying a protocol or peer. For
    /// SM2 it is the user identifier. Both byte slices and strings are
    /// accepted; strings contribute their UTF-8 bytes.
    pub fn with_context(&self, context: impl AsRef<[u8]>) -> Result<Self> {
        if self.using_context() {
            return Err(Error::AlreadySet(Field::Context));
        }

        Ok(Self {
            context: Some(context.as_ref().to_vec()),
            ..self.clone()
        })
    }

    /// Specify a provider that should be used.
    ///
    /// An empty name or `"base"` does not name a provider; either is
    /// accepted as a no-op and leaves the slot free.
    pub fn with_provider(&self, provider: &str) -> Result<Self> {
        if provider.is_empty() || provider == BASE_PROVIDER {
            return Ok(self.clone());
        }
        if self.using_provider() {
            return Err(Error::AlreadySet(Field::Provider));
        }

        Ok(Self {
            provider: Some(provider.to_string()),
            ..self.clone()
        })
    }

    /// Specify an explicit salt length, in bytes, for salted paddings.
    pub fn with_salt_size(&self, salt_size: usize) -> Result<Self> {
        if self.using_salt_size() {
            return Err(Error::AlreadySet(Field::SaltSize));
        }

        Ok(Self {
            salt_size: Some(salt_size),
            ..self.clone()
        })
    }

    /// Request a deterministic signature.
    ///
    /// Has no effect for schemes which are always deterministic or always
    /// randomized, and is ignored for verification.
    pub fn with_deterministic_signature(&self) -> Self {
        Self {
            deterministic_sig: true,
            ..self.clone()
        }
    }

    /// Produce or expect a DER encoded signature.
    pub fn with_der_encoded_signature(&self) -> Self {
        Self {
            use_der: true,
            ..self.clone()
        }
    }

    /// Use an explicit trailer field (ISO-9796-2 only).
    pub fn with_explicit_trailer_field(&self) -> Self {
        Self {
            explicit_trailer_field: true,
            ..self.clone()
        }
    }

    /// The hash function, if one was specified.
    pub fn hash_function(&self) -> Option<&str> {
        self.hash_fn.as_deref()
    }

    /// The hash function, for schemes which cannot work without one.
    pub fn hash_function_name(&self) -> Result<&str> {
        self.hash_function().ok_or_else(|| {
            Error::invalid_state("This signature scheme requires specifying a hash function")
        })
    }

    /// The padding scheme, if one was specified.
    pub fn padding(&self) -> Option<&str> {
        self.padding.as_deref()
    }

    /// The explicit prehash function.
    ///
    /// `None` while [`using_prehash`](Self::using_prehash) is true means the
    /// algorithm default.
    pub fn prehash_fn(&self) -> Option<&str> {
        self.prehash.as_deref()
    }

    /// The context bytes, if any.
    pub fn context(&self) -> Option<&[u8]> {
        self.context.as_deref()
    }

    /// The preferred provider, if any.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// The explicit salt length, if any.
    pub fn salt_size(&self) -> Option<usize> {
        self.salt_size
    }

    /// Whether a hash function was specified.
    pub fn using_hash(&self) -> bool {
        self.hash_fn.is_some()
    }

    /// Whether a padding scheme was specified.
    pub fn using_padding(&self) -> bool {
        self.padding.is_some()
    }

    /// Whether prehashing was requested.
    pub fn using_prehash(&self) -> bool {
        self.use_prehash
    }

    /// Whether a context was specified.
    pub fn using_context(&self) -> bool {
        self.context.is_some()
    }

    /// Whether a provider was specified.
    pub fn using_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Whether a salt length was specified.
    pub fn using_salt_size(&self) -> bool {
        self.salt_size.is_some()
    }

    /// Whether the signature is DER encoded.
    pub fn using_der_encoded_signature(&self) -> bool {
        self.use_der
    }

    /// Whether a deterministic signature was requested.
    pub fn using_deterministic_signature(&self) -> bool {
        self.deterministic_sig
    }

    /// Whether the ISO-9796-2 explicit trailer field is used.
    pub fn using_explicit_trailer_field(&self) -> bool {
        self.explicit_trailer_field
    }

    /// Padding plus hash, formatted the way RSA padding names embed them,
    /// e.g. `PSS(SHA-256)`.
    pub fn padding_with_hash(&self) -> Result<String> {
        match (self.padding(), self.hash_function()) {
            (Some(padding), Some(hash)) => Ok(format!("{padding}({hash})")),
            (Some(padding), None) => Ok(padding.to_string()),
            (None, Some(hash)) => Ok(hash.to_string()),
            (None, None) => Err(Error::invalid_argument("a padding scheme is required")),
        }
    }

    /// Remove the hash function and check it against the only hash
    /// `algo_name` accepts.
    ///
    /// Succeeds trivially when no hash is set. Otherwise the hash must equal
    /// `acceptable`; `None` means the algorithm takes no explicit hash. The
    /// removed hash is returned.
    pub fn take_and_validate_hash(
        &mut self,
        algo_name: &str,
        acceptable: Option<&str>,
    ) -> Result<Option<String>> {
        let Some(hash) = self.hash_fn.take() else {
            return Ok(None);
        };

        check_acceptable_hash(&hash, algo_name, acceptable)?;
        Ok(Some(hash))
    }

    /// Remove and return the hash function.
    pub fn take_hash(&mut self) -> Option<String> {
        self.hash_fn.take()
    }

    /// Remove and return the padding scheme.
    pub fn take_padding(&mut self) -> Option<String> {
        self.padding.take()
    }

    /// Remove the prehash request.
    ///
    /// Returns `None` if prehashing was not requested, and `Some(None)` if
    /// it was requested with the algorithm default.
    pub fn take_prehash(&mut self) -> Option<Option<String>> {
        let prehash = self.prehash.take();
        core::mem::take(&mut self.use_prehash).then_some(prehash)
    }

    /// Remove and return the context bytes.
    pub fn take_context(&mut self) -> Option<Vec<u8>> {
        self.context.take()
    }

    /// Remove and return the preferred provider.
    pub fn take_provider(&mut self) -> Option<String> {
        self.provider.take()
    }

    /// Remove and return the explicit salt length.
    pub fn take_salt_size(&mut self) -> Option<usize> {
        self.salt_size.take()
    }

    /// Remove `field` and fail with [`Error::Lookup`] if it was set.
    ///
    /// For back ends which recognize an option but cannot honor it yet.
    pub fn not_implemented(
        &mut self,
        field: Field,
        algo_name: &str,
        message: &str,
    ) -> Result<()> {
        let was_set = match field {
            Field::Hash => self.take_hash().is_some(),
            Field::Padding => self.take_padding().is_some(),
            Field::Prehash => self.take_prehash().is_some(),
            Field::Context => self.take_context().is_some(),
            Field::Provider => self.take_provider().is_some(),
            Field::SaltSize => self.take_salt_size().is_some(),
        };

        if was_set {
            return Err(Error::lookup(format!(
                "'{algo_name}' currently does not implement the '{field}' option: {message}"
            )));
        }
        Ok(())
    }

    /// Slots which are still set, in declaration order.
    pub fn unconsumed(&self) -> Vec<Field> {
        [
            (Field::Hash, self.using_hash()),
            (Field::Padding, self.using_padding()),
            (Field::Prehash, self.using_prehash()),
            (Field::Context, self.using_context()),
            (Field::Provider, self.using_provider()),
            (Field::SaltSize, self.using_salt_size()),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect()
    }

    /// Check that the back end for `algo_name` took every option it was
    /// given.
    ///
    /// Fails with [`Error::InvalidArgument`] naming each slot still set.
    /// The boolean flags are hints and are not checked.
    pub fn validate_consumed(&self, algo_name: &str) -> Result<()> {
        let unconsumed = self.unconsumed();
        if unconsumed.is_empty() {
            return Ok(());
        }

        let names = unconsumed
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::invalid_argument(format!(
            "'{algo_name}' failed to use some options: {names}"
        )))
    }
}

/// Shared by [`SignatureOptions::take_and_validate_hash`] and the generic
/// option checks.
pub(crate) fn check_acceptable_hash(
    requested: &str,
    algo_name: &str,
    acceptable: Option<&str>,
) -> Result<()> {
    match acceptable {
        None => Err(Error::invalid_argument(format!(
            "This {algo_name} key does not support explicit hash function choice"
        ))),
        Some(accepted) if accepted != requested => Err(Error::invalid_argument(format!(
            "This {algo_name} key can only be used with {accepted}, not {requested}"
        ))),
        Some(_) => Ok(()),
    }
}

impl fmt::Display for SignatureOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        let mut next = || core::mem::replace(&mut sep, ",");

        f.write_str("SignatureOptions(")?;
        if let Some(hash) = self.hash_function() {
            write!(f, "{}hash={hash}", next())?;
        }
        if let Some(padding) = self.padding() {
            write!(f, "{}padding={padding}", next())?;
        }
        if self.using_prehash() {
            let prehash = self.prehash_fn().unwrap_or("default");
            write!(f, "{}prehash={prehash}", next())?;
        }
        if let Some(context) = self.context() {
            write!(f, "{}context=", next())?;
            for byte in context {
                write!(f, "{byte:02x}")?;
            }
        }
        if let Some(provider) = self.provider() {
            write!(f, "{}provider={provider}", next())?;
        }
        if let Some(salt_size) = self.salt_size() {
            write!(f, "{}salt_size={salt_size}", next())?;
        }
        if self.using_der_encoded_signature() {
            write!(f, "{}der", next())?;
        }
        if self.using_deterministic_signature() {
            write!(f, "{}deterministic", next())?;
        }
        if self.using_explicit_trailer_field() {
            write!(f, "{}explicit_trailer", next())?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn new_options_are_empty() {
        let options = SignatureOptions::new();

        assert!(!options.using_hash());
        assert!(!options.using_padding());
        assert!(!options.using_prehash());
        assert!(!options.using_context());
        assert!(!options.using_provider());
        assert!(!options.using_salt_size());
        assert!(!options.using_der_encoded_signature());
        assert!(!options.using_deterministic_signature());
        assert!(!options.using_explicit_trailer_field());
        assert_eq!(options.to_string(), "SignatureOptions()");
    }

    #[test]
    fn hash_is_set_once() {
        let options = SignatureOptions::for_hash("SHA-256").unwrap();
        assert_eq!(options.hash_function(), Some("SHA-256"));
        assert_eq!(options.hash_function_name().unwrap(), "SHA-256");

        assert_eq!(
            options.with_hash("SHA-512").unwrap_err(),
            Error::AlreadySet(Field::Hash)
        );
        // the receiver is untouched
        assert_eq!(options.hash_function(), Some("SHA-256"));
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(
            SignatureOptions::new().with_hash(""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            SignatureOptions::new().with_padding(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn hash_function_name_requires_hash() {
        assert!(matches!(
            SignatureOptions::new().hash_function_name(),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn prehash_default_and_explicit() {
        let default = SignatureOptions::new().with_prehash(None).unwrap();
        assert!(default.using_prehash());
        assert_eq!(default.prehash_fn(), None);

        let explicit = SignatureOptions::new().with_prehash(Some("SHA-512")).unwrap();
        assert!(explicit.using_prehash());
        assert_eq!(explicit.prehash_fn(), Some("SHA-512"));

        assert_eq!(
            default.with_prehash(Some("SHA-512")).unwrap_err(),
            Error::AlreadySet(Field::Prehash)
        );
    }

    #[test]
    fn context_from_str_and_bytes() {
        let from_str = SignatureOptions::new().with_context("ALICE123").unwrap();
        let from_bytes = SignatureOptions::new()
            .with_context(hex!("414c494345313233"))
            .unwrap();

        assert_eq!(from_str.context(), from_bytes.context());
        assert_eq!(
            from_str.with_context(b"BOB").unwrap_err(),
            Error::AlreadySet(Field::Context)
        );
    }

    #[test]
    fn base_provider_is_not_a_provider() {
        let options = SignatureOptions::new()
            .with_provider("")
            .unwrap()
            .with_provider("base")
            .unwrap();
        assert!(!options.using_provider());

        let options = options.with_provider("oqs").unwrap();
        assert_eq!(options.provider(), Some("oqs"));

        // no-op values never conflict, even once a provider is set
        assert!(options.with_provider("base").is_ok());
        assert_eq!(
            options.with_provider("openssl").unwrap_err(),
            Error::AlreadySet(Field::Provider)
        );
    }

    #[test]
    fn salt_size_is_set_once() {
        let options = SignatureOptions::new().with_salt_size(0).unwrap();
        assert_eq!(options.salt_size(), Some(0));
        assert_eq!(
            options.with_salt_size(32).unwrap_err(),
            Error::AlreadySet(Field::SaltSize)
        );
    }

    #[test]
    fn flags_are_idempotent() {
        let options = SignatureOptions::new()
            .with_der_encoded_signature()
            .with_der_encoded_signature()
            .with_deterministic_signature()
            .with_explicit_trailer_field();

        assert!(options.using_der_encoded_signature());
        assert!(options.using_deterministic_signature());
        assert!(options.using_explicit_trailer_field());
    }

    #[test]
    fn padding_with_hash() {
        let both = SignatureOptions::new()
            .with_padding("PSS")
            .unwrap()
            .with_hash("SHA-256")
            .unwrap();
        assert_eq!(both.padding_with_hash().unwrap(), "PSS(SHA-256)");

        let padding = SignatureOptions::new().with_padding("Raw").unwrap();
        assert_eq!(padding.padding_with_hash().unwrap(), "Raw");

        let hash = SignatureOptions::for_hash("SHA-256").unwrap();
        assert_eq!(hash.padding_with_hash().unwrap(), "SHA-256");

        assert!(matches!(
            SignatureOptions::new().padding_with_hash(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn take_and_validate_hash() {
        let mut options = SignatureOptions::for_hash("SHAKE-256(912)").unwrap();
        assert_eq!(
            options
                .take_and_validate_hash("Ed448", Some("SHAKE-256(912)"))
                .unwrap()
                .as_deref(),
            Some("SHAKE-256(912)")
        );
        assert!(!options.using_hash());

        // already cleared, so anything goes
        assert_eq!(options.take_and_validate_hash("Ed448", None).unwrap(), None);
    }

    #[test]
    fn take_and_validate_hash_rejects_mismatch() {
        let mut options = SignatureOptions::for_hash("SHA-256").unwrap();
        let err = options
            .clone()
            .take_and_validate_hash("SM2", Some("SM3"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument("This SM2 key can only be used with SM3, not SHA-256".into())
        );

        let err = options.take_and_validate_hash("Ed25519", None).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument(
                "This Ed25519 key does not support explicit hash function choice".into()
            )
        );
    }

    #[test]
    fn fully_consumed_options_validate() {
        let mut options = SignatureOptions::new()
            .with_hash("SHA-256")
            .unwrap()
            .with_padding("PSS")
            .unwrap()
            .with_salt_size(32)
            .unwrap()
            .with_provider("oqs")
            .unwrap()
            .with_deterministic_signature();

        assert_eq!(options.take_hash().as_deref(), Some("SHA-256"));
        assert_eq!(options.take_padding().as_deref(), Some("PSS"));
        assert_eq!(options.take_salt_size(), Some(32));
        assert_eq!(options.take_provider().as_deref(), Some("oqs"));
        assert_eq!(options.take_context(), None);
        assert_eq!(options.take_prehash(), None);

        assert!(options.unconsumed().is_empty());
        options.validate_consumed("RSA").unwrap();
        assert_eq!(options.to_string(), "SignatureOptions(deterministic)");
    }

    #[test]
    fn leftover_options_are_named() {
        let mut options = SignatureOptions::new()
            .with_hash("SHA-256")
            .unwrap()
            .with_padding("PSS")
            .unwrap()
            .with_context("ctx")
            .unwrap();

        assert_eq!(
            options.validate_consumed("Ed25519").unwrap_err(),
            Error::InvalidArgument(
                "'Ed25519' failed to use some options: hash, padding, context".into()
            )
        );

        options.take_context();
        assert_eq!(options.unconsumed(), [Field::Hash, Field::Padding]);
        assert_eq!(
            options.validate_consumed("Ed25519").unwrap_err(),
            Error::InvalidArgument("'Ed25519' failed to use some options: hash, padding".into())
        );
    }

    #[test]
    fn take_prehash_clears_request() {
        let mut default = SignatureOptions::new().with_prehash(None).unwrap();
        assert_eq!(default.take_prehash(), Some(None));
        assert!(!default.using_prehash());
        assert_eq!(default.take_prehash(), None);

        let mut explicit = SignatureOptions::new().with_prehash(Some("SHA-512")).unwrap();
        assert_eq!(explicit.take_prehash(), Some(Some(String::from("SHA-512"))));
        explicit.validate_consumed("Ed25519").unwrap();
    }

    #[test]
    fn not_implemented_consumes_option() {
        let mut options = SignatureOptions::new().with_context("ctx").unwrap();
        options
            .not_implemented(Field::SaltSize, "ML-DSA-6x5", "no salt")
            .unwrap();

        assert_eq!(
            options
                .not_implemented(Field::Context, "ML-DSA-6x5", "contexts are not supported")
                .unwrap_err(),
            Error::Lookup(
                "'ML-DSA-6x5' currently does not implement the 'context' option: \
                 contexts are not supported"
                    .into()
            )
        );
        assert!(!options.using_context());
        options.validate_consumed("ML-DSA-6x5").unwrap();
    }

    #[test]
    fn display_lists_set_fields() {
        let options = SignatureOptions::new()
            .with_hash("SHA-256")
            .unwrap()
            .with_padding("PSS")
            .unwrap()
            .with_salt_size(32)
            .unwrap();
        assert_eq!(
            options.to_string(),
            "SignatureOptions(hash=SHA-256,padding=PSS,salt_size=32)"
        );

        let options = SignatureOptions::new()
            .with_prehash(None)
            .unwrap()
            .with_context("AB")
            .unwrap()
            .with_der_encoded_signature();
        assert_eq!(
            options.to_string(),
            "SignatureOptions(prehash=default,context=4142,der)"
        );
    }
}
