use crate::core::config::AnyPayConfig;
use crate::core::types::Params;
use md5::Md5;
use sha2::{Digest, Sha256};

/// Signer trait for request authentication
///
/// AnyPay authenticates every call with a `sign` parameter computed over the
/// method name, the credentials and a method-specific subset of the
/// parameters. Implementations must be pure: equal inputs give equal output.
pub trait Signer: Send + Sync {
    /// Compute the signature for one call
    ///
    /// # Arguments
    /// * `method` - API method name as it appears in the URL (e.g. `create-payment`)
    /// * `signed_fields` - Parameter names that take part in the signature, in provider order
    /// * `params` - Normalized call parameters
    ///
    /// Fields listed in `signed_fields` but missing from `params` are skipped.
    fn sign(&self, method: &str, signed_fields: &[&str], params: &Params) -> String;
}

/// Digest used for signing; must match the setting in the AnyPay account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Md5,
}

/// Hash-over-concatenation signer used by the AnyPay API
pub struct DigestSigner {
    api_id: String,
    api_key: String,
    algorithm: DigestAlgorithm,
}

impl DigestSigner {
    /// Create a new digest signer
    ///
    /// # Arguments
    /// * `api_id` - API id from the profile settings
    /// * `api_key` - API key from the profile settings
    /// * `algorithm` - Which digest the account is configured for
    pub fn new(api_id: String, api_key: String, algorithm: DigestAlgorithm) -> Self {
        Self {
            api_id,
            api_key,
            algorithm,
        }
    }

    pub fn from_config(config: &AnyPayConfig) -> Self {
        let algorithm = if config.use_md5 {
            DigestAlgorithm::Md5
        } else {
            DigestAlgorithm::Sha256
        };
        Self::new(
            config.api_id().to_string(),
            config.api_key().to_string(),
            algorithm,
        )
    }

    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    fn payload(&self, method: &str, signed_fields: &[&str], params: &Params) -> String {
        let mut payload = String::with_capacity(method.len() + self.api_id.len() + 64);
        payload.push_str(method);
        payload.push_str(&self.api_id);
        for value in signed_fields.iter().filter_map(|field| params.get(field)) {
            payload.push_str(value);
        }
        payload.push_str(&self.api_key);
        payload
    }
}

impl std::fmt::Debug for DigestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestSigner")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Signer for DigestSigner {
    fn sign(&self, method: &str, signed_fields: &[&str], params: &Params) -> String {
        let payload = self.payload(method, signed_fields, params);
        match self.algorithm {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(payload.as_bytes())),
            DigestAlgorithm::Md5 => hex::encode(Md5::digest(payload.as_bytes())),
        }
    }
}
