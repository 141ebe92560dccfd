/// Transport and authentication kernel
///
/// Provider-agnostic plumbing shared by the API client:
///
/// - `RestClient`: the injected transport; `ReqwestRest` is the default
/// - `Signer`: request signing; `DigestSigner` implements the AnyPay scheme
///
/// # Example
/// ```rust,no_run
/// use anypay::core::kernel::*;
/// use anypay::core::types::{HttpMethod, Params};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = DigestSigner::new("1234".to_string(), "key".to_string(), DigestAlgorithm::Sha256);
/// let mut params = Params::new();
/// params.push("sign", signer.sign("balance", &[], &params));
///
/// let rest = RestClientBuilder::new(RestClientConfig::new("https://anypay.io/api".to_string()))
///     .build()?;
/// let body = rest.send(HttpMethod::Get, "/balance/1234", &params).await?;
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{DigestAlgorithm, DigestSigner, Signer};
