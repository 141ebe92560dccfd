use crate::api::client::AnyPayClient;
use crate::core::config::AnyPayConfig;
use crate::core::errors::AnyPayError;
use crate::core::kernel::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
use tracing::info;

/// Builder for AnyPay clients
///
/// Construction is split in two phases: [`AnyPayBuilder::build`] never
/// touches the network, [`AnyPayBuilder::build_validated`] additionally
/// checks the credentials with one balance call.
pub struct AnyPayBuilder {
    config: AnyPayConfig,
    user_agent: Option<String>,
}

impl AnyPayBuilder {
    pub fn new(config: AnyPayConfig) -> Self {
        Self {
            config,
            user_agent: None,
        }
    }

    pub fn with_project_id(mut self, project_id: u64) -> Self {
        self.config.project_id = Some(project_id);
        self
    }

    pub fn with_md5(mut self) -> Self {
        self.config.use_md5 = true;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    fn check_credentials(&self) -> Result<(), AnyPayError> {
        if self.config.has_credentials() {
            Ok(())
        } else {
            Err(AnyPayError::Configuration(
                "api_id and api_key must both be set".to_string(),
            ))
        }
    }

    /// Build a client over the default reqwest transport
    pub fn build(self) -> Result<AnyPayClient<ReqwestRest>, AnyPayError> {
        self.check_credentials()?;

        let mut rest_config = RestClientConfig::new(self.config.resolved_base_url())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let rest = RestClientBuilder::new(rest_config).build()?;
        Ok(AnyPayClient::new(rest, self.config))
    }

    /// Build a client over a caller-provided transport
    pub fn build_with_rest<R: RestClient>(self, rest: R) -> Result<AnyPayClient<R>, AnyPayError> {
        self.check_credentials()?;
        Ok(AnyPayClient::new(rest, self.config))
    }

    /// Build a client and verify the credentials against the provider
    pub async fn build_validated(self) -> Result<AnyPayClient<ReqwestRest>, AnyPayError> {
        let client = self.build()?;
        client.validate_credentials().await?;
        info!(provider = "anypay", "credentials accepted");
        Ok(client)
    }
}

/// Create a client from `ANYPAY_*` environment variables (and `.env` when enabled)
pub fn build_from_env() -> Result<AnyPayClient<ReqwestRest>, AnyPayError> {
    #[cfg(feature = "env-file")]
    let config = AnyPayConfig::from_env_file()?;
    #[cfg(not(feature = "env-file"))]
    let config = AnyPayConfig::from_env()?;

    AnyPayBuilder::new(config).build()
}
