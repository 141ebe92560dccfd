use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://anypay.io/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AnyPayConfig {
    pub api_id: Secret<String>,
    pub api_key: Secret<String>,
    /// Project used when a call does not name one explicitly
    pub project_id: Option<u64>,
    /// Sign with MD5 instead of SHA-256 (must match the account setting)
    pub use_md5: bool,
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for AnyPayConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("AnyPayConfig", 6)?;
        state.serialize_field("api_id", "[REDACTED]")?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("project_id", &self.project_id)?;
        state.serialize_field("use_md5", &self.use_md5)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for AnyPayConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct AnyPayConfigHelper {
            api_id: String,
            api_key: String,
            #[serde(default)]
            project_id: Option<u64>,
            #[serde(default)]
            use_md5: bool,
            #[serde(default)]
            base_url: Option<String>,
            #[serde(default = "default_timeout")]
            timeout_seconds: u64,
        }

        let helper = AnyPayConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_id: Secret::new(helper.api_id),
            api_key: Secret::new(helper.api_key),
            project_id: helper.project_id,
            use_md5: helper.use_md5,
            base_url: helper.base_url,
            timeout_seconds: helper.timeout_seconds,
        })
    }
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl AnyPayConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_id: String, api_key: String) -> Self {
        Self {
            api_id: Secret::new(api_id),
            api_key: Secret::new(api_key),
            project_id: None,
            use_md5: false,
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `ANYPAY_API_ID`
    /// - `ANYPAY_API_KEY`
    /// - `ANYPAY_PROJECT_ID` (optional)
    /// - `ANYPAY_USE_MD5` (optional, defaults to false)
    /// - `ANYPAY_BASE_URL` (optional)
    /// - `ANYPAY_TIMEOUT_SECONDS` (optional, defaults to 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_id = required_var("ANYPAY_API_ID")?;
        let api_key = required_var("ANYPAY_API_KEY")?;

        let project_id = match env::var("ANYPAY_PROJECT_ID") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!(
                    "ANYPAY_PROJECT_ID must be an unsigned integer: {}",
                    e
                ))
            })?),
            Err(_) => None,
        };

        let use_md5 = env::var("ANYPAY_USE_MD5")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let timeout_seconds = env::var("ANYPAY_TIMEOUT_SECONDS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            api_id: Secret::new(api_id),
            api_key: Secret::new(api_key),
            project_id,
            use_md5,
            base_url: env::var("ANYPAY_BASE_URL").ok(),
            timeout_seconds,
        })
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file() -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(".env")
    }

    /// Create configuration from a specific .env file path
    ///
    /// A missing file is not an error; system environment variables are used instead.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Check that both credentials are non-empty
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_id.expose_secret().is_empty() && !self.api_key.expose_secret().is_empty()
    }

    /// Set the default project id
    #[must_use]
    pub const fn project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sign requests with MD5
    #[must_use]
    pub const fn use_md5(mut self, use_md5: bool) -> Self {
        self.use_md5 = use_md5;
        self
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Base URL with any trailing slash removed
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Get API id (use carefully - exposes secret)
    pub fn api_id(&self) -> &str {
        self.api_id.expose_secret()
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvironmentVariable(name.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
