use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::models::CallbackKind;

pub const SANDBOX_BASE_URL: &str = "https://sandbox.temboplus.com";
pub const PRODUCTION_BASE_URL: &str = "https://temboplus.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub tembo: TemboConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "Invalid environment \"{}\". Supported: sandbox, production",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials and endpoints for the Tembo API.
///
/// The secret key and account id authenticate wallet, collection and payment
/// calls; the bearer token authenticates eKYC, merchant account and remittance
/// calls.
#[derive(Clone)]
pub struct TemboConfig {
    pub account_id: String,
    pub secret_key: String,
    pub token: String,
    pub environment: Environment,
    /// Overrides the environment's base URL when set.
    pub base_url: Option<String>,
    /// Public base URL of this service, used to build `callbackUrl` values.
    pub callback_base_url: String,
    /// Base64 HMAC key for merchant callbacks. Falls back to `secret_key`.
    pub callback_secret: Option<String>,
}

impl TemboConfig {
    pub fn new(
        account_id: impl Into<String>,
        secret_key: impl Into<String>,
        token: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            secret_key: secret_key.into(),
            token: token.into(),
            environment,
            base_url: None,
            callback_base_url: "http://localhost".to_string(),
            callback_secret: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_callback_base_url(mut self, callback_base_url: impl Into<String>) -> Self {
        self.callback_base_url = callback_base_url.into();
        self
    }

    pub fn with_callback_secret(mut self, callback_secret: impl Into<String>) -> Self {
        self.callback_secret = Some(callback_secret.into());
        self
    }

    pub fn api_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Absolute URL of this service's webhook route for `kind`.
    pub fn callback_url(&self, kind: CallbackKind) -> String {
        format!(
            "{}{}",
            self.callback_base_url.trim_end_matches('/'),
            kind.path()
        )
    }

    pub fn callback_secret(&self) -> &str {
        self.callback_secret.as_deref().unwrap_or(&self.secret_key)
    }

    /// Rejects configurations missing any credential.
    pub fn ensure_complete(&self) -> Result<(), String> {
        let required = [
            ("accountId", &self.account_id),
            ("secretKey", &self.secret_key),
            ("token", &self.token),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("Missing required option: \"{}\"", name));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for TemboConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemboConfig")
            .field("account_id", &self.account_id)
            .field("secret_key", &"[redacted]")
            .field("token", &"[redacted]")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("callback_base_url", &self.callback_base_url)
            .field(
                "callback_secret",
                &self.callback_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default().separator("_"))
    }

    /// Values stay strings until read, so numeric-looking credentials keep
    /// their leading zeros.
    fn from_environment(source: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("tembo.environment", "sandbox")?
            .set_default("tembo.callback.base.url", "http://localhost")?
            .add_source(source)
            .build()?;

        let environment = config
            .get_string("tembo.environment")?
            .parse::<Environment>()
            .map_err(config::ConfigError::Message)?;

        let mut tembo = TemboConfig::new(
            config.get_string("tembo.account.id")?,
            config.get_string("tembo.secret.key")?,
            config.get_string("tembo.token")?,
            environment,
        )
        .with_callback_base_url(config.get_string("tembo.callback.base.url")?);

        tembo.base_url = config.get_string("tembo.base.url").ok();
        tembo.callback_secret = config.get_string("tembo.callback.secret").ok();

        tembo
            .ensure_complete()
            .map_err(config::ConfigError::Message)?;

        Ok(Config {
            server: ServerConfig {
                host: config.get_string("host").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: config.get_int("port").unwrap_or(8080) as u16,
            },
            tembo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> TemboConfig {
        TemboConfig::new("acc-1", "c2VjcmV0", "token-1", Environment::Sandbox)
    }

    #[test]
    fn test_environment_selects_base_url() {
        assert_eq!(sandbox().api_base_url(), SANDBOX_BASE_URL);

        let production = TemboConfig {
            environment: Environment::Production,
            ..sandbox()
        };
        assert_eq!(production.api_base_url(), PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let config = sandbox().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!(" Production ".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_callback_url_joins_route() {
        let config = sandbox().with_callback_base_url("https://shop.example.com/");
        assert_eq!(
            config.callback_url(CallbackKind::Remittance),
            "https://shop.example.com/api/v1/remittance/callback"
        );
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let config = TemboConfig {
            token: "  ".to_string(),
            ..sandbox()
        };
        assert_eq!(
            config.ensure_complete(),
            Err("Missing required option: \"token\"".to_string())
        );
        assert!(sandbox().ensure_complete().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", sandbox().with_callback_secret("top-secret"));
        assert!(!rendered.contains("c2VjcmV0"));
        assert!(!rendered.contains("token-1"));
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("acc-1"));
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::default()
            .separator("_")
            .source(Some(vars))
    }

    #[test]
    fn test_numeric_credentials_keep_leading_zeros() {
        let config = Config::from_environment(environment(&[
            ("TEMBO_ACCOUNT_ID", "0012345"),
            ("TEMBO_SECRET_KEY", "000111"),
            ("TEMBO_TOKEN", "0042"),
            ("PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.tembo.account_id, "0012345");
        assert_eq!(config.tembo.secret_key, "000111");
        assert_eq!(config.tembo.token, "0042");
        assert_eq!(config.tembo.environment, Environment::Sandbox);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_missing_environment_credentials_fail() {
        let error = Config::from_environment(environment(&[
            ("TEMBO_ACCOUNT_ID", "acc-1"),
            ("TEMBO_SECRET_KEY", "secret-1"),
        ]))
        .unwrap_err();

        assert!(error.to_string().contains("tembo.token"));
    }

    #[test]
    fn test_callback_secret_defaults_to_secret_key() {
        assert_eq!(sandbox().callback_secret(), "c2VjcmV0");
        assert_eq!(sandbox().with_callback_secret("b3RoZXI=").callback_secret(), "b3RoZXI=");
    }
}
