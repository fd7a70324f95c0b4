//! # Gateway Configuration
//!
//! Merchant credentials and environment selection for the PagSeguro gateway.
//! Credentials can be loaded from environment variables or passed explicitly.

use pagseguro_core::{Error, Result};
use std::env;
use std::time::Duration;

/// Default button image served by the gateway's CDN
pub const DEFAULT_BUTTON_IMAGE: &str =
    "https://p.simg.uol.com.br/out/pagseguro/i/botoes/pagamentos/164x37-pagar-assina.gif";

/// Default timeout for transaction API calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway environment, selecting one of two fixed API hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment (`sandbox.pagseguro.uol.com.br`)
    Sandbox,
    /// Live environment (`pagseguro.uol.com.br`)
    Production,
}

impl Environment {
    /// Checkout host for this environment
    pub fn host(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox.pagseguro.uol.com.br",
            Environment::Production => "pagseguro.uol.com.br",
        }
    }

    /// Webservice host for this environment (`ws.` prefix)
    pub fn ws_host(&self) -> String {
        format!("ws.{}", self.host())
    }
}

/// Gateway account configuration.
///
/// Immutable once built; replacing credentials means building a new `Config`,
/// which swaps email, token and host atomically.
#[derive(Debug, Clone)]
pub struct Config {
    /// Merchant account e-mail (the form's `receiverEmail`)
    pub email: String,

    /// Integration token issued by the gateway
    pub token: String,

    /// Sandbox or production
    pub environment: Environment,

    /// Base URL for the checkout form action (overridable for tests)
    pub checkout_base_url: String,

    /// Base URL for the transaction webservice (overridable for tests)
    pub ws_base_url: String,

    /// Submit button image URL
    pub button_image_url: String,

    /// HTTP timeout for transaction API calls
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration with explicit credentials.
    ///
    /// Fails with [`Error::Validation`] when the e-mail or token is blank.
    pub fn new(
        email: impl Into<String>,
        token: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        let email = email.into();
        let token = token.into();

        if email.trim().is_empty() || token.trim().is_empty() {
            return Err(Error::Validation(
                "gateway credentials (email and token) must not be blank".to_string(),
            ));
        }

        Ok(Self {
            email,
            token,
            environment,
            checkout_base_url: format!("https://{}", environment.host()),
            ws_base_url: format!("https://{}", environment.ws_host()),
            button_image_url: DEFAULT_BUTTON_IMAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAGSEGURO_EMAIL`
    /// - `PAGSEGURO_TOKEN`
    ///
    /// Optional:
    /// - `PAGSEGURO_ENVIRONMENT` (`sandbox` | `production`, default sandbox)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let email = env::var("PAGSEGURO_EMAIL")
            .map_err(|_| Error::Configuration("PAGSEGURO_EMAIL not set".to_string()))?;

        let token = env::var("PAGSEGURO_TOKEN")
            .map_err(|_| Error::Configuration("PAGSEGURO_TOKEN not set".to_string()))?;

        let environment = match env::var("PAGSEGURO_ENVIRONMENT") {
            Ok(value) => match value.to_ascii_lowercase().as_str() {
                "sandbox" => Environment::Sandbox,
                "production" => Environment::Production,
                other => {
                    return Err(Error::Configuration(format!(
                        "PAGSEGURO_ENVIRONMENT must be 'sandbox' or 'production', got '{other}'"
                    )))
                }
            },
            Err(_) => Environment::Sandbox,
        };

        Self::new(email, token, environment)
    }

    /// Check if this configuration targets the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.environment == Environment::Sandbox
    }

    /// Full checkout form action URL
    pub fn checkout_url(&self) -> String {
        format!("{}/v2/checkout/payment.html", self.checkout_base_url)
    }

    /// Builder: set custom checkout base URL (for testing)
    pub fn with_checkout_base_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_base_url = url.into();
        self
    }

    /// Builder: set custom webservice base URL (for testing)
    pub fn with_ws_base_url(mut self, url: impl Into<String>) -> Self {
        self.ws_base_url = url.into();
        self
    }

    /// Builder: set the submit button image URL
    pub fn with_button_image(mut self, url: impl Into<String>) -> Self {
        self.button_image_url = url.into();
        self
    }

    /// Builder: set the transaction API timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_hosts() {
        assert_eq!(Environment::Sandbox.host(), "sandbox.pagseguro.uol.com.br");
        assert_eq!(Environment::Production.host(), "pagseguro.uol.com.br");
        assert_eq!(
            Environment::Sandbox.ws_host(),
            "ws.sandbox.pagseguro.uol.com.br"
        );
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let err = Config::new("", "T1", Environment::Sandbox).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = Config::new("m@x.com", "   ", Environment::Sandbox).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_checkout_url_by_environment() {
        let sandbox = Config::new("m@x.com", "T1", Environment::Sandbox).unwrap();
        assert_eq!(
            sandbox.checkout_url(),
            "https://sandbox.pagseguro.uol.com.br/v2/checkout/payment.html"
        );
        assert!(sandbox.is_sandbox());

        let production = Config::new("m@x.com", "T1", Environment::Production).unwrap();
        assert_eq!(
            production.checkout_url(),
            "https://pagseguro.uol.com.br/v2/checkout/payment.html"
        );
        assert_eq!(
            production.ws_base_url,
            "https://ws.pagseguro.uol.com.br"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new("m@x.com", "T1", Environment::Sandbox)
            .unwrap()
            .with_ws_base_url("http://127.0.0.1:9090")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.ws_base_url, "http://127.0.0.1:9090");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
