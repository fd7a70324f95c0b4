//! # Transaction API Client
//!
//! Looks up the status of previously created transactions against the
//! gateway's webservice (`ws.{host}`), by notification code or transaction
//! code, and validates legacy (NPI) notification callbacks.
//!
//! Every call is a single stateless request/response round trip; there is no
//! retry logic here, retry policy belongs to the caller. TLS certificates are
//! verified; the legacy bindings disabled peer verification, which was a
//! defect.

use crate::config::Config;
use pagseguro_core::{Error, Result, TransactionStatus, TransactionSummary};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Content type the gateway expects on transaction queries
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Response body the gateway returns on bad credentials
const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// Client for the gateway's transaction and notification endpoints
pub struct TransactionClient {
    config: Config,
    client: reqwest::Client,
}

impl TransactionClient {
    /// Create a new transaction client
    pub fn new(config: Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Look up a transaction by the notification code the gateway sent to
    /// the merchant webhook.
    ///
    /// `GET {ws}/v2/transactions/notifications/{code}?email&token`
    #[instrument(skip(self))]
    pub async fn find_by_notification_code(&self, code: &str) -> Result<TransactionSummary> {
        require_code(code)?;
        let url = format!(
            "{}/v2/transactions/notifications/{}",
            self.config.ws_base_url, code
        );
        self.fetch_transaction(&url, false).await
    }

    /// Look up a transaction by its gateway transaction code.
    ///
    /// `GET {ws}/v2/transactions/{code}?email&token`
    #[instrument(skip(self))]
    pub async fn find_by_transaction_code(&self, code: &str) -> Result<TransactionSummary> {
        require_code(code)?;
        let url = format!("{}/v2/transactions/{}", self.config.ws_base_url, code);
        self.fetch_transaction(&url, true).await
    }

    /// Validate a legacy (NPI) notification callback.
    ///
    /// POSTs `Comando=validar`, the integration token, and the notified
    /// parameters back to the gateway, returning the raw verdict string
    /// (e.g. `VERIFICADO`).
    #[instrument(skip(self, params))]
    pub async fn validate_notification(&self, params: &[(String, String)]) -> Result<String> {
        let mut form: Vec<(String, String)> = vec![
            ("Comando".to_string(), "validar".to_string()),
            ("Token".to_string(), self.config.token.clone()),
        ];
        form.extend(params.iter().cloned());

        let url = format!(
            "{}/pagseguro-ws/checkout/NPI.jhtml",
            self.config.checkout_base_url
        );

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let verdict = body.trim().to_string();
        debug!(%verdict, "legacy notification validated");
        Ok(verdict)
    }

    /// Pure lookup from numeric status code to label
    pub fn status_label(&self, code: u8) -> Result<&'static str> {
        pagseguro_core::status_label(code)
    }

    async fn fetch_transaction(&self, url: &str, form_content_type: bool) -> Result<TransactionSummary> {
        let mut request = self.client.get(url).query(&[
            ("email", self.config.email.as_str()),
            ("token", self.config.token.as_str()),
        ]);
        if form_content_type {
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let body = body.trim();

        // The gateway signals bad credentials with a literal body, not XML.
        if body == UNAUTHORIZED_BODY {
            error!("gateway rejected transaction lookup: unauthorized");
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            error!("gateway error: status={}, body={}", status, body);
            return Err(Error::Response(format!("HTTP {status}: {body}")));
        }

        let summary = decode_transaction(body)?;
        debug!(
            status = %summary.status,
            reference = %summary.reference,
            "transaction lookup complete"
        );
        Ok(summary)
    }
}

fn require_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(Error::Validation(
            "transaction code must not be blank".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct TransactionXml {
    status: u8,
    #[serde(default)]
    reference: String,
}

fn decode_transaction(body: &str) -> Result<TransactionSummary> {
    let xml: TransactionXml = quick_xml::de::from_str(body)
        .map_err(|e| Error::Response(format!("invalid transaction XML: {e}")))?;

    let status = TransactionStatus::try_from(xml.status)?;
    Ok(TransactionSummary {
        status,
        reference: xml.reference,
    })
}
