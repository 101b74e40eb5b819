//! Registry client interface and its SOAP implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::operation::Operation;
use super::record::Record;
use super::soap::{build_envelope, parse_response, soap_action};
use crate::config::{Config, Credentials};
use crate::error_handling::{get_retry_strategy, FetchError, InitializationError};

/// Fetches one detail record from the registry.
///
/// The exporter only depends on this trait, so it can run against a fake in
/// tests. Implementations perform exactly one logical fetch per call.
pub trait RegistryClient {
    /// Runs `operation` for the record identified by `target`.
    fn fetch(
        &self,
        operation: Operation,
        target: &str,
    ) -> impl Future<Output = Result<Record, FetchError>>;
}

/// SOAP-over-HTTP client for the registry's unit service.
pub struct SoapClient {
    http: reqwest::Client,
    endpoint: String,
    namespace: String,
    credentials: Credentials,
    retries: usize,
}

impl SoapClient {
    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let http = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("mastr_export/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            namespace: config.namespace.clone(),
            credentials: config.credentials.clone(),
            retries: config.retries,
        })
    }

    async fn fetch_once(&self, operation: Operation, target: &str) -> Result<Record, FetchError> {
        let envelope = build_envelope(
            &self.namespace,
            operation.name,
            &[
                ("apiKey", self.credentials.api_key.as_str()),
                (
                    "marktakteurMastrNummer",
                    self.credentials.actor_number.as_str(),
                ),
                (operation.kind.target_parameter(), target),
            ],
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", soap_action(&self.namespace, operation.name))
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return parse_response(&body);
        }
        // SOAP 1.1 reports faults with HTTP 500; prefer the fault text.
        match parse_response(&body) {
            Err(fault @ FetchError::Fault(_)) => Err(fault),
            _ => Err(FetchError::Status(status.as_u16())),
        }
    }
}

impl RegistryClient for SoapClient {
    #[allow(deprecated)]
    async fn fetch(&self, operation: Operation, target: &str) -> Result<Record, FetchError> {
        log::debug!("{} {}", operation.name, target);
        tokio_retry::RetryIf::spawn(
            get_retry_strategy(self.retries),
            || self.fetch_once(operation, target),
            |e: &FetchError| {
                let retry = e.is_transient();
                if retry {
                    log::debug!("Retrying {} {} after: {}", operation.name, target, e);
                }
                retry
            },
        )
        .await
    }
}
