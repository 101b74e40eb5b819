//! Registry client initialization.

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::registry::SoapClient;

/// Initializes the SOAP client for the registry.
///
/// The client is configured with:
/// - Endpoint and XML namespace from the config
/// - Per-request timeout from `timeout_seconds`
/// - Retry budget from `retries`
/// - The registry credentials
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the HTTP client cannot be
/// built.
pub fn init_client(config: &Config) -> Result<SoapClient, InitializationError> {
    let client = SoapClient::new(config)?;
    log::debug!(
        "Registry client for {} (timeout {}s, {} retries, actor {})",
        config.endpoint,
        config.timeout_seconds,
        config.retries,
        config.credentials.actor_number
    );
    Ok(client)
}
