//! The shared HTTP client and the request helpers every lookup goes through.

#![deny(unsafe_code)]
#![deny(missing_docs)]

use std::time;

use serde::de::DeserializeOwned;

use crate::error::LookupError;

/// The user agent sent with every request.
pub static USER_AGENT: &str = concat!("lookupbot/", env!("CARGO_PKG_VERSION"));

/// Requests that take longer than this fail with an upstream error.
pub const TIMEOUT: time::Duration = time::Duration::from_secs(5);

lazy_static! {
    /// The client shared by all commands; connections are pooled across lookups.
    pub static ref REQWEST: reqwest::Client = client(TIMEOUT);
}

/**
 * Build a client with the bot's user agent and the given timeout. Falls back to reqwest's defaults
 * if the TLS backend cannot be initialised with these settings.
 */
pub fn client(timeout: time::Duration) -> reqwest::Client {
    match reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
    {
        Ok(client) =>
            client,
        Err(err) => {
            warn!("Failed to build HTTP client, using defaults: {}", err);
            reqwest::Client::new()
        },
    }
}

/**
 * GET `url` and return the body. A 404 becomes `NotFound`, any other non-success status or
 * transport failure becomes `Upstream`.
 */
pub async fn get_text(
    client: &reqwest::Client,
    url: &reqwest::Url,
    provider: &'static str,
) -> Result<String, LookupError> {
    debug!("{}: GET {}{}", provider, url.host_str().unwrap_or(""), url.path());

    let response = client.get(url.clone())
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|err| LookupError::from_reqwest(provider, err))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(LookupError::NotFound(format!("{} has no match for that query", provider)));
    }
    if !status.is_success() {
        return Err(LookupError::upstream(provider, status));
    }

    response.text()
        .await
        .map_err(|err| LookupError::from_reqwest(provider, err))
}

/**
 * Decode a JSON body, reporting failures as an upstream error of `provider`.
 */
pub fn decode<T: DeserializeOwned>(body: &str, provider: &'static str) -> Result<T, LookupError> {
    serde_json::from_str(body)
        .map_err(|err| LookupError::upstream(provider, format!("invalid JSON: {}", err)))
}

/**
 * Build a URL from a base and query parameters.
 */
pub fn url_with_params(base: &str, params: &[(&str, String)]) -> Result<reqwest::Url, LookupError> {
    reqwest::Url::parse_with_params(base, params)
        .map_err(|err| LookupError::Configuration(format!("Invalid endpoint '{}': {}", base, err)))
}
