//! Errors raised by the lookup pipelines. All of them are shown to the user as a single line.

#![deny(unsafe_code)]
#![deny(missing_docs)]

/// The error taxonomy of a lookup; each variant is user-visible and never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// A required API key (or other setting) is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The provider answered, but has nothing matching the query.
    #[error("{0}")]
    NotFound(String),

    /// The HTTP request failed, returned a non-success status or could not be decoded.
    #[error("{provider}: {detail}")]
    Upstream {
        /// The provider that failed, e.g. "OpenWeather".
        provider: &'static str,
        /// What went wrong, without the request URL.
        detail: String,
    },

    /// The user input does not satisfy a format precondition.
    #[error("{0}")]
    MalformedInput(String),
}

impl LookupError {
    /// A `Configuration` error for an API key missing from the `[options]` table.
    pub fn missing_key(service: &str, option: &str) -> LookupError {
        LookupError::Configuration(format!(
            "Please configure the {} API key via the '{}' option", service, option))
    }

    /// An `Upstream` error for `provider`.
    pub fn upstream<D: ToString>(provider: &'static str, detail: D) -> LookupError {
        LookupError::Upstream {
            provider,
            detail: detail.to_string(),
        }
    }

    /// An `Upstream` error from a failed reqwest call. The URL is dropped since it may carry an
    /// API key.
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> LookupError {
        LookupError::upstream(provider, err.without_url())
    }
}
