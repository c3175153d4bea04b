use thiserror::Error;

/// Failures of the advisory integration. None of these interrupt the rest
/// of the application; the conversation view shows them inline.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Missing or unusable configuration (typically the API key)
    #[error("Advisor is not configured: {0}")]
    Configuration(String),

    /// Network-level failure or timeout talking to the endpoint
    #[error("Failed to reach the advisory service: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Advisory service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx response that does not contain a usable completion
    #[error("Advisory service returned an empty or malformed response")]
    MalformedResponse,
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
