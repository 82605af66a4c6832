use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the provider was unexpected. (e.g. no choices returned
    /// in a completion, or a payload without the `english` key)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
    /// The model refused to process the input.
    #[error("Refusal: {0}")]
    Refusal(String),
}

pub type CopyModelResult<T> = Result<T, CopyModelError>;
