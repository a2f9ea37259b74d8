use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisoryError>;

#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} provider returned status {status} for {target}")]
    Status {
        provider: &'static str,
        target: String,
        status: u16,
    },

    #[error("Weather response for {0} has no conditions")]
    MissingConditions(String),

    #[error("{0} provider is not configured")]
    Disabled(&'static str),
}
