use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompletionError>;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// Missing API key or other invalid client settings
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection failed before a response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with anything other than 200
    #[error("completion api returned status {0}")]
    Status(u16),

    /// Body was not JSON or had no `choices[0].message.content`
    #[error("parse error: {0}")]
    Parse(String),
}
