use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("state payload must be a JSON object")]
    NotAnObject,

    #[error("malformed {0} in state payload: {1}")]
    Codec(&'static str, #[source] serde_json::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
