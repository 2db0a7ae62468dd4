use thiserror::Error;

/// Field rule violations, raised before anything reaches a store.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}
