use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GreeterError {
    #[error("override store failed: {0}")]
    Store(#[source] BoxError),
    #[error("failed to deliver message: {0}")]
    Delivery(#[source] BoxError),
}

impl GreeterError {
    pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(e))
    }

    pub(crate) fn delivery(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Box::new(e))
    }
}
