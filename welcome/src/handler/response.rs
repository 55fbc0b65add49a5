use std::future::{Ready, ready};

use welcome_core::GreeterError;

/// Text sent back to the channel a command came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotResponse(pub String);

pub trait IntoResponse {
    fn into_response(self) -> impl Future<Output = Option<BotResponse>> + Send;
}

impl IntoResponse for BotResponse {
    fn into_response(self) -> Ready<Option<BotResponse>> {
        ready(Some(self))
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Ready<Option<BotResponse>> {
        ready(Some(BotResponse(self)))
    }
}

impl<T: IntoResponse + Send, E: IntoResponse + Send> IntoResponse for Result<T, E> {
    async fn into_response(self) -> Option<BotResponse> {
        match self {
            Ok(o) => o.into_response().await,
            Err(e) => e.into_response().await,
        }
    }
}

impl IntoResponse for GreeterError {
    fn into_response(self) -> Ready<Option<BotResponse>> {
        log::error!("command failed: {self}");
        ready(None)
    }
}
