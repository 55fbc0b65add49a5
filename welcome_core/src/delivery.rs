use std::future::Future;

use tokio::sync::mpsc::{Sender, error::SendError};

/// One outbound message and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Delivery {
    /// public message to the room the bot sits in
    Room { message: String },
    /// private message to a room user
    Whisper { user_id: String, message: String },
    /// generic send to the session's channel
    Channel { channel_id: String, message: String },
    /// generic private send, addressed by channel like the host API
    DirectMessage { channel_id: String, message: String },
}

impl Delivery {
    pub fn message(&self) -> &str {
        match self {
            Self::Room { message }
            | Self::Whisper { message, .. }
            | Self::Channel { message, .. }
            | Self::DirectMessage { message, .. } => message,
        }
    }
}

/// Whatever the host uses to actually send messages
pub trait MessageSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn deliver(&self, delivery: Delivery) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl MessageSink for Sender<Delivery> {
    type Error = SendError<Delivery>;

    async fn deliver(&self, delivery: Delivery) -> Result<(), Self::Error> {
        self.send(delivery).await
    }
}
