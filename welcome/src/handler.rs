use std::{future::Future, pin::Pin, sync::Arc};

use guard::CommandGuard;
use serde::Deserialize;
use tokio::sync::mpsc::Sender;
use welcome_core::{Delivery, Greeter, Invocation};

use crate::{
    db::SqliteStore,
    guard::{AndGuard, Guard, GuardContext},
    handler::response::{BotResponse, IntoResponse},
    util::split_first_rest,
};

pub mod guard;
pub mod response;

pub type AppGreeter = Greeter<SqliteStore, Sender<Delivery>>;

/// A chat message that may be a command, as forwarded by the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandMessage {
    pub platform: String,
    pub user_id: String,
    pub username: String,
    pub channel_id: String,
    pub text: String,
}

impl CommandMessage {
    /// first word of the message
    pub fn name(&self) -> &str {
        split_first_rest(&self.text).0
    }

    /// everything after the command name, `None` if there's nothing
    pub fn args(&self) -> Option<&str> {
        split_first_rest(&self.text).1
    }

    pub fn invocation(&self) -> Invocation {
        Invocation {
            platform: self.platform.clone(),
            user_id: self.user_id.clone(),
            username: self.username.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CommandContext {
    pub msg: CommandMessage,
    pub bot_tx: Sender<Delivery>,
    pub greeter: Arc<AppGreeter>,
    pub max_override_graphemes: usize,
}

type BoxedResponse = Pin<Box<dyn Future<Output = Option<BotResponse>> + Send + 'static>>;

pub trait CommandHandler: Send + Sync + 'static {
    fn handle(&self, cx: CommandContext) -> BoxedResponse;
}

impl<F, Fut, Res> CommandHandler for F
where
    F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Res> + Send + 'static,
    Res: IntoResponse + Send + 'static,
{
    fn handle(&self, cx: CommandContext) -> BoxedResponse {
        let fut = self(cx);
        Box::pin(async move { fut.await.into_response().await })
    }
}

/// Holds command logic and the guard deciding when it runs, built with
/// [CommandBuilder]
pub struct Command {
    guard: Box<dyn Guard>,
    handler: Box<dyn CommandHandler>,
}

impl Command {
    pub fn matches(&self, cx: &GuardContext) -> bool {
        self.guard.check(cx)
    }

    pub async fn handle(&self, cx: CommandContext) {
        let sender = cx.bot_tx.clone();
        let channel_id = cx.msg.channel_id.clone();
        if let Some(BotResponse(message)) = self.handler.handle(cx).await {
            if let Err(e) = sender
                .send(Delivery::Channel {
                    channel_id,
                    message,
                })
                .await
            {
                log::error!("failed to send command response: {e}");
            }
        }
    }
}

pub struct CommandBuilder<H: CommandHandler, G: Guard> {
    handler: H,
    guard: G,
}

impl<H: CommandHandler> CommandBuilder<H, CommandGuard> {
    pub fn new(handler: H, names: Vec<String>) -> Self {
        Self {
            handler,
            guard: CommandGuard::new(names),
        }
    }
}

impl<H: CommandHandler, G: Guard + 'static> CommandBuilder<H, G> {
    pub fn build(self) -> Command {
        Command {
            guard: Box::new(self.guard),
            handler: Box::new(self.handler),
        }
    }

    pub fn and<G2: Guard>(self, guard: G2) -> CommandBuilder<H, AndGuard<G, G2>> {
        CommandBuilder {
            handler: self.handler,
            guard: self.guard.and(guard),
        }
    }
}

#[test]
fn command_message_parts() {
    let msg = crate::guard::command_message("42", "iirose.lr.set  later (@) ");
    assert_eq!(msg.name(), "iirose.lr.set");
    assert_eq!(msg.args(), Some("later (@)"));
    assert_eq!(
        msg.invocation(),
        Invocation {
            platform: "iirose".into(),
            user_id: "42".into(),
            username: "Ann".into(),
        }
    );

    let msg = crate::guard::command_message("42", "iirose.lr.rm");
    assert_eq!(msg.args(), None);
}
