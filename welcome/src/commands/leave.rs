use welcome_core::GreeterError;

use super::override_text;
use crate::handler::CommandContext;

/// `iirose.lr.set <message>`
pub async fn set(cx: CommandContext) -> Result<String, GreeterError> {
    cx.greeter
        .set_exit_override(&cx.msg.invocation(), override_text(&cx))
        .await
}

/// `iirose.lr.rm`
pub async fn rm(cx: CommandContext) -> Result<String, GreeterError> {
    cx.greeter.clear_exit_override(&cx.msg.invocation()).await
}
