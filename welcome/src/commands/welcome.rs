use welcome_core::GreeterError;

use super::override_text;
use crate::handler::CommandContext;

/// `iirose.wb.set <message>`
pub async fn set(cx: CommandContext) -> Result<String, GreeterError> {
    cx.greeter
        .set_welcome_override(&cx.msg.invocation(), override_text(&cx))
        .await
}

/// `iirose.wb.rm`
pub async fn rm(cx: CommandContext) -> Result<String, GreeterError> {
    cx.greeter
        .clear_welcome_override(&cx.msg.invocation())
        .await
}
