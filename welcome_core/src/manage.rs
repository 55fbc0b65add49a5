//! Per-user override management, the backend of the `wb`/`lr` commands.

use crate::{
    delivery::MessageSink,
    dispatcher::{Greeter, Greeting},
    error::GreeterError,
    store::OverrideStore,
};

/// Who ran a management command, and from where
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Invocation {
    pub platform: String,
    pub user_id: String,
    pub username: String,
}

impl<S: OverrideStore, K: MessageSink> Greeter<S, K> {
    /// mention of the invoker if the command is allowed on their platform,
    /// the rejection reply otherwise
    fn check_platform(&self, invocation: &Invocation) -> Result<String, String> {
        let mention = self.config.mention.render(&invocation.username);
        if invocation.platform == self.config.platform {
            Ok(mention)
        } else {
            Err(format!(
                "{mention} this command only works on {}",
                self.config.platform
            ))
        }
    }

    async fn write_override(
        &self,
        kind: Greeting,
        uid: &str,
        text: String,
    ) -> Result<(), GreeterError> {
        self.store
            .set_field(uid, kind.field(), text)
            .await
            .map_err(GreeterError::store)
    }

    async fn set_override(
        &self,
        kind: Greeting,
        invocation: &Invocation,
        text: Option<&str>,
    ) -> Result<String, GreeterError> {
        let mention = match self.check_platform(invocation) {
            Ok(m) => m,
            Err(rejection) => return Ok(rejection),
        };
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(format!("{mention} you didn't set a message"));
        };

        self.write_override(kind, &invocation.user_id, text.to_owned())
            .await?;
        log::info!("{} set a {kind} override", invocation.user_id);
        Ok(format!("{mention} your {kind} message has been set"))
    }

    async fn clear_override(
        &self,
        kind: Greeting,
        invocation: &Invocation,
    ) -> Result<String, GreeterError> {
        let mention = match self.check_platform(invocation) {
            Ok(m) => m,
            Err(rejection) => return Ok(rejection),
        };

        self.write_override(kind, &invocation.user_id, String::new())
            .await?;
        log::info!("{} cleared their {kind} override", invocation.user_id);
        Ok(format!("{mention} your {kind} message has been removed"))
    }

    /// Stores `text` as the invoker's welcome message. The reply is meant to
    /// be sent back to them as is.
    pub async fn set_welcome_override(
        &self,
        invocation: &Invocation,
        text: Option<&str>,
    ) -> Result<String, GreeterError> {
        self.set_override(Greeting::Welcome, invocation, text).await
    }

    pub async fn clear_welcome_override(
        &self,
        invocation: &Invocation,
    ) -> Result<String, GreeterError> {
        self.clear_override(Greeting::Welcome, invocation).await
    }

    pub async fn set_exit_override(
        &self,
        invocation: &Invocation,
        text: Option<&str>,
    ) -> Result<String, GreeterError> {
        self.set_override(Greeting::Exit, invocation, text).await
    }

    pub async fn clear_exit_override(
        &self,
        invocation: &Invocation,
    ) -> Result<String, GreeterError> {
        self.clear_override(Greeting::Exit, invocation).await
    }
}
