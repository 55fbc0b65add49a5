use std::fmt::Display;

use rand::seq::IndexedRandom;

use crate::{
    config::GreetingConfig,
    delivery::{Delivery, MessageSink},
    error::GreeterError,
    event::{GreetingEvent, MemberEvent, RoomEvent},
    mention::fill_template,
    store::{OverrideField, OverrideRecord, OverrideStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Greeting {
    Welcome,
    Exit,
}

impl Greeting {
    pub(crate) fn stored(self, record: &OverrideRecord) -> Option<&str> {
        match self {
            Self::Welcome => record.welcome(),
            Self::Exit => record.leave(),
        }
    }

    pub(crate) fn field(self) -> OverrideField {
        match self {
            Self::Welcome => OverrideField::Welcome,
            Self::Exit => OverrideField::Leave,
        }
    }
}

impl Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome => write!(f, "welcome"),
            Self::Exit => write!(f, "leave"),
        }
    }
}

/// Turns join and leave events into greetings.
///
/// Holds no mutable state of its own, so one instance can be shared between
/// any number of concurrently handled events.
pub struct Greeter<S, K> {
    pub(crate) config: GreetingConfig,
    pub(crate) self_id: String,
    pub(crate) store: S,
    pub(crate) sink: K,
}

fn pick(templates: &[String]) -> Option<&str> {
    templates.choose(&mut rand::rng()).map(String::as_str)
}

impl<S: OverrideStore, K: MessageSink> Greeter<S, K> {
    /// `self_id` is the bot's own user id, events about it are never greeted
    pub fn new(config: GreetingConfig, self_id: impl Into<String>, store: S, sink: K) -> Self {
        Self {
            config,
            self_id: self_id.into(),
            store,
            sink,
        }
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    fn templates(&self, kind: Greeting) -> &[String] {
        match kind {
            Greeting::Welcome => &self.config.welcome_list,
            Greeting::Exit => &self.config.exit_list,
        }
    }

    fn is_self(&self, user_id: &str) -> bool {
        user_id == self.self_id
    }

    async fn resolve(
        &self,
        kind: Greeting,
        uid: &str,
        username: &str,
    ) -> Result<Option<String>, GreeterError> {
        let record = self.store.get(uid).await.map_err(GreeterError::store)?;
        let template = record
            .as_ref()
            .and_then(|r| kind.stored(r))
            .or_else(|| pick(self.templates(kind)));

        Ok(template.map(|t| fill_template(t, self.config.mention, username)))
    }

    /// The welcome line for a user: their stored override if they have one,
    /// a random entry of `welcome_list` otherwise.
    ///
    /// Returns `None` only when there is neither.
    pub async fn resolve_welcome(
        &self,
        uid: &str,
        username: &str,
    ) -> Result<Option<String>, GreeterError> {
        self.resolve(Greeting::Welcome, uid, username).await
    }

    /// Same as [resolve_welcome](Self::resolve_welcome) with `exit_list` and
    /// the leave override.
    pub async fn resolve_exit(
        &self,
        uid: &str,
        username: &str,
    ) -> Result<Option<String>, GreeterError> {
        self.resolve(Greeting::Exit, uid, username).await
    }

    async fn send(&self, delivery: Delivery) -> Result<(), GreeterError> {
        log::debug!("delivering {delivery:?}");
        self.sink
            .deliver(delivery)
            .await
            .map_err(GreeterError::delivery)
    }

    async fn greet_room(&self, kind: Greeting, event: &RoomEvent) -> Result<(), GreeterError> {
        if self.templates(kind).is_empty() {
            log::debug!("no {kind} messages configured, ignoring {}", event.username);
            return Ok(());
        }
        if self.is_self(&event.uid) {
            return Ok(());
        }
        let Some(message) = self.resolve(kind, &event.uid, &event.username).await? else {
            return Ok(());
        };

        let delivery = if self.config.private {
            Delivery::Whisper {
                user_id: event.uid.clone(),
                message,
            }
        } else {
            Delivery::Room { message }
        };
        self.send(delivery).await
    }

    async fn greet_member(&self, kind: Greeting, event: &MemberEvent) -> Result<(), GreeterError> {
        if !self.config.fit {
            return Ok(());
        }
        if self.templates(kind).is_empty() || self.is_self(&event.user_id) {
            return Ok(());
        }
        let Some(message) = self
            .resolve(kind, &event.user_id, &event.username)
            .await?
        else {
            return Ok(());
        };

        let channel_id = event.channel_id.clone();
        let delivery = if self.config.private {
            Delivery::DirectMessage {
                channel_id,
                message,
            }
        } else {
            Delivery::Channel {
                channel_id,
                message,
            }
        };
        self.send(delivery).await
    }

    pub async fn on_join(&self, event: &RoomEvent) -> Result<(), GreeterError> {
        self.greet_room(Greeting::Welcome, event).await
    }

    pub async fn on_leave(&self, event: &RoomEvent) -> Result<(), GreeterError> {
        self.greet_room(Greeting::Exit, event).await
    }

    /// does nothing unless `fit` is enabled
    pub async fn on_member_added(&self, event: &MemberEvent) -> Result<(), GreeterError> {
        self.greet_member(Greeting::Welcome, event).await
    }

    /// does nothing unless `fit` is enabled
    pub async fn on_member_removed(&self, event: &MemberEvent) -> Result<(), GreeterError> {
        self.greet_member(Greeting::Exit, event).await
    }

    pub async fn handle(&self, event: &GreetingEvent) -> Result<(), GreeterError> {
        match event {
            GreetingEvent::Join(e) => self.on_join(e).await,
            GreetingEvent::Leave(e) => self.on_leave(e).await,
            GreetingEvent::MemberAdded(e) => self.on_member_added(e).await,
            GreetingEvent::MemberRemoved(e) => self.on_member_removed(e).await,
        }
    }
}
