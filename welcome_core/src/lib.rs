//! Host-agnostic greeting dispatcher: picks a welcome or farewell line, fills in
//! the mention and hands it to whatever transport the host provides.

pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod manage;
pub mod mention;
pub mod store;

pub use crate::config::GreetingConfig;
pub use crate::delivery::{Delivery, MessageSink};
pub use crate::dispatcher::Greeter;
pub use crate::error::GreeterError;
pub use crate::event::{GreetingEvent, MemberEvent, RoomEvent};
pub use crate::manage::Invocation;
pub use crate::mention::MentionTag;
pub use crate::store::{MemoryStore, OverrideField, OverrideRecord, OverrideStore};
