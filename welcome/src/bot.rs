use std::{io, sync::Arc};

use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::mpsc::{self, Receiver, Sender},
};
use tokio_util::{
    codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError},
    task::TaskTracker,
};
use welcome_core::{Delivery, Greeter, GreetingConfig, GreetingEvent, MemberEvent, RoomEvent};

use crate::{
    codec::{HostLine, HostLineCodec},
    db::SqliteStore,
    guard::GuardContext,
    handler::{AppGreeter, Command, CommandContext, CommandMessage},
};

/// One line of input from the host adapter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    JoinRoom(RoomEvent),
    LeaveRoom(RoomEvent),
    GuildMemberAdded(MemberEvent),
    GuildMemberRemoved(MemberEvent),
    Command(CommandMessage),
}

impl HostMessage {
    fn into_event(self) -> Result<GreetingEvent, CommandMessage> {
        match self {
            Self::JoinRoom(e) => Ok(GreetingEvent::Join(e)),
            Self::LeaveRoom(e) => Ok(GreetingEvent::Leave(e)),
            Self::GuildMemberAdded(e) => Ok(GreetingEvent::MemberAdded(e)),
            Self::GuildMemberRemoved(e) => Ok(GreetingEvent::MemberRemoved(e)),
            Self::Command(msg) => Err(msg),
        }
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Lines(#[from] LinesCodecError),
    #[error("failed to serialize delivery: {0}")]
    Json(#[from] serde_json::Error),
}

type Output<W> = FramedWrite<W, LinesCodec>;

const CMD_CHANNEL_SIZE: usize = 128;

/// longest input line accepted, in bytes
const MAX_LINE_LENGTH: usize = 64 * 1024;

pub struct Bot {
    greeter: Arc<AppGreeter>,
    commands: Vec<Command>,
    cmd_rx: Receiver<Delivery>,
    cmd_tx: Sender<Delivery>,
    max_override_graphemes: usize,
}

impl Bot {
    pub fn new(config: GreetingConfig, self_id: impl Into<String>, store: SqliteStore) -> Self {
        let (tx, rx) = mpsc::channel(CMD_CHANNEL_SIZE);
        Self {
            greeter: Arc::new(Greeter::new(config, self_id, store, tx.clone())),
            commands: vec![],
            cmd_rx: rx,
            cmd_tx: tx,
            max_override_graphemes: usize::MAX,
        }
    }

    pub fn max_override_graphemes(mut self, limit: usize) -> Self {
        self.max_override_graphemes = limit;
        self
    }

    pub fn add_commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    fn get_cmd_cx(&self, msg: CommandMessage) -> CommandContext {
        CommandContext {
            msg,
            bot_tx: self.cmd_tx.clone(),
            greeter: self.greeter.clone(),
            max_override_graphemes: self.max_override_graphemes,
        }
    }

    fn handle_line(&self, line: HostLine, commands: &Arc<Vec<Command>>, tracker: &TaskTracker) {
        let line = match line {
            HostLine::Line(bytes) => bytes,
            HostLine::TooLong => {
                log::warn!("ignoring line longer than {MAX_LINE_LENGTH} bytes");
                return;
            }
        };
        let line = match std::str::from_utf8(&line) {
            Ok(l) => l,
            Err(e) => {
                log::warn!("ignoring line that isn't UTF-8: {e}");
                return;
            }
        };
        if line.trim().is_empty() {
            return;
        }
        let msg: HostMessage = match serde_json::from_str(line) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("ignoring malformed line {line:?}: {e}");
                return;
            }
        };
        log::trace!("received {msg:?}");

        match msg.into_event() {
            Ok(event) => {
                let greeter = self.greeter.clone();
                tracker.spawn(async move {
                    if let Err(e) = greeter.handle(&event).await {
                        log::error!("failed to greet for {event:?}: {e}");
                    }
                });
            }
            Err(msg) => {
                let commands = commands.clone();
                let cx = self.get_cmd_cx(msg);
                tracker.spawn(async move {
                    let found = {
                        let guard_cx = GuardContext::new(&cx.msg);
                        commands.iter().position(|c| c.matches(&guard_cx))
                    };
                    match found {
                        Some(idx) => commands[idx].handle(cx).await,
                        None => log::trace!("no command matches {:?}", cx.msg.text),
                    }
                });
            }
        }
    }

    async fn write<W: AsyncWrite + Unpin>(
        out: &mut Output<W>,
        delivery: &Delivery,
    ) -> Result<(), BotError> {
        let line = serde_json::to_string(delivery)?;
        log::debug!("sending {line}");
        out.send(line).await?;
        Ok(())
    }

    /// Handles host messages from `input` until it closes, writing deliveries
    /// to `output` as they come in. Every message is handled on its own task.
    pub async fn run<R, W>(mut self, input: R, output: W) -> Result<(), BotError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(input, HostLineCodec::new(MAX_LINE_LENGTH));
        let mut out = FramedWrite::new(output, LinesCodec::new());
        let tracker = TaskTracker::new();
        let commands = Arc::new(std::mem::take(&mut self.commands));

        loop {
            tokio::select! {
                line = lines.next() => match line {
                    Some(line) => self.handle_line(line?, &commands, &tracker),
                    None => break,
                },
                Some(delivery) = self.cmd_rx.recv() => {
                    Self::write(&mut out, &delivery).await?;
                }
            }
        }

        log::info!("input closed, waiting on {} pending task(s)", tracker.len());
        tracker.close();
        loop {
            tokio::select! {
                () = tracker.wait() => break,
                Some(delivery) = self.cmd_rx.recv() => {
                    Self::write(&mut out, &delivery).await?;
                }
            }
        }
        while let Ok(delivery) = self.cmd_rx.try_recv() {
            Self::write(&mut out, &delivery).await?;
        }
        Ok(())
    }
}
