use crate::handler::CommandMessage;

pub struct GuardContext<'a> {
    message: &'a CommandMessage,
}

impl<'a> GuardContext<'a> {
    pub fn new(message: &'a CommandMessage) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'a CommandMessage {
        self.message
    }
}

pub trait Guard: Send + Sync {
    fn check(&self, ctx: &GuardContext) -> bool;

    fn and<G: Guard>(self, rhs: G) -> AndGuard<Self, G>
    where
        Self: Sized,
    {
        AndGuard { lhs: self, rhs }
    }

    fn not(self) -> NotGuard<Self>
    where
        Self: Sized,
    {
        NotGuard(self)
    }
}

pub struct AndGuard<G1: Guard + Sized, G2: Guard + Sized> {
    lhs: G1,
    rhs: G2,
}

impl<G1: Guard, G2: Guard> Guard for AndGuard<G1, G2> {
    fn check(&self, ctx: &GuardContext) -> bool {
        self.lhs.check(ctx) && self.rhs.check(ctx)
    }
}

/// Inverts the result of the inner guard
pub struct NotGuard<G: Guard>(G);

impl<G: Guard> Guard for NotGuard<G> {
    fn check(&self, ctx: &GuardContext) -> bool {
        !self.0.check(ctx)
    }
}

pub struct UserGuard {
    user_id: String,
}

impl UserGuard {
    pub fn allow(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn forbid(user_id: impl Into<String>) -> NotGuard<Self> {
        Self::allow(user_id).not()
    }
}

impl Guard for UserGuard {
    fn check(&self, ctx: &GuardContext) -> bool {
        ctx.message().user_id == self.user_id
    }
}

#[cfg(test)]
pub(crate) fn command_message(user_id: &str, text: &str) -> CommandMessage {
    CommandMessage {
        platform: "iirose".into(),
        user_id: user_id.into(),
        username: "Ann".into(),
        channel_id: "lobby".into(),
        text: text.into(),
    }
}

#[test]
fn user_guards() {
    let msg = command_message("42", "iirose.wb.rm");
    let cx = GuardContext::new(&msg);

    assert!(UserGuard::allow("42").check(&cx));
    assert!(!UserGuard::allow("7").check(&cx));
    assert!(!UserGuard::forbid("42").check(&cx));
    assert!(UserGuard::forbid("7").check(&cx));
    assert!(!UserGuard::allow("42").and(UserGuard::forbid("42")).check(&cx));
}
