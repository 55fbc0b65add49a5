/// A user entering or leaving a monitored room
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomEvent {
    pub username: String,
    pub uid: String,
}

/// Generic guild membership change, only handled when `fit` is enabled
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberEvent {
    pub username: String,
    pub user_id: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetingEvent {
    Join(RoomEvent),
    Leave(RoomEvent),
    MemberAdded(MemberEvent),
    MemberRemoved(MemberEvent),
}

