use std::{convert::Infallible, future::Future};

use hashbrown::HashMap;
use tokio::sync::RwLock;

/// Per-user messages that win over the configured lists.
///
/// A cleared override is stored as an empty string, rows are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRecord {
    pub uid: String,
    pub welcome_msg: Option<String>,
    pub leave_msg: Option<String>,
}

impl OverrideRecord {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    /// the welcome override, if one is set and not cleared
    pub fn welcome(&self) -> Option<&str> {
        self.welcome_msg.as_deref().filter(|m| !m.is_empty())
    }

    /// the leave override, if one is set and not cleared
    pub fn leave(&self) -> Option<&str> {
        self.leave_msg.as_deref().filter(|m| !m.is_empty())
    }
}

/// One of the two messages an [OverrideRecord] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideField {
    Welcome,
    Leave,
}

impl OverrideField {
    pub fn slot(self, record: &mut OverrideRecord) -> &mut Option<String> {
        match self {
            Self::Welcome => &mut record.welcome_msg,
            Self::Leave => &mut record.leave_msg,
        }
    }
}

/// Keyed storage for [OverrideRecord]s, writes must be atomic per key
pub trait OverrideStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Option<OverrideRecord>, Self::Error>> + Send;

    fn upsert(&self, record: OverrideRecord) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Writes one field, creating the record if needed. The other field is
    /// left as it is, even when another write to it races this one.
    fn set_field(
        &self,
        uid: &str,
        field: OverrideField,
        text: String,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// In-process store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, OverrideRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl FromIterator<OverrideRecord> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = OverrideRecord>>(iter: T) -> Self {
        Self {
            records: RwLock::new(iter.into_iter().map(|r| (r.uid.clone(), r)).collect()),
        }
    }
}

impl OverrideStore for MemoryStore {
    type Error = Infallible;

    async fn get(&self, uid: &str) -> Result<Option<OverrideRecord>, Self::Error> {
        Ok(self.records.read().await.get(uid).cloned())
    }

    async fn upsert(&self, record: OverrideRecord) -> Result<(), Self::Error> {
        self.records.write().await.insert(record.uid.clone(), record);
        Ok(())
    }

    async fn set_field(
        &self,
        uid: &str,
        field: OverrideField,
        text: String,
    ) -> Result<(), Self::Error> {
        let mut records = self.records.write().await;
        let record = records
            .entry(uid.to_owned())
            .or_insert_with(|| OverrideRecord::new(uid));
        *field.slot(record) = Some(text);
        Ok(())
    }
}

#[test]
fn cleared_overrides_are_absent() {
    let mut record = OverrideRecord::new("42");
    assert_eq!(record.welcome(), None);

    record.welcome_msg = Some("yo(@)".into());
    record.leave_msg = Some(String::new());
    assert_eq!(record.welcome(), Some("yo(@)"));
    assert_eq!(record.leave(), None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_upserts() {
        let store = MemoryStore::new();
        assert!(store.get("1").await.unwrap().is_none());

        let mut record = OverrideRecord::new("1");
        record.welcome_msg = Some("first".into());
        store.upsert(record.clone()).await.unwrap();

        record.welcome_msg = Some("second".into());
        store.upsert(record).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get("1").await.unwrap().unwrap().welcome(),
            Some("second")
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_field_writes_keep_both() {
        let store = std::sync::Arc::new(MemoryStore::new());
        for round in 0..50 {
            let uid = round.to_string();
            let welcome = tokio::spawn({
                let (store, uid) = (store.clone(), uid.clone());
                async move { store.set_field(&uid, OverrideField::Welcome, "hi".into()).await }
            });
            let leave = tokio::spawn({
                let (store, uid) = (store.clone(), uid.clone());
                async move { store.set_field(&uid, OverrideField::Leave, "bye".into()).await }
            });
            welcome.await.unwrap().unwrap();
            leave.await.unwrap().unwrap();

            let record = store.get(&uid).await.unwrap().unwrap();
            assert_eq!(record.welcome(), Some("hi"));
            assert_eq!(record.leave(), Some("bye"));
        }
        assert_eq!(store.len().await, 50);
    }
}
