use std::path::Path;

use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use welcome_core::{OverrideField, OverrideRecord, OverrideStore};

#[derive(Debug, Clone, FromRow)]
struct OverrideRow {
    uid: String,
    welcome_msg: Option<String>,
    leave_msg: Option<String>,
}

impl From<OverrideRow> for OverrideRecord {
    fn from(row: OverrideRow) -> Self {
        Self {
            uid: row.uid,
            welcome_msg: row.welcome_msg,
            leave_msg: row.leave_msg,
        }
    }
}

/// Overrides persisted in the `greeting_overrides` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// opens (or creates) the database file and runs pending migrations
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

impl OverrideStore for SqliteStore {
    type Error = sqlx::Error;

    async fn get(&self, uid: &str) -> Result<Option<OverrideRecord>, Self::Error> {
        sqlx::query_as::<_, OverrideRow>(
            "
            SELECT
                uid,
                welcome_msg,
                leave_msg
            FROM greeting_overrides
            WHERE uid = ?1;
            ",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map(|o| o.map(OverrideRecord::from))
    }

    async fn upsert(&self, record: OverrideRecord) -> Result<(), Self::Error> {
        sqlx::query(
            "
            INSERT INTO greeting_overrides (
                uid,
                welcome_msg,
                leave_msg
            )
            VALUES
            (?1, ?2, ?3)
            ON CONFLICT(uid) DO UPDATE SET
            welcome_msg = excluded.welcome_msg,
            leave_msg = excluded.leave_msg
            ",
        )
        .bind(record.uid)
        .bind(record.welcome_msg)
        .bind(record.leave_msg)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_field(
        &self,
        uid: &str,
        field: OverrideField,
        text: String,
    ) -> Result<(), Self::Error> {
        // only the target column is written on conflict
        let query = match field {
            OverrideField::Welcome => {
                "
                INSERT INTO greeting_overrides (uid, welcome_msg)
                VALUES (?1, ?2)
                ON CONFLICT(uid) DO UPDATE SET
                welcome_msg = excluded.welcome_msg
                "
            }
            OverrideField::Leave => {
                "
                INSERT INTO greeting_overrides (uid, leave_msg)
                VALUES (?1, ?2)
                ON CONFLICT(uid) DO UPDATE SET
                leave_msg = excluded.leave_msg
                "
            }
        };
        sqlx::query(query)
            .bind(uid)
            .bind(text)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn memory_store() -> SqliteStore {
    // every connection to :memory: is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    SqliteStore::from_pool(pool).await.unwrap()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;
    use welcome_core::{Delivery, Greeter, GreetingConfig, Invocation};

    use super::*;

    #[tokio::test]
    async fn upsert_keeps_one_row_per_user() {
        let store = memory_store().await;
        assert_eq!(store.get("42").await.unwrap(), None);

        let mut record = OverrideRecord::new("42");
        record.welcome_msg = Some("yo(@)".into());
        store.upsert(record.clone()).await.unwrap();
        assert_eq!(store.get("42").await.unwrap(), Some(record.clone()));

        record.leave_msg = Some("cya".into());
        record.welcome_msg = Some(String::new());
        store.upsert(record.clone()).await.unwrap();
        assert_eq!(store.get("42").await.unwrap(), Some(record));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM greeting_overrides")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn set_field_leaves_the_other_column() {
        let store = memory_store().await;
        store
            .set_field("42", OverrideField::Leave, "cya".into())
            .await
            .unwrap();
        store
            .set_field("42", OverrideField::Welcome, "yo(@)".into())
            .await
            .unwrap();
        store
            .set_field("42", OverrideField::Welcome, String::new())
            .await
            .unwrap();

        let record = store.get("42").await.unwrap().unwrap();
        assert_eq!(record.welcome_msg.as_deref(), Some(""));
        assert_eq!(record.leave(), Some("cya"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sets_keep_both_overrides() {
        let (tx, _rx) = mpsc::channel::<Delivery>(1);
        let greeter = Arc::new(Greeter::new(
            GreetingConfig::default(),
            "bot",
            memory_store().await,
            tx,
        ));

        for round in 0..50 {
            let ann = Invocation {
                platform: "iirose".into(),
                user_id: round.to_string(),
                username: "Ann".into(),
            };
            let welcome = tokio::spawn({
                let (greeter, ann) = (greeter.clone(), ann.clone());
                async move { greeter.set_welcome_override(&ann, Some("hello")).await }
            });
            let leave = tokio::spawn({
                let (greeter, ann) = (greeter.clone(), ann.clone());
                async move { greeter.set_exit_override(&ann, Some("bye")).await }
            });
            welcome.await.unwrap().unwrap();
            leave.await.unwrap().unwrap();

            let record = greeter.store().get(&ann.user_id).await.unwrap().unwrap();
            assert_eq!(record.welcome(), Some("hello"));
            assert_eq!(record.leave(), Some("bye"));
        }
    }
}
