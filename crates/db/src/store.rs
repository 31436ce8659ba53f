use std::sync::Arc;

use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::table::Preference;

/// String-keyed text entries backed by the `preference` table.
///
/// Every committed write bumps a revision counter; subscribers are woken with the new
/// revision and re-read whatever keys they care about.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    revision: Arc<watch::Sender<u64>>,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            pool,
            revision: Arc::new(revision),
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        let statement = Query::select()
            .column(Preference::Value)
            .from(Preference::Table)
            .and_where(Expr::col(Preference::Key).eq(key))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Overwrites the entry in full. Concurrent writers to the same key race and the last
    /// committed write wins.
    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), sqlx::Error> {
        let value: String = value.into();
        let statement = Query::insert()
            .into_table(Preference::Table)
            .columns([Preference::Key, Preference::Value])
            .values_panic([key.to_owned().into(), value.into()])
            .on_conflict(
                OnConflict::column(Preference::Key)
                    .update_column(Preference::Value)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
        tracing::debug!(key, "store entry written");

        Ok(())
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
