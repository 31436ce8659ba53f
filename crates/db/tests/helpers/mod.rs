use std::{path::PathBuf, str::FromStr};

use mealweek_db::{Gateway, Store};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub pool: SqlitePool,
    pub gateway: Gateway,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealweek_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        gateway: Gateway::new(Store::new(pool.clone())),
        pool,
    })
}
