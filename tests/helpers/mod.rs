use std::{path::PathBuf, time::Duration};

use mealweek::{Config, State, config::DatabaseConfig, config::ObservabilityConfig};

pub fn test_config(path: PathBuf) -> Config {
    Config {
        database: DatabaseConfig {
            url: format!("sqlite:{}", path.to_str().unwrap()),
            max_connections: 2,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    State::load(&test_config(path)).await
}

/// Polls until `check` holds; subscriptions deliver store changes asynchronously.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    false
}
