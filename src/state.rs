use futures::{StreamExt, stream::BoxStream};
use mealweek_db::{Gateway, Store};
use mealweek_mealplan::{Planner, WeekPlan, empty_week};
use mealweek_recipe::{Catalog, Recipe, seeded};
use mealweek_shopping::{ShoppingList, derive_shopping_list};
use sqlx::SqlitePool;

use crate::config::Config;

/// Everything the presentation layer talks to. Cheap to clone; clones share the same
/// catalog, plan and store.
///
/// The interactive session is the only writer. Two background tasks follow the store and
/// replace the catalog and the plan wholesale after every committed write.
#[derive(Clone)]
pub struct State {
    pub gateway: Gateway,
    pub catalog: Catalog,
    pub planner: Planner,
}

impl State {
    pub async fn load(config: &Config) -> anyhow::Result<Self> {
        if let Err(err) = config.validate() {
            anyhow::bail!("invalid configuration: {err}");
        }

        let pool =
            crate::db::create_pool(&config.database.url, config.database.max_connections).await?;

        Self::with_pool(pool).await
    }

    /// Migrates `pool`, waits for the first catalog and plan emissions and starts following
    /// the store.
    pub async fn with_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        crate::db::migrate(&pool).await?;

        let gateway = Gateway::new(Store::new(pool));
        let mut recipes = gateway.load_recipes();
        let mut week = gateway.load_week_plan();

        let catalog = Catalog::new(
            gateway.clone(),
            recipes.next().await.unwrap_or_else(seeded),
        );
        let planner = Planner::new(
            gateway.clone(),
            week.next().await.unwrap_or_else(empty_week),
        );

        let count = catalog.len().await;
        tracing::info!(recipes = count, "meal planner loaded");

        tokio::spawn(follow_recipes(recipes, catalog.clone()));
        tokio::spawn(follow_week_plan(week, planner.clone()));

        Ok(Self {
            gateway,
            catalog,
            planner,
        })
    }

    pub async fn shopping_list(&self) -> ShoppingList {
        let week = self.planner.snapshot().await;
        let recipes = self.catalog.all().await;

        derive_shopping_list(&week, &recipes)
    }
}

async fn follow_recipes(mut recipes: BoxStream<'static, Vec<Recipe>>, catalog: Catalog) {
    while let Some(next) = recipes.next().await {
        tracing::debug!(count = next.len(), "catalog reloaded");
        catalog.replace(next).await;
    }
}

async fn follow_week_plan(mut week: BoxStream<'static, WeekPlan>, planner: Planner) {
    while let Some(next) = week.next().await {
        tracing::debug!("week plan reloaded");
        planner.replace(next).await;
    }
}
