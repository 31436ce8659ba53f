use std::sync::Arc;

use mealweek_db::Gateway;
use mealweek_recipe::Catalog;
use mealweek_shared::{
    mealplan::{Day, MealSlot, MealType, WeekPlan},
    recipe::Recipe,
};
use tokio::{sync::RwLock, task::JoinHandle};

/// The week grid. Slot values are plain recipe names and are not checked against the
/// catalog.
#[derive(Clone)]
pub struct Planner {
    week: Arc<RwLock<WeekPlan>>,
    gateway: Gateway,
}

impl Planner {
    pub fn new(gateway: Gateway, week: WeekPlan) -> Self {
        Self {
            week: Arc::new(RwLock::new(week)),
            gateway,
        }
    }

    /// Sets one slot and schedules a full plan save. An empty name clears the slot.
    pub async fn assign_slot(
        &self,
        day: Day,
        meal_type: MealType,
        recipe_name: impl Into<String>,
    ) -> JoinHandle<()> {
        let slot = MealSlot::recipe(recipe_name);
        tracing::info!(%day, %meal_type, recipe = slot.as_stored(), "slot assigned");

        let snapshot = {
            let mut week = self.week.write().await;
            *week[day.index()].slot_mut(meal_type) = slot;
            week.clone()
        };

        self.gateway.spawn_save_week_plan(snapshot)
    }

    /// Unsets all 21 slots with a single save.
    pub async fn clear_week(&self) -> JoinHandle<()> {
        let snapshot = {
            let mut week = self.week.write().await;
            week.iter_mut().for_each(|day| day.clear());
            week.clone()
        };

        tracing::info!("week cleared");

        self.gateway.spawn_save_week_plan(snapshot)
    }

    pub async fn snapshot(&self) -> WeekPlan {
        self.week.read().await.clone()
    }

    pub async fn slot(&self, day: Day, meal_type: MealType) -> MealSlot {
        self.week.read().await[day.index()].slot(meal_type).clone()
    }

    /// Recipe selected in a slot, `None` when unset or when the name is not in the catalog.
    pub async fn resolve(
        &self,
        day: Day,
        meal_type: MealType,
        catalog: &Catalog,
    ) -> Option<Recipe> {
        let slot = self.slot(day, meal_type).await;
        catalog.find_by_name(slot.recipe_name()?).await
    }

    /// Swaps in a plan delivered by the store.
    pub async fn replace(&self, week: WeekPlan) {
        *self.week.write().await = week;
    }
}
