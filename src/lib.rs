pub mod config;
pub mod db;
pub mod observability;
mod state;

pub use config::Config;
pub use state::State;

pub use mealweek_db::{Gateway, Store};
pub use mealweek_mealplan::{Day, DayPlan, MealSlot, MealType, Planner, WeekPlan};
pub use mealweek_recipe::{AddRecipeInput, Catalog, Recipe};
pub use mealweek_shared::{Error, Result};
pub use mealweek_shopping::{ShoppingList, derive_shopping_list};
