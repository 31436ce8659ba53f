use std::sync::Arc;

use mealweek_db::Gateway;
use mealweek_shared::recipe::Recipe;
use serde::Deserialize;
use tokio::{sync::RwLock, task::JoinHandle};
use validator::Validate;

/// Raw form values for a new recipe; numbers and lists arrive as text.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddRecipeInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: String,
    pub calories: String,
    pub ingredients: String,
}

impl AddRecipeInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        calories: impl Into<String>,
        ingredients: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            calories: calories.into(),
            ingredients: ingredients.into(),
        }
    }

    fn into_recipe(self) -> Recipe {
        Recipe {
            calories: parse_calories(&self.calories),
            ingredients: parse_ingredients(&self.ingredients),
            name: self.name,
            description: self.description,
        }
    }
}

fn validate_not_blank(name: &str) -> Result<(), validator::ValidationError> {
    if !name.trim().is_empty() {
        return Ok(());
    }

    let mut error = validator::ValidationError::new("blank");
    error.message = Some(std::borrow::Cow::from("Meal name is required"));
    Err(error)
}

/// Anything that is not a non-negative integer counts as 0.
pub fn parse_calories(value: &str) -> u32 {
    value.trim().parse().unwrap_or_default()
}

/// Comma separated, trimmed, empty entries dropped, order kept.
pub fn parse_ingredients(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(str::to_owned)
        .collect()
}

/// In-memory recipe catalog. Every mutation rewrites the whole `recipes` entry in the
/// background.
#[derive(Clone)]
pub struct Catalog {
    recipes: Arc<RwLock<Vec<Recipe>>>,
    gateway: Gateway,
}

impl Catalog {
    pub fn new(gateway: Gateway, recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Arc::new(RwLock::new(recipes)),
            gateway,
        }
    }

    /// Appends a recipe and schedules a save. The returned handle does not need to be
    /// awaited.
    pub async fn add_recipe(
        &self,
        input: AddRecipeInput,
    ) -> mealweek_shared::Result<JoinHandle<()>> {
        input.validate()?;

        let recipe = input.into_recipe();
        tracing::info!(name = %recipe.name, calories = recipe.calories, "recipe added");

        let snapshot = {
            let mut recipes = self.recipes.write().await;
            recipes.push(recipe);
            recipes.clone()
        };

        Ok(self.gateway.spawn_save_recipes(snapshot))
    }

    /// First recipe with exactly this name.
    pub async fn find_by_name(&self, name: &str) -> Option<Recipe> {
        self.recipes
            .read()
            .await
            .iter()
            .find(|r| r.name == name)
            .cloned()
    }

    pub async fn all(&self) -> Vec<Recipe> {
        self.recipes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }

    /// Swaps in a catalog delivered by the store.
    pub async fn replace(&self, recipes: Vec<Recipe>) {
        *self.recipes.write().await = recipes;
    }
}
