use std::collections::HashSet;

use mealweek_shared::{mealplan::WeekPlan, recipe::Recipe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoppingList {
    /// No slot of the week points at a recipe in the catalog.
    NoMealsSelected,
    /// Ingredients of every selected recipe, first occurrence order. Can be empty when the
    /// selected recipes list no ingredients.
    Items(Vec<String>),
}

impl ShoppingList {
    pub fn items(&self) -> &[String] {
        match self {
            Self::NoMealsSelected => &[],
            Self::Items(items) => items,
        }
    }

    pub fn is_no_meals_selected(&self) -> bool {
        matches!(self, Self::NoMealsSelected)
    }
}

/// Walks the 21 slots day by day, breakfast to dinner. Unset slots and names missing from
/// `recipes` contribute nothing.
pub fn derive_shopping_list(week: &WeekPlan, recipes: &[Recipe]) -> ShoppingList {
    let mut seen = HashSet::new();
    let mut items = vec![];
    let mut resolved = false;

    let selected = week
        .iter()
        .flat_map(|day| day.slots())
        .filter_map(|slot| slot.recipe_name())
        .filter_map(|name| recipes.iter().find(|r| r.name == name));

    for recipe in selected {
        resolved = true;

        for ingredient in &recipe.ingredients {
            if seen.insert(ingredient.as_str()) {
                items.push(ingredient.to_owned());
            }
        }
    }

    if !resolved {
        return ShoppingList::NoMealsSelected;
    }

    ShoppingList::Items(items)
}
