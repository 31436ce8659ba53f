use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A recipe as stored under the `recipes` key.
///
/// Recipes are never edited in place; the catalog only appends or is replaced wholesale.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_calories")]
    pub calories: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        calories: u32,
        ingredients: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            calories,
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }

    /// Ingredients joined for a one-line detail view.
    pub fn ingredients_summary(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Reads whatever a stored `calories` field holds without rejecting the record. Negative,
/// non-numeric and null values become 0; fractions are truncated; large values saturate.
fn lenient_calories<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let calories = match Value::deserialize(deserializer)? {
        Value::Number(number) => match number.as_u64() {
            Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
            None => number.as_f64().map(|value| value as u32).unwrap_or_default(),
        },
        Value::String(text) => text.trim().parse().unwrap_or_default(),
        _ => 0,
    };

    Ok(calories)
}

/// Built-in recipes used whenever no catalog has been persisted yet.
pub fn seeded() -> Vec<Recipe> {
    vec![
        Recipe::new(
            "Pancakes",
            "Fluffy pancakes with syrup and butter",
            350,
            ["Flour", "Eggs", "Milk", "Butter", "Syrup"],
        ),
        Recipe::new(
            "Caesar Salad",
            "Crisp romaine lettuce with Caesar dressing",
            250,
            [
                "Romaine Lettuce",
                "Caesar Dressing",
                "Croutons",
                "Parmesan Cheese",
            ],
        ),
        Recipe::new(
            "Spaghetti Bolognese",
            "Spaghetti with tomato meat sauce",
            500,
            ["Spaghetti", "Ground Beef", "Tomato Sauce", "Onion", "Garlic"],
        ),
    ]
}
