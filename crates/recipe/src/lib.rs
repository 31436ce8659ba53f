mod command;

pub use command::*;
pub use mealweek_shared::recipe::{Recipe, seeded};
