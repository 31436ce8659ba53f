mod command;

pub use command::*;
pub use mealweek_shared::mealplan::{
    Day, DayPlan, MealSlot, MealType, UNSET, WeekPlan, empty_week,
};
