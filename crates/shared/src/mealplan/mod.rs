use strum::{Display, EnumString};

/// Stored value of a slot that holds no recipe.
pub const UNSET: &str = "None";

#[derive(EnumString, Display, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(EnumString, Display, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];
}

/// Name-based reference to a recipe. The name is not checked against the catalog, so a slot
/// can outlive the recipe it points to.
#[derive(Default, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MealSlot {
    #[default]
    Unset,
    Recipe(String),
}

impl MealSlot {
    /// An empty name never produces a `Recipe` slot.
    pub fn recipe(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            return Self::Unset;
        }

        Self::Recipe(name)
    }

    /// Decodes a stored field; missing, empty and `"None"` all mean unset.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(UNSET) => Self::Unset,
            Some(name) => Self::Recipe(name.to_owned()),
        }
    }

    pub fn as_stored(&self) -> &str {
        match self {
            Self::Unset => UNSET,
            Self::Recipe(name) => name,
        }
    }

    pub fn recipe_name(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Recipe(name) => Some(name),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayPlan {
    pub day: Day,
    pub breakfast: MealSlot,
    pub lunch: MealSlot,
    pub dinner: MealSlot,
}

impl DayPlan {
    pub fn new(day: Day) -> Self {
        Self {
            day,
            breakfast: MealSlot::Unset,
            lunch: MealSlot::Unset,
            dinner: MealSlot::Unset,
        }
    }

    pub fn slot(&self, meal_type: MealType) -> &MealSlot {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }

    pub fn slot_mut(&mut self, meal_type: MealType) -> &mut MealSlot {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    /// Slots in breakfast, lunch, dinner order.
    pub fn slots(&self) -> [&MealSlot; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    pub fn clear(&mut self) {
        for meal_type in MealType::ALL {
            *self.slot_mut(meal_type) = MealSlot::Unset;
        }
    }
}

/// Seven days, Monday first. The array type keeps the size fixed.
pub type WeekPlan = [DayPlan; 7];

pub fn empty_week() -> WeekPlan {
    Day::ALL.map(DayPlan::new)
}
