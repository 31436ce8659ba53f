mod preference;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealweek",
    "m0001",
    vec_box![],
    vec_box![preference::CreateTable]
);
