use sqlx_migrator::{Info, Migrator};

mod gateway;
mod m0001;
mod store;
pub mod table;

pub use gateway::*;
pub use store::*;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}
