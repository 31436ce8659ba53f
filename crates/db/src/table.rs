use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Preference {
    Table,
    Key,
    Value,
}
