use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "workouts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owner reference, enforced by the handlers rather than the schema.
    pub user_id: i32,

    /// ISO-8601 calendar date, `YYYY-MM-DD`
    pub date: String,

    pub exercise: String,

    pub sets: i32,

    pub reps: i32,

    pub weight: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
