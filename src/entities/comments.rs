use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unenforced reference: comments survive workout deletion and orphans
    /// are tolerated by the current design, so no schema-level FK here.
    pub workout_id: i32,

    pub coach_id: i32,

    pub content: String,

    /// Creation date, `YYYY-MM-DD`
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
