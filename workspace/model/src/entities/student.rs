use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use super::user;

/// Student profile, a specialization of a user account.
/// Holds the demographic fields shown on the student dashboard.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// University-issued student code, e.g. "B21DCCN123".
    #[sea_orm(unique)]
    pub student_code: String,
    /// The user account this profile belongs to.
    #[sea_orm(unique)]
    pub user_id: i32,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Academic year label, e.g. "2023-2024".
    pub academic_year: Option<String>,
    pub faculty: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::participation::Entity")]
    Participation,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::participation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
