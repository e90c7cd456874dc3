use sea_orm::entity::prelude::*;

use super::participation;

/// Status of a complaint. `open -> resolved` once an organizer responds;
/// there is no reopening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "resolved")]
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Chờ xử lý",
            Self::Resolved => "Đã giải quyết",
        }
    }
}

/// A student's dispute over a participation outcome.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub participation_id: i32,
    pub description: String,
    pub status: ComplaintStatus,
    /// Organizer response, set exactly when the complaint is resolved.
    pub response: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "participation::Entity",
        from = "Column::ParticipationId",
        to = "participation::Column::Id",
        on_delete = "Cascade"
    )]
    Participation,
}

impl Related<participation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
