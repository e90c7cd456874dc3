use sea_orm::entity::prelude::*;

use super::{activity, student};
use super::activity::ActivityType;

/// Outcome status of a participation.
///
/// Happy path is `pending -> approved -> present`; `pending -> rejected` is
/// the terminal alternative. `present` and `rejected` accept no further
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ParticipationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Present => "present",
            Self::Rejected => "rejected",
        }
    }

    /// Display label shown in client tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Chờ duyệt",
            Self::Approved => "Đã duyệt",
            Self::Present => "Đã tham gia",
            Self::Rejected => "Bị từ chối",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "present" => Some(Self::Present),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Present | Self::Rejected)
    }

    /// Whether a participation in this status holds one of the activity's
    /// seats. A rejected participation frees its seat.
    pub fn occupies_seat(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Join entity recording one student's registration and attendance outcome
/// for one activity. At most one row per (student, activity) pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub activity_id: i32,
    pub status: ParticipationStatus,
    /// Points awarded when the student is marked present. Copied from the
    /// activity at registration; organizers may override on approval.
    pub training_point: i32,
    /// Mirror of the activity's category, denormalized for feed queries.
    pub activity_type: ActivityType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "student::Entity",
        from = "Column::StudentId",
        to = "student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "activity::Entity",
        from = "Column::ActivityId",
        to = "activity::Column::Id",
        on_delete = "Cascade"
    )]
    Activity,
    #[sea_orm(has_many = "super::complaint::Entity")]
    Complaint,
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
