use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

use super::{organizer, semester};

/// The fixed set of activity categories.
/// Each category has a default training-point value in the registry;
/// strings outside this set are rejected at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ActivityType {
    #[sea_orm(string_value = "Học thuật")]
    HocThuat,
    #[sea_orm(string_value = "Tình nguyện")]
    TinhNguyen,
    #[sea_orm(string_value = "Thể thao")]
    TheThao,
    #[sea_orm(string_value = "Kỹ năng")]
    KyNang,
    #[sea_orm(string_value = "Nghệ thuật")]
    NgheThuat,
    #[sea_orm(string_value = "Hội thảo")]
    HoiThao,
    #[sea_orm(string_value = "Khác")]
    Khac,
}

impl ActivityType {
    /// The category name as shown to clients and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HocThuat => "Học thuật",
            Self::TinhNguyen => "Tình nguyện",
            Self::TheThao => "Thể thao",
            Self::KyNang => "Kỹ năng",
            Self::NgheThuat => "Nghệ thuật",
            Self::HoiThao => "Hội thảo",
            Self::Khac => "Khác",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Học thuật" => Some(Self::HocThuat),
            "Tình nguyện" => Some(Self::TinhNguyen),
            "Thể thao" => Some(Self::TheThao),
            "Kỹ năng" => Some(Self::KyNang),
            "Nghệ thuật" => Some(Self::NgheThuat),
            "Hội thảo" => Some(Self::HoiThao),
            "Khác" => Some(Self::Khac),
            _ => None,
        }
    }
}

/// Lifecycle status of an activity. Transitions are monotonic:
/// `upcoming -> ongoing -> completed`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ActivityStatus {
    #[sea_orm(string_value = "upcoming")]
    Upcoming,
    #[sea_orm(string_value = "ongoing")]
    Ongoing,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    /// Display label shown in client tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upcoming => "Sắp diễn ra",
            Self::Ongoing => "Đang diễn ra",
            Self::Completed => "Đã kết thúc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upcoming" => Some(Self::Upcoming),
            "ongoing" => Some(Self::Ongoing),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// An extracurricular activity students can register for.
/// Owned by an organizer and scoped to a semester.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub semester_id: i32,
    pub organizer_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    /// Window during which students may register.
    pub registration_start: NaiveDateTime,
    pub registration_end: NaiveDateTime,
    /// Window during which the event actually runs.
    pub event_start: NaiveDateTime,
    pub event_end: NaiveDateTime,
    pub location: String,
    /// Maximum number of seats. Always > 0.
    pub capacity: i32,
    /// Points awarded for attendance, defaulted from the type registry
    /// when not supplied at creation.
    pub training_point: i32,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "semester::Entity",
        from = "Column::SemesterId",
        to = "semester::Column::Id",
        on_delete = "Cascade"
    )]
    Semester,
    #[sea_orm(
        belongs_to = "organizer::Entity",
        from = "Column::OrganizerId",
        to = "organizer::Column::Id",
        on_delete = "Cascade"
    )]
    Organizer,
    #[sea_orm(has_many = "super::participation::Entity")]
    Participation,
}

impl Related<semester::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl Related<organizer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::participation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
