//! Shared fixtures for the database-backed tests in this crate.

use chrono::{NaiveDate, NaiveDateTime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use model::entities::activity::{ActivityStatus, ActivityType};
use model::entities::user::UserRole;
use model::entities::{activity, organizer, semester, student, user};

pub async fn setup_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

pub fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

pub async fn seed_student(
    db: &DatabaseConnection,
    username: &str,
    code: &str,
) -> Result<student::Model, DbErr> {
    let account = user::ActiveModel {
        username: Set(username.to_string()),
        display_name: Set(format!("Sinh viên {username}")),
        role: Set(UserRole::Student),
        phone: Set(None),
        email: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    student::ActiveModel {
        student_code: Set(code.to_string()),
        user_id: Set(account.id),
        sex: Set(None),
        date_of_birth: Set(None),
        academic_year: Set(Some("2023-2024".to_string())),
        faculty: Set(Some("Công nghệ thông tin".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn seed_organizer(
    db: &DatabaseConnection,
    username: &str,
) -> Result<organizer::Model, DbErr> {
    let account = user::ActiveModel {
        username: Set(username.to_string()),
        display_name: Set(format!("Ban tổ chức {username}")),
        role: Set(UserRole::Organizer),
        phone: Set(None),
        email: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    organizer::ActiveModel {
        user_id: Set(account.id),
        department: Set("Phòng Công tác sinh viên".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn seed_semester(db: &DatabaseConnection, name: &str) -> Result<semester::Model, DbErr> {
    semester::ActiveModel {
        name: Set(name.to_string()),
        start_date: Set(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn seed_activity(
    db: &DatabaseConnection,
    semester_id: i32,
    organizer_id: i32,
    name: &str,
    ty: ActivityType,
    capacity: i32,
    training_point: i32,
) -> Result<activity::Model, DbErr> {
    activity::ActiveModel {
        semester_id: Set(semester_id),
        organizer_id: Set(organizer_id),
        name: Set(name.to_string()),
        description: Set(None),
        activity_type: Set(ty),
        status: Set(ActivityStatus::Upcoming),
        registration_start: Set(dt(2025, 9, 5, 8)),
        registration_end: Set(dt(2025, 9, 20, 17)),
        event_start: Set(dt(2025, 9, 25, 7)),
        event_end: Set(dt(2025, 9, 25, 17)),
        location: Set("Hội trường A".to_string()),
        capacity: Set(capacity),
        training_point: Set(training_point),
        image_url: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
