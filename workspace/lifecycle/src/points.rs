//! Training-point computation and the legacy student activity feed.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::instrument;

use common::{StudentActivityFeed, StudentActivityRow, TrainingPointSummary};
use model::entities::participation::{self, ParticipationStatus};
use model::entities::prelude::{Activity, Participation, Student};
use model::entities::activity;

use crate::error::{DomainError, Result};

/// Computes a student's cumulative training points.
///
/// Only `present` participations carry credit; everything else is excluded
/// regardless of its training_point value.
#[instrument(skip(db))]
pub async fn training_point_summary(
    db: &DatabaseConnection,
    student_id: i32,
) -> Result<TrainingPointSummary> {
    Student::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("student"))?;

    let rows = Participation::find()
        .filter(participation::Column::StudentId.eq(student_id))
        .filter(participation::Column::Status.eq(ParticipationStatus::Present))
        .all(db)
        .await?;

    let total = rows.iter().map(|p| p.training_point).sum();

    Ok(TrainingPointSummary {
        student_id,
        total,
        present_count: rows.len() as u64,
    })
}

/// Builds the legacy feed for one student: participations joined with their
/// activities, ordered by event start. With `all_status` false, rejected
/// rows are filtered out.
#[instrument(skip(db))]
pub async fn student_feed(
    db: &DatabaseConnection,
    student_id: i32,
    all_status: bool,
) -> Result<StudentActivityFeed> {
    Student::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("student"))?;

    let mut query = Participation::find()
        .find_also_related(Activity)
        .filter(participation::Column::StudentId.eq(student_id));
    if !all_status {
        query = query.filter(participation::Column::Status.ne(ParticipationStatus::Rejected));
    }

    let rows = query
        .order_by_asc(activity::Column::EventStart)
        .all(db)
        .await?;

    let activities = rows
        .into_iter()
        .filter_map(|(part, act)| {
            act.map(|act| StudentActivityRow {
                activity_id: act.id,
                participation_id: part.id,
                name: act.name,
                activity_type: part.activity_type.as_str().to_string(),
                training_point: part.training_point,
                event_start: act.event_start,
                location: act.location,
                participation_status: part.status.as_str().to_string(),
                status_label: part.status.label().to_string(),
            })
        })
        .collect();

    Ok(StudentActivityFeed { activities })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participation::{register, transition};
    use crate::testing::{seed_activity, seed_organizer, seed_semester, seed_student, setup_db};
    use model::entities::activity::ActivityType;

    #[tokio::test]
    async fn test_only_present_participations_count() {
        let db = setup_db().await.unwrap();
        let semester = seed_semester(&db, "HK1 2025-2026").await.unwrap();
        let organizer = seed_organizer(&db, "doantruong").await.unwrap();
        let student = seed_student(&db, "sv001", "B21DCCN001").await.unwrap();

        let attended = seed_activity(
            &db,
            semester.id,
            organizer.id,
            "Hiến máu nhân đạo",
            ActivityType::TinhNguyen,
            30,
            15,
        )
        .await.unwrap();
        let approved_only = seed_activity(
            &db,
            semester.id,
            organizer.id,
            "Hội thảo hướng nghiệp",
            ActivityType::HoiThao,
            100,
            5,
        )
        .await.unwrap();
        let rejected = seed_activity(
            &db,
            semester.id,
            organizer.id,
            "Giải bóng đá sinh viên",
            ActivityType::TheThao,
            50,
            7,
        )
        .await.unwrap();

        // attended: pending -> approved -> present
        let p1 = register(&db, student.id, attended.id).await.unwrap();
        transition(&db, p1.id, ParticipationStatus::Approved, None).await.unwrap();
        transition(&db, p1.id, ParticipationStatus::Present, None).await.unwrap();

        // approved but never marked present
        let p2 = register(&db, student.id, approved_only.id).await.unwrap();
        transition(&db, p2.id, ParticipationStatus::Approved, None).await.unwrap();

        // rejected outright
        let p3 = register(&db, student.id, rejected.id).await.unwrap();
        transition(&db, p3.id, ParticipationStatus::Rejected, None).await.unwrap();

        let summary = training_point_summary(&db, student.id).await.unwrap();
        assert_eq!(summary.total, 15);
        assert_eq!(summary.present_count, 1);
    }

    #[tokio::test]
    async fn test_summary_for_unknown_student() {
        let db = setup_db().await.unwrap();

        let err = training_point_summary(&db, 42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound("student")));
    }

    #[tokio::test]
    async fn test_feed_rows_and_all_status_filter() {
        let db = setup_db().await.unwrap();
        let semester = seed_semester(&db, "HK1 2025-2026").await.unwrap();
        let organizer = seed_organizer(&db, "doantruong").await.unwrap();
        let student = seed_student(&db, "sv001", "B21DCCN001").await.unwrap();

        let kept = seed_activity(
            &db,
            semester.id,
            organizer.id,
            "Workshop kỹ năng mềm",
            ActivityType::KyNang,
            40,
            10,
        )
        .await.unwrap();
        let refused = seed_activity(
            &db,
            semester.id,
            organizer.id,
            "Đêm nhạc gây quỹ",
            ActivityType::NgheThuat,
            40,
            7,
        )
        .await.unwrap();

        let p1 = register(&db, student.id, kept.id).await.unwrap();
        let p2 = register(&db, student.id, refused.id).await.unwrap();
        transition(&db, p2.id, ParticipationStatus::Rejected, None).await.unwrap();

        let full = student_feed(&db, student.id, true).await.unwrap();
        assert_eq!(full.activities.len(), 2);

        let row = full
            .activities
            .iter()
            .find(|r| r.participation_id == p1.id)
            .unwrap();
        assert_eq!(row.activity_id, kept.id);
        assert_eq!(row.activity_type, "Kỹ năng");
        assert_eq!(row.training_point, 10);
        assert_eq!(row.location, "Hội trường A");
        assert_eq!(row.participation_status, "pending");
        assert_eq!(row.status_label, "Chờ duyệt");

        // default view hides rejected rows
        let filtered = student_feed(&db, student.id, false).await.unwrap();
        assert_eq!(filtered.activities.len(), 1);
        assert_eq!(filtered.activities[0].participation_id, p1.id);
    }

    #[tokio::test]
    async fn test_feed_labels_follow_status() {
        let db = setup_db().await.unwrap();
        let semester = seed_semester(&db, "HK1 2025-2026").await.unwrap();
        let organizer = seed_organizer(&db, "doantruong").await.unwrap();
        let student = seed_student(&db, "sv001", "B21DCCN001").await.unwrap();
        let act = seed_activity(
            &db,
            semester.id,
            organizer.id,
            "Cuộc thi lập trình",
            ActivityType::HocThuat,
            100,
            10,
        )
        .await.unwrap();

        let part = register(&db, student.id, act.id).await.unwrap();
        transition(&db, part.id, ParticipationStatus::Approved, None).await.unwrap();

        let feed = student_feed(&db, student.id, true).await.unwrap();
        assert_eq!(feed.activities[0].participation_status, "approved");
        assert_eq!(feed.activities[0].status_label, "Đã duyệt");

        transition(&db, part.id, ParticipationStatus::Present, None).await.unwrap();
        let feed = student_feed(&db, student.id, true).await.unwrap();
        assert_eq!(feed.activities[0].status_label, "Đã tham gia");
    }
}
