//! Registration and participation lifecycle operations.
//!
//! Both operations run inside one transaction so the seat count, the
//! duplicate check, and the row mutation commit together or not at all.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::{info, instrument, warn};

use model::entities::participation::{self, ParticipationStatus};
use model::entities::prelude::{Activity, Participation, Student};

use crate::error::{DomainError, Result};
use crate::rules;

/// Registers a student for an activity.
///
/// Fails with `DuplicateParticipation` when the pair already has a row, and
/// with `CapacityExceeded` when every seat is held by a non-rejected
/// participation. The new row starts `pending` and copies the activity's
/// training point and category.
#[instrument(skip(db))]
pub async fn register(
    db: &DatabaseConnection,
    student_id: i32,
    activity_id: i32,
) -> Result<participation::Model> {
    let txn = db.begin().await?;

    let student = Student::find_by_id(student_id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound("student"))?;
    let activity = Activity::find_by_id(activity_id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound("activity"))?;

    let existing = Participation::find()
        .filter(participation::Column::StudentId.eq(student.id))
        .filter(participation::Column::ActivityId.eq(activity.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        warn!(student_id, activity_id, "Duplicate registration attempt");
        return Err(DomainError::DuplicateParticipation);
    }

    let occupied = Participation::find()
        .filter(participation::Column::ActivityId.eq(activity.id))
        .filter(participation::Column::Status.ne(ParticipationStatus::Rejected))
        .count(&txn)
        .await?;
    if occupied >= activity.capacity as u64 {
        warn!(
            student_id,
            activity_id,
            capacity = activity.capacity,
            "Registration rejected, activity is full"
        );
        return Err(DomainError::CapacityExceeded {
            capacity: activity.capacity,
        });
    }

    let created = participation::ActiveModel {
        student_id: Set(student.id),
        activity_id: Set(activity.id),
        status: Set(ParticipationStatus::Pending),
        training_point: Set(activity.training_point),
        activity_type: Set(activity.activity_type),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        participation_id = created.id,
        student_id, activity_id, "Student registered"
    );
    Ok(created)
}

/// Moves a participation along its state machine.
///
/// `pending -> approved -> present`, or `pending -> rejected`; anything else
/// fails with `InvalidTransition`. A training-point override is accepted
/// only when approving.
#[instrument(skip(db))]
pub async fn transition(
    db: &DatabaseConnection,
    participation_id: i32,
    to: ParticipationStatus,
    point_override: Option<i32>,
) -> Result<participation::Model> {
    let txn = db.begin().await?;

    let current = Participation::find_by_id(participation_id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound("participation"))?;

    rules::validate_participation_transition(current.status, to)?;

    if let Some(points) = point_override {
        if to != ParticipationStatus::Approved {
            return Err(DomainError::Validation(
                "training point can only be overridden when approving".to_string(),
            ));
        }
        if points < 0 {
            return Err(DomainError::Validation(
                "training_point must not be negative".to_string(),
            ));
        }
    }

    let mut active: participation::ActiveModel = current.into();
    active.status = Set(to);
    if let Some(points) = point_override {
        active.training_point = Set(points);
    }
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    info!(
        participation_id,
        status = to.as_str(),
        "Participation status updated"
    );
    Ok(updated)
}
