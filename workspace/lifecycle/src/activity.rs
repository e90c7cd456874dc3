//! Activity creation and lifecycle operations.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{info, instrument};

use model::entities::activity::{self, ActivityStatus, ActivityType};
use model::entities::prelude::{Activity, Organizer, Semester};

use crate::error::{DomainError, Result};
use crate::registry::ActivityTypeRegistry;
use crate::rules;

/// Input for creating an activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub semester_id: i32,
    pub organizer_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub activity_type: ActivityType,
    pub registration_start: NaiveDateTime,
    pub registration_end: NaiveDateTime,
    pub event_start: NaiveDateTime,
    pub event_end: NaiveDateTime,
    pub location: String,
    pub capacity: i32,
    /// Explicit point override; the registry default is used when absent.
    pub training_point: Option<i32>,
    pub image_url: Option<String>,
}

/// Creates an activity after validating capacity, window ordering, and
/// parent references. The initial status is derived from the event window
/// at `now` (defaults to the current time).
#[instrument(skip(db, registry, input), fields(name = %input.name))]
pub async fn create(
    db: &DatabaseConnection,
    registry: &ActivityTypeRegistry,
    input: NewActivity,
    now: Option<NaiveDateTime>,
) -> Result<activity::Model> {
    if input.name.trim().is_empty() {
        return Err(DomainError::Validation("name must not be empty".to_string()));
    }
    if input.capacity <= 0 {
        return Err(DomainError::Validation("capacity must be positive".to_string()));
    }
    rules::validate_activity_windows(
        input.registration_start,
        input.registration_end,
        input.event_start,
        input.event_end,
    )?;

    let training_point = match input.training_point {
        Some(points) if points >= 0 => points,
        Some(_) => {
            return Err(DomainError::Validation(
                "training_point must not be negative".to_string(),
            ))
        }
        None => registry.points_for(input.activity_type),
    };

    Semester::find_by_id(input.semester_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("semester"))?;
    Organizer::find_by_id(input.organizer_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("organizer"))?;

    let now = now.unwrap_or_else(|| Utc::now().naive_utc());
    let status = rules::activity_status_at(now, input.event_start, input.event_end);

    let created = activity::ActiveModel {
        semester_id: Set(input.semester_id),
        organizer_id: Set(input.organizer_id),
        name: Set(input.name),
        description: Set(input.description),
        activity_type: Set(input.activity_type),
        status: Set(status),
        registration_start: Set(input.registration_start),
        registration_end: Set(input.registration_end),
        event_start: Set(input.event_start),
        event_end: Set(input.event_end),
        location: Set(input.location),
        capacity: Set(input.capacity),
        training_point: Set(training_point),
        image_url: Set(input.image_url),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        activity_id = created.id,
        training_point, "Activity created"
    );
    Ok(created)
}

/// Moves an activity to a later lifecycle status. Reverse moves and
/// self-transitions fail with `InvalidTransition`; nothing is written in
/// that case.
#[instrument(skip(db))]
pub async fn transition(
    db: &DatabaseConnection,
    activity_id: i32,
    to: ActivityStatus,
) -> Result<activity::Model> {
    let txn = db.begin().await?;

    let current = Activity::find_by_id(activity_id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound("activity"))?;

    rules::validate_activity_transition(current.status, to)?;

    let mut active: activity::ActiveModel = current.into();
    active.status = Set(to);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    info!(activity_id, status = to.as_str(), "Activity status updated");
    Ok(updated)
}
