//! Complaint operations: students dispute a participation outcome, an
//! organizer closes the dispute with a response.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{info, instrument};

use model::entities::complaint::{self, ComplaintStatus};
use model::entities::prelude::{Complaint, Participation};

use crate::error::{DomainError, Result};
use crate::rules;

/// Opens a complaint against a participation.
#[instrument(skip(db, description))]
pub async fn open(
    db: &DatabaseConnection,
    participation_id: i32,
    description: String,
) -> Result<complaint::Model> {
    if description.trim().is_empty() {
        return Err(DomainError::Validation(
            "description must not be empty".to_string(),
        ));
    }

    Participation::find_by_id(participation_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("participation"))?;

    let created = complaint::ActiveModel {
        participation_id: Set(participation_id),
        description: Set(description),
        status: Set(ComplaintStatus::Open),
        response: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(complaint_id = created.id, participation_id, "Complaint opened");
    Ok(created)
}

/// Resolves an open complaint with the organizer's response. Resolved
/// complaints never reopen; resolving twice fails with `InvalidTransition`.
#[instrument(skip(db, response))]
pub async fn resolve(
    db: &DatabaseConnection,
    complaint_id: i32,
    response: String,
) -> Result<complaint::Model> {
    let txn = db.begin().await?;

    let current = Complaint::find_by_id(complaint_id)
        .one(&txn)
        .await?
        .ok_or(DomainError::NotFound("complaint"))?;

    rules::validate_complaint_resolution(current.status, &response)?;

    let mut active: complaint::ActiveModel = current.into();
    active.status = Set(ComplaintStatus::Resolved);
    active.response = Set(Some(response));
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    info!(complaint_id, "Complaint resolved");
    Ok(updated)
}
