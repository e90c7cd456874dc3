use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use lifecycle::DomainError;
use model::entities::participation::{self, ParticipationStatus};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for registering a student for an activity
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateParticipationRequest {
    /// Student profile ID
    pub student_id: i32,
    /// Activity to register for
    pub activity_id: i32,
}

/// Request body for moving a participation along its state machine
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransitionParticipationRequest {
    /// Target status: "approved", "present", or "rejected"
    pub status: String,
    /// Optional training-point override, accepted only when approving
    pub training_point: Option<i32>,
}

/// Participation response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParticipationResponse {
    pub id: i32,
    pub student_id: i32,
    pub activity_id: i32,
    pub status: String,
    /// Vietnamese display label for the status
    pub status_label: String,
    pub training_point: i32,
    #[serde(rename = "type")]
    pub activity_type: String,
}

impl From<participation::Model> for ParticipationResponse {
    fn from(model: participation::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            activity_id: model.activity_id,
            status: model.status.as_str().to_string(),
            status_label: model.status.label().to_string(),
            training_point: model.training_point,
            activity_type: model.activity_type.as_str().to_string(),
        }
    }
}

/// Query parameters for listing participations
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ParticipationQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// Filter by activity
    pub activity_id: Option<i32>,
    /// Filter by student
    pub student_id: Option<i32>,
    /// Filter by status
    pub status: Option<String>,
}

/// Register a student for an activity
///
/// The duplicate check, the seat count, and the insert commit in one
/// transaction; a full activity yields CAPACITY_EXCEEDED and a repeated
/// registration DUPLICATE_PARTICIPATION.
#[utoipa::path(
    post,
    path = "/api/v1/participations",
    tag = "participations",
    request_body = CreateParticipationRequest,
    responses(
        (status = 201, description = "Registration created successfully", body = ApiResponse<ParticipationResponse>),
        (status = 404, description = "Student or activity not found", body = ErrorResponse),
        (status = 409, description = "Duplicate registration or activity full", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_participation(
    State(state): State<AppState>,
    Json(request): Json<CreateParticipationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ParticipationResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_participation function");
    debug!(
        "Registering student {} for activity {}",
        request.student_id, request.activity_id
    );

    let created = lifecycle::participation::register(&state.db, request.student_id, request.activity_id)
        .await
        .map_err(domain_error_response)?;

    info!(
        "Participation {} created for student {} on activity {}",
        created.id, created.student_id, created.activity_id
    );
    let response = ApiResponse {
        data: ParticipationResponse::from(created),
        message: "Registration created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get participations with optional filters and pagination
#[utoipa::path(
    get,
    path = "/api/v1/participations",
    tag = "participations",
    params(ParticipationQuery),
    responses(
        (status = 200, description = "Participations retrieved successfully", body = ApiResponse<Vec<ParticipationResponse>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_participations(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ParticipationQuery>>,
) -> Result<Json<ApiResponse<Vec<ParticipationResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_participations function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);

    let mut find = participation::Entity::find();

    if let Some(activity_id) = query.activity_id {
        find = find.filter(participation::Column::ActivityId.eq(activity_id));
    }
    if let Some(student_id) = query.student_id {
        find = find.filter(participation::Column::StudentId.eq(student_id));
    }
    if let Some(ref status) = query.status {
        let Some(status) = ParticipationStatus::parse(status) else {
            warn!("Rejected participation list with unknown status: {}", status);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown status '{}'", status),
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            ));
        };
        find = find.filter(participation::Column::Status.eq(status));
    }

    let paginator = find
        .order_by_asc(participation::Column::Id)
        .paginate(&state.db, limit);

    match paginator.fetch_page(page - 1).await {
        Ok(participations) => {
            debug!("Retrieved {} participations", participations.len());
            let response = ApiResponse {
                data: participations
                    .into_iter()
                    .map(ParticipationResponse::from)
                    .collect(),
                message: "Participations retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve participations: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while listing participations".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get a specific participation by ID
#[utoipa::path(
    get,
    path = "/api/v1/participations/{participation_id}",
    tag = "participations",
    params(
        ("participation_id" = i32, Path, description = "Participation ID"),
    ),
    responses(
        (status = 200, description = "Participation retrieved successfully", body = ApiResponse<ParticipationResponse>),
        (status = 404, description = "Participation not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_participation(
    Path(participation_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ParticipationResponse>>, StatusCode> {
    trace!(
        "Entering get_participation for participation_id: {}",
        participation_id
    );

    match participation::Entity::find_by_id(participation_id)
        .one(&state.db)
        .await
    {
        Ok(Some(participation_model)) => {
            info!(
                "Successfully retrieved participation with ID: {}",
                participation_model.id
            );
            let response = ApiResponse {
                data: ParticipationResponse::from(participation_model),
                message: "Participation retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Participation with ID {} not found", participation_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve participation with ID {}: {}",
                participation_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Move a participation along its state machine
///
/// `pending -> approved -> present`, or `pending -> rejected`; anything else
/// yields INVALID_TRANSITION. A training-point override is accepted only
/// when approving.
#[utoipa::path(
    put,
    path = "/api/v1/participations/{participation_id}/status",
    tag = "participations",
    params(
        ("participation_id" = i32, Path, description = "Participation ID"),
    ),
    request_body = TransitionParticipationRequest,
    responses(
        (status = 200, description = "Participation status updated", body = ApiResponse<ParticipationResponse>),
        (status = 400, description = "Unknown status value or bad override", body = ErrorResponse),
        (status = 404, description = "Participation not found", body = ErrorResponse),
        (status = 409, description = "Illegal transition", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn transition_participation(
    Path(participation_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<TransitionParticipationRequest>,
) -> Result<Json<ApiResponse<ParticipationResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering transition_participation for participation_id: {}",
        participation_id
    );
    debug!("Requested participation status: {}", request.status);

    let Some(target) = ParticipationStatus::parse(&request.status) else {
        warn!("Rejected unknown participation status: {}", request.status);
        return Err(domain_error_response(DomainError::Validation(format!(
            "unknown status '{}'",
            request.status
        ))));
    };

    let updated = lifecycle::participation::transition(
        &state.db,
        participation_id,
        target,
        request.training_point,
    )
    .await
    .map_err(domain_error_response)?;

    // The student's cached point total is stale once the status moves
    let cache_key = format!("points_{}", updated.student_id);
    state.cache.invalidate(&cache_key).await;

    info!(
        "Participation {} moved to status {}",
        participation_id,
        updated.status.as_str()
    );
    Ok(Json(ApiResponse {
        data: ParticipationResponse::from(updated),
        message: "Participation status updated successfully".to_string(),
        success: true,
    }))
}
