use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::entities::complaint::{self, ComplaintStatus};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for opening a complaint
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateComplaintRequest {
    /// Participation being disputed
    pub participation_id: i32,
    /// What the student disputes
    pub description: String,
}

/// Request body for resolving a complaint
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ResolveComplaintRequest {
    /// Organizer response (required, non-empty)
    pub response: String,
}

/// Complaint response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponse {
    pub id: i32,
    pub participation_id: i32,
    pub description: String,
    pub status: String,
    /// Vietnamese display label for the status
    pub status_label: String,
    pub response: Option<String>,
}

impl From<complaint::Model> for ComplaintResponse {
    fn from(model: complaint::Model) -> Self {
        Self {
            id: model.id,
            participation_id: model.participation_id,
            description: model.description,
            status: model.status.as_str().to_string(),
            status_label: model.status.label().to_string(),
            response: model.response,
        }
    }
}

/// Query parameters for listing complaints
#[derive(Debug, Deserialize, IntoParams)]
pub struct ComplaintQuery {
    /// Filter by participation
    pub participation_id: Option<i32>,
    /// When true, only open complaints are returned
    pub open_only: Option<bool>,
}

/// Open a complaint against a participation outcome
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    tag = "complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint opened successfully", body = ApiResponse<ComplaintResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Participation not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_complaint(
    State(state): State<AppState>,
    Json(request): Json<CreateComplaintRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_complaint function");
    debug!(
        "Opening complaint against participation {}",
        request.participation_id
    );

    let created = lifecycle::complaint::open(&state.db, request.participation_id, request.description)
        .await
        .map_err(domain_error_response)?;

    info!(
        "Complaint {} opened against participation {}",
        created.id, created.participation_id
    );
    let response = ApiResponse {
        data: ComplaintResponse::from(created),
        message: "Complaint opened successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get complaints with optional filters
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    tag = "complaints",
    params(ComplaintQuery),
    responses(
        (status = 200, description = "Complaints retrieved successfully", body = ApiResponse<Vec<ComplaintResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_complaints(
    State(state): State<AppState>,
    Query(query): Query<ComplaintQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponse>>>, StatusCode> {
    trace!("Entering get_complaints function");

    let mut find = complaint::Entity::find();
    if let Some(participation_id) = query.participation_id {
        find = find.filter(complaint::Column::ParticipationId.eq(participation_id));
    }
    if query.open_only.unwrap_or(false) {
        find = find.filter(complaint::Column::Status.eq(ComplaintStatus::Open));
    }

    match find.order_by_asc(complaint::Column::Id).all(&state.db).await {
        Ok(complaints) => {
            debug!("Retrieved {} complaints", complaints.len());
            let response = ApiResponse {
                data: complaints.into_iter().map(ComplaintResponse::from).collect(),
                message: "Complaints retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve complaints: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific complaint by ID
#[utoipa::path(
    get,
    path = "/api/v1/complaints/{complaint_id}",
    tag = "complaints",
    params(
        ("complaint_id" = i32, Path, description = "Complaint ID"),
    ),
    responses(
        (status = 200, description = "Complaint retrieved successfully", body = ApiResponse<ComplaintResponse>),
        (status = 404, description = "Complaint not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_complaint(
    Path(complaint_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ComplaintResponse>>, StatusCode> {
    trace!("Entering get_complaint for complaint_id: {}", complaint_id);

    match complaint::Entity::find_by_id(complaint_id).one(&state.db).await {
        Ok(Some(complaint_model)) => {
            info!("Successfully retrieved complaint with ID: {}", complaint_model.id);
            let response = ApiResponse {
                data: ComplaintResponse::from(complaint_model),
                message: "Complaint retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Complaint with ID {} not found", complaint_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve complaint with ID {}: {}",
                complaint_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Resolve an open complaint with an organizer response
///
/// A resolved complaint never reopens; resolving it again yields
/// INVALID_TRANSITION.
#[utoipa::path(
    put,
    path = "/api/v1/complaints/{complaint_id}/resolve",
    tag = "complaints",
    params(
        ("complaint_id" = i32, Path, description = "Complaint ID"),
    ),
    request_body = ResolveComplaintRequest,
    responses(
        (status = 200, description = "Complaint resolved", body = ApiResponse<ComplaintResponse>),
        (status = 400, description = "Missing response text", body = ErrorResponse),
        (status = 404, description = "Complaint not found", body = ErrorResponse),
        (status = 409, description = "Complaint already resolved", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn resolve_complaint(
    Path(complaint_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<ResolveComplaintRequest>,
) -> Result<Json<ApiResponse<ComplaintResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering resolve_complaint for complaint_id: {}", complaint_id);

    let resolved = lifecycle::complaint::resolve(&state.db, complaint_id, request.response)
        .await
        .map_err(domain_error_response)?;

    info!("Complaint {} resolved", complaint_id);
    Ok(Json(ApiResponse {
        data: ComplaintResponse::from(resolved),
        message: "Complaint resolved successfully".to_string(),
        success: true,
    }))
}
