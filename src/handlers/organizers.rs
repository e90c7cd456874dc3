use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::organizer;
use model::entities::user::{self, UserRole};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating an organizer profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrganizerRequest {
    /// Backing user account (must have the organizer role)
    pub user_id: i32,
    /// Department or unit the organizer acts for
    pub department: String,
}

/// Organizer response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizerResponse {
    pub id: i32,
    pub user_id: i32,
    pub department: String,
}

impl From<organizer::Model> for OrganizerResponse {
    fn from(model: organizer::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            department: model.department,
        }
    }
}

/// Create an organizer profile
#[utoipa::path(
    post,
    path = "/api/v1/organizers",
    tag = "organizers",
    request_body = CreateOrganizerRequest,
    responses(
        (status = 201, description = "Organizer created successfully", body = ApiResponse<OrganizerResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Backing user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_organizer(
    State(state): State<AppState>,
    Json(request): Json<CreateOrganizerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrganizerResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_organizer function");
    debug!("Creating organizer profile for user: {}", request.user_id);

    let account = match user::Entity::find_by_id(request.user_id).one(&state.db).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!(
                "User with ID {} not found for organizer profile",
                request.user_id
            );
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("User with ID {} not found", request.user_id),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to look up user {}: {}", request.user_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to validate backing user".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };
    if account.role != UserRole::Organizer {
        warn!(
            "User {} has role {} and cannot own an organizer profile",
            account.id,
            account.role.as_str()
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("User {} is not an organizer account", account.id),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    let new_organizer = organizer::ActiveModel {
        user_id: Set(request.user_id),
        department: Set(request.department.clone()),
        ..Default::default()
    };

    match new_organizer.insert(&state.db).await {
        Ok(organizer_model) => {
            info!(
                "Organizer profile created with ID: {} for user {}",
                organizer_model.id, organizer_model.user_id
            );
            let response = ApiResponse {
                data: OrganizerResponse::from(organizer_model),
                message: "Organizer created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create organizer for user {}: {}",
                request.user_id, db_error
            );

            let error_response = match db_error {
                DbErr::Exec(ref exec_err) => {
                    let error_msg = exec_err.to_string().to_lowercase();
                    if error_msg.contains("unique") || error_msg.contains("constraint") {
                        ErrorResponse {
                            error: format!("User {} already has an organizer profile", request.user_id),
                            code: "ORGANIZER_ALREADY_EXISTS".to_string(),
                            success: false,
                        }
                    } else {
                        ErrorResponse {
                            error: "Failed to create organizer due to database constraint"
                                .to_string(),
                            code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                            success: false,
                        }
                    }
                }
                _ => ErrorResponse {
                    error: "Internal server error while creating organizer".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                },
            };

            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all organizers
#[utoipa::path(
    get,
    path = "/api/v1/organizers",
    tag = "organizers",
    responses(
        (status = 200, description = "Organizers retrieved successfully", body = ApiResponse<Vec<OrganizerResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_organizers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrganizerResponse>>>, StatusCode> {
    trace!("Entering get_organizers function");

    match organizer::Entity::find().all(&state.db).await {
        Ok(organizers) => {
            debug!("Retrieved {} organizers from database", organizers.len());
            let response = ApiResponse {
                data: organizers.into_iter().map(OrganizerResponse::from).collect(),
                message: "Organizers retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve organizers: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific organizer by ID
#[utoipa::path(
    get,
    path = "/api/v1/organizers/{organizer_id}",
    tag = "organizers",
    params(
        ("organizer_id" = i32, Path, description = "Organizer ID"),
    ),
    responses(
        (status = 200, description = "Organizer retrieved successfully", body = ApiResponse<OrganizerResponse>),
        (status = 404, description = "Organizer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_organizer(
    Path(organizer_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OrganizerResponse>>, StatusCode> {
    trace!(
        "Entering get_organizer function for organizer_id: {}",
        organizer_id
    );

    match organizer::Entity::find_by_id(organizer_id).one(&state.db).await {
        Ok(Some(organizer_model)) => {
            info!(
                "Successfully retrieved organizer with ID: {}",
                organizer_model.id
            );
            let response = ApiResponse {
                data: OrganizerResponse::from(organizer_model),
                message: "Organizer retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Organizer with ID {} not found", organizer_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve organizer with ID {}: {}",
                organizer_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
