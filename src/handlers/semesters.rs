use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use model::entities::semester;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a semester
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSemesterRequest {
    /// Semester name (must be unique), e.g. "HK1 2025-2026"
    pub name: String,
    /// First day of the term (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// Last day of the term (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// Request body for updating a semester
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSemesterRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Semester response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SemesterResponse {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<semester::Model> for SemesterResponse {
    fn from(model: semester::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

fn invalid_range_response() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "start_date must not be after end_date".to_string(),
            code: "VALIDATION_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new semester
#[utoipa::path(
    post,
    path = "/api/v1/semesters",
    tag = "semesters",
    request_body = CreateSemesterRequest,
    responses(
        (status = 201, description = "Semester created successfully", body = ApiResponse<SemesterResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_semester(
    State(state): State<AppState>,
    Json(request): Json<CreateSemesterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SemesterResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_semester function");
    debug!("Creating semester: {}", request.name);

    // A term must not end before it starts
    if request.start_date > request.end_date {
        warn!(
            "Rejected semester '{}' with start {} after end {}",
            request.name, request.start_date, request.end_date
        );
        return Err(invalid_range_response());
    }

    let new_semester = semester::ActiveModel {
        name: Set(request.name.clone()),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        ..Default::default()
    };

    match new_semester.insert(&state.db).await {
        Ok(semester_model) => {
            info!(
                "Semester created with ID: {}, name: {}",
                semester_model.id, semester_model.name
            );
            let response = ApiResponse {
                data: SemesterResponse::from(semester_model),
                message: "Semester created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create semester '{}': {}", request.name, db_error);

            let error_response = match db_error {
                DbErr::Exec(ref exec_err) => {
                    let error_msg = exec_err.to_string().to_lowercase();
                    if error_msg.contains("unique") || error_msg.contains("constraint") {
                        ErrorResponse {
                            error: format!("Semester '{}' already exists", request.name),
                            code: "SEMESTER_ALREADY_EXISTS".to_string(),
                            success: false,
                        }
                    } else {
                        ErrorResponse {
                            error: "Failed to create semester due to database constraint"
                                .to_string(),
                            code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                            success: false,
                        }
                    }
                }
                _ => ErrorResponse {
                    error: "Internal server error while creating semester".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                },
            };

            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all semesters
#[utoipa::path(
    get,
    path = "/api/v1/semesters",
    tag = "semesters",
    responses(
        (status = 200, description = "Semesters retrieved successfully", body = ApiResponse<Vec<SemesterResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_semesters(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SemesterResponse>>>, StatusCode> {
    trace!("Entering get_semesters function");

    match semester::Entity::find().all(&state.db).await {
        Ok(semesters) => {
            debug!("Retrieved {} semesters from database", semesters.len());
            let response = ApiResponse {
                data: semesters.into_iter().map(SemesterResponse::from).collect(),
                message: "Semesters retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve semesters: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific semester by ID
#[utoipa::path(
    get,
    path = "/api/v1/semesters/{semester_id}",
    tag = "semesters",
    params(
        ("semester_id" = i32, Path, description = "Semester ID"),
    ),
    responses(
        (status = 200, description = "Semester retrieved successfully", body = ApiResponse<SemesterResponse>),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_semester(
    Path(semester_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SemesterResponse>>, StatusCode> {
    trace!("Entering get_semester for semester_id: {}", semester_id);

    match semester::Entity::find_by_id(semester_id).one(&state.db).await {
        Ok(Some(semester_model)) => {
            info!("Successfully retrieved semester with ID: {}", semester_model.id);
            let response = ApiResponse {
                data: SemesterResponse::from(semester_model),
                message: "Semester retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Semester with ID {} not found", semester_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve semester with ID {}: {}",
                semester_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a semester
#[utoipa::path(
    put,
    path = "/api/v1/semesters/{semester_id}",
    tag = "semesters",
    params(
        ("semester_id" = i32, Path, description = "Semester ID"),
    ),
    request_body = UpdateSemesterRequest,
    responses(
        (status = 200, description = "Semester updated successfully", body = ApiResponse<SemesterResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_semester(
    Path(semester_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateSemesterRequest>,
) -> Result<Json<ApiResponse<SemesterResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_semester for semester_id: {}", semester_id);

    let existing = match semester::Entity::find_by_id(semester_id).one(&state.db).await {
        Ok(Some(semester_model)) => semester_model,
        Ok(None) => {
            warn!("Semester with ID {} not found for update", semester_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Semester with ID {} not found", semester_id),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to look up semester {} for update: {}",
                semester_id, db_error
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up semester".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // The updated range must still be ordered
    let start_date = request.start_date.unwrap_or(existing.start_date);
    let end_date = request.end_date.unwrap_or(existing.end_date);
    if start_date > end_date {
        warn!(
            "Rejected semester {} update with start {} after end {}",
            semester_id, start_date, end_date
        );
        return Err(invalid_range_response());
    }

    let mut semester_active: semester::ActiveModel = existing.into();
    if let Some(name) = request.name {
        semester_active.name = Set(name);
    }
    semester_active.start_date = Set(start_date);
    semester_active.end_date = Set(end_date);

    match semester_active.update(&state.db).await {
        Ok(updated) => {
            info!("Semester with ID {} updated successfully", semester_id);
            Ok(Json(ApiResponse {
                data: SemesterResponse::from(updated),
                message: "Semester updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!(
                "Failed to update semester with ID {}: {}",
                semester_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while updating semester".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a semester
#[utoipa::path(
    delete,
    path = "/api/v1/semesters/{semester_id}",
    tag = "semesters",
    params(
        ("semester_id" = i32, Path, description = "Semester ID"),
    ),
    responses(
        (status = 200, description = "Semester deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_semester(
    Path(semester_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_semester for semester_id: {}", semester_id);

    match semester::Entity::delete_by_id(semester_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Semester with ID {} deleted successfully", semester_id);
                let response = ApiResponse {
                    data: format!("Semester {} deleted", semester_id),
                    message: "Semester deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Semester with ID {} not found for deletion", semester_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete semester with ID {}: {}",
                semester_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
