use crate::schemas::{domain_error_response, ApiResponse, AppState, CachedData, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use common::{StudentActivityFeed, TrainingPointSummary};
use model::entities::student;
use model::entities::user::{self, UserRole};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating a student profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateStudentRequest {
    /// University-issued student code (must be unique)
    pub student_code: String,
    /// Backing user account (must have the student role)
    pub user_id: i32,
    pub sex: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<NaiveDate>,
    /// Academic year label, e.g. "2023-2024"
    pub academic_year: Option<String>,
    pub faculty: Option<String>,
}

/// Student response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub student_code: String,
    pub user_id: i32,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub academic_year: Option<String>,
    pub faculty: Option<String>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            student_code: model.student_code,
            user_id: model.user_id,
            sex: model.sex,
            date_of_birth: model.date_of_birth,
            academic_year: model.academic_year,
            faculty: model.faculty,
        }
    }
}

/// Query parameters of the legacy student feed endpoint.
/// The wire names are what the existing client sends.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentFeedQuery {
    /// Student profile ID
    #[serde(rename = "studentId")]
    pub student_id: i32,
    /// When true, rejected participations are included
    #[serde(rename = "allStatus")]
    pub all_status: Option<bool>,
}

/// Create a student profile
#[utoipa::path(
    post,
    path = "/api/v1/students",
    tag = "students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created successfully", body = ApiResponse<StudentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Backing user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_student function");
    debug!("Creating student profile with code: {}", request.student_code);

    // The backing account must exist and carry the student role
    let account = match user::Entity::find_by_id(request.user_id).one(&state.db).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!("User with ID {} not found for student profile", request.user_id);
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
    if account.role != UserRole::Student {
        warn!(
            "User {} has role {} and cannot own a student profile",
            account.id,
            account.role.as_str()
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("User {} is not a student account", account.id),
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        ));
    }

    let new_student = student::ActiveModel {
        student_code: Set(request.student_code.clone()),
        user_id: Set(request.user_id),
        sex: Set(request.sex.clone()),
        date_of_birth: Set(request.date_of_birth),
        academic_year: Set(request.academic_year.clone()),
        faculty: Set(request.faculty.clone()),
        ..Default::default()
    };

    match new_student.insert(&state.db).await {
        Ok(student_model) => {
            info!(
                "Student profile created with ID: {}, code: {}",
                student_model.id, student_model.student_code
            );
            let response = ApiResponse {
                data: StudentResponse::from(student_model),
                message: "Student created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create student '{}': {}",
                request.student_code, db_error
            );

            let error_response = match db_error {
                DbErr::Exec(ref exec_err) => {
                    let error_msg = exec_err.to_string().to_lowercase();
                    if error_msg.contains("unique") || error_msg.contains("constraint") {
                        ErrorResponse {
                            error: format!(
                                "Student code '{}' or user {} already has a profile",
                                request.student_code, request.user_id
                            ),
                            code: "STUDENT_ALREADY_EXISTS".to_string(),
                            success: false,
                        }
                    } else {
                        ErrorResponse {
                            error: "Failed to create student due to database constraint"
                                .to_string(),
                            code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                            success: false,
                        }
                    }
                }
                _ => ErrorResponse {
                    error: "Internal server error while creating student".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                },
            };

            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all students
#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "students",
    responses(
        (status = 200, description = "Students retrieved successfully", body = ApiResponse<Vec<StudentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StudentResponse>>>, StatusCode> {
    trace!("Entering get_students function");

    match student::Entity::find().all(&state.db).await {
        Ok(students) => {
            debug!("Retrieved {} students from database", students.len());
            let response = ApiResponse {
                data: students.into_iter().map(StudentResponse::from).collect(),
                message: "Students retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve students: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific student by ID
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}",
    tag = "students",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Student retrieved successfully", body = ApiResponse<StudentResponse>),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_student(
    Path(student_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StudentResponse>>, StatusCode> {
    trace!("Entering get_student function for student_id: {}", student_id);

    match student::Entity::find_by_id(student_id).one(&state.db).await {
        Ok(Some(student_model)) => {
            info!("Successfully retrieved student with ID: {}", student_model.id);
            let response = ApiResponse {
                data: StudentResponse::from(student_model),
                message: "Student retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Student with ID {} not found", student_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve student with ID {}: {}",
                student_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a student's cumulative training points
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}/points",
    tag = "students",
    params(
        ("student_id" = i32, Path, description = "Student ID"),
    ),
    responses(
        (status = 200, description = "Training points retrieved successfully", body = ApiResponse<TrainingPointSummary>),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_student_points(
    Path(student_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TrainingPointSummary>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_student_points for student_id: {}", student_id);

    // Create cache key
    let cache_key = format!("points_{}", student_id);

    // Check cache first
    if let Some(CachedData::Points(summary)) = state.cache.get(&cache_key).await {
        debug!("Returning cached point summary for student {}", student_id);
        return Ok(Json(ApiResponse {
            data: summary,
            message: "Training points retrieved from cache".to_string(),
            success: true,
        }));
    }

    let summary = lifecycle::points::training_point_summary(&state.db, student_id)
        .await
        .map_err(domain_error_response)?;

    state
        .cache
        .insert(cache_key, CachedData::Points(summary.clone()))
        .await;

    info!(
        "Student {} has {} training points over {} attended activities",
        student_id, summary.total, summary.present_count
    );
    Ok(Json(ApiResponse {
        data: summary,
        message: "Training points retrieved successfully".to_string(),
        success: true,
    }))
}

/// Legacy student activity feed
///
/// Kept byte-compatible with the original client: the response envelope is
/// `{ "activities": [...] }` with camelCase row fields, not the usual
/// ApiResponse wrapper.
#[utoipa::path(
    get,
    path = "/student/activities",
    tag = "students",
    params(StudentFeedQuery),
    responses(
        (status = 200, description = "Feed retrieved successfully", body = StudentActivityFeed),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_student_activities(
    Query(query): Query<StudentFeedQuery>,
    State(state): State<AppState>,
) -> Result<Json<StudentActivityFeed>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering get_student_activities for student_id: {}",
        query.student_id
    );

    let all_status = query.all_status.unwrap_or(false);
    let feed = lifecycle::points::student_feed(&state.db, query.student_id, all_status)
        .await
        .map_err(domain_error_response)?;

    debug!(
        "Feed for student {} holds {} activities (all_status: {})",
        query.student_id,
        feed.activities.len(),
        all_status
    );
    Ok(Json(feed))
}
