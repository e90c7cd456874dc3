use crate::handlers::activities::ActivityResponse;
use crate::handlers::complaints::ComplaintResponse;
use crate::handlers::notifications::NotificationResponse;
use crate::handlers::organizers::OrganizerResponse;
use crate::handlers::participations::ParticipationResponse;
use crate::handlers::semesters::SemesterResponse;
use crate::handlers::students::StudentResponse;
use crate::handlers::users::UserResponse;
use axum::{http::StatusCode, response::Json};
use common::{StudentActivityFeed, StudentActivityRow, TrainingPointSummary};
use lifecycle::{ActivityTypeRegistry, DomainError};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    /// Immutable activity-type registry, loaded once at startup
    pub registry: Arc<ActivityTypeRegistry>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Points(TrainingPointSummary),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Maps a domain error onto the HTTP status and stable error code the
/// client dispatches on. Nothing is swallowed: every failure reaches the
/// caller with its kind intact.
pub fn domain_error_response(err: DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
        DomainError::CapacityExceeded { .. } => (StatusCode::CONFLICT, "CAPACITY_EXCEEDED"),
        DomainError::DuplicateParticipation => (StatusCode::CONFLICT, "DUPLICATE_PARTICIPATION"),
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::UnknownCategory(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_CATEGORY"),
        DomainError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::students::create_student,
        crate::handlers::students::get_students,
        crate::handlers::students::get_student,
        crate::handlers::students::get_student_points,
        crate::handlers::students::get_student_activities,
        crate::handlers::organizers::create_organizer,
        crate::handlers::organizers::get_organizers,
        crate::handlers::organizers::get_organizer,
        crate::handlers::semesters::create_semester,
        crate::handlers::semesters::get_semesters,
        crate::handlers::semesters::get_semester,
        crate::handlers::semesters::update_semester,
        crate::handlers::semesters::delete_semester,
        crate::handlers::activities::create_activity,
        crate::handlers::activities::get_activities,
        crate::handlers::activities::get_activity,
        crate::handlers::activities::update_activity,
        crate::handlers::activities::delete_activity,
        crate::handlers::activities::transition_activity,
        crate::handlers::participations::create_participation,
        crate::handlers::participations::get_participations,
        crate::handlers::participations::get_participation,
        crate::handlers::participations::transition_participation,
        crate::handlers::complaints::create_complaint,
        crate::handlers::complaints::get_complaints,
        crate::handlers::complaints::get_complaint,
        crate::handlers::complaints::resolve_complaint,
        crate::handlers::notifications::create_notification,
        crate::handlers::notifications::get_notifications,
        crate::handlers::notifications::mark_notification_read,
    ),
    components(
        schemas(
            ApiResponse<UserResponse>,
            ApiResponse<Vec<UserResponse>>,
            ApiResponse<StudentResponse>,
            ApiResponse<Vec<StudentResponse>>,
            ApiResponse<TrainingPointSummary>,
            ApiResponse<OrganizerResponse>,
            ApiResponse<Vec<OrganizerResponse>>,
            ApiResponse<SemesterResponse>,
            ApiResponse<Vec<SemesterResponse>>,
            ApiResponse<ActivityResponse>,
            ApiResponse<Vec<ActivityResponse>>,
            ApiResponse<ParticipationResponse>,
            ApiResponse<Vec<ParticipationResponse>>,
            ApiResponse<ComplaintResponse>,
            ApiResponse<Vec<ComplaintResponse>>,
            ApiResponse<NotificationResponse>,
            ApiResponse<Vec<NotificationResponse>>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::students::CreateStudentRequest,
            crate::handlers::students::StudentResponse,
            crate::handlers::organizers::CreateOrganizerRequest,
            crate::handlers::organizers::OrganizerResponse,
            crate::handlers::semesters::CreateSemesterRequest,
            crate::handlers::semesters::UpdateSemesterRequest,
            crate::handlers::semesters::SemesterResponse,
            crate::handlers::activities::CreateActivityRequest,
            crate::handlers::activities::UpdateActivityRequest,
            crate::handlers::activities::TransitionActivityRequest,
            crate::handlers::activities::ActivityResponse,
            crate::handlers::participations::CreateParticipationRequest,
            crate::handlers::participations::TransitionParticipationRequest,
            crate::handlers::participations::ParticipationResponse,
            crate::handlers::complaints::CreateComplaintRequest,
            crate::handlers::complaints::ResolveComplaintRequest,
            crate::handlers::complaints::ComplaintResponse,
            crate::handlers::notifications::CreateNotificationRequest,
            crate::handlers::notifications::NotificationResponse,
            StudentActivityFeed,
            StudentActivityRow,
            TrainingPointSummary,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User account endpoints"),
        (name = "students", description = "Student profile, point, and feed endpoints"),
        (name = "organizers", description = "Organizer profile endpoints"),
        (name = "semesters", description = "Semester endpoints"),
        (name = "activities", description = "Activity CRUD and lifecycle endpoints"),
        (name = "participations", description = "Registration and participation lifecycle endpoints"),
        (name = "complaints", description = "Complaint endpoints"),
        (name = "notifications", description = "Notification endpoints"),
    ),
    info(
        title = "ActiHub API",
        description = "Student activity management API - registration, participation tracking, and training points",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
