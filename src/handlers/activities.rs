use crate::schemas::{domain_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDateTime;
use lifecycle::activity::NewActivity;
use lifecycle::DomainError;
use model::entities::activity::{self, ActivityStatus, ActivityType};
use model::entities::participation::{self, ParticipationStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating an activity
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateActivityRequest {
    /// Semester the activity belongs to
    pub semester_id: i32,
    /// Organizer running the activity
    pub organizer_id: i32,
    /// Activity name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Category name, one of the fixed set (e.g. "Tình nguyện")
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Start of the registration window
    pub registration_start: NaiveDateTime,
    /// End of the registration window
    pub registration_end: NaiveDateTime,
    /// Start of the event window
    pub event_start: NaiveDateTime,
    /// End of the event window
    pub event_end: NaiveDateTime,
    /// Where the activity takes place
    pub location: String,
    /// Maximum number of seats (must be positive)
    pub capacity: i32,
    /// Explicit training-point override; the registry default applies when absent
    pub training_point: Option<i32>,
    /// Optional image reference
    pub image_url: Option<String>,
}

/// Request body for updating an activity's descriptive fields
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// New capacity; must stay positive and above the occupied seat count
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

/// Request body for moving an activity along its lifecycle
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransitionActivityRequest {
    /// Target status: "upcoming", "ongoing", or "completed"
    pub status: String,
}

/// Activity response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub semester_id: i32,
    pub organizer_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub status: String,
    /// Vietnamese display label for the status
    pub status_label: String,
    pub registration_start: NaiveDateTime,
    pub registration_end: NaiveDateTime,
    pub event_start: NaiveDateTime,
    pub event_end: NaiveDateTime,
    pub location: String,
    pub capacity: i32,
    pub training_point: i32,
    pub image_url: Option<String>,
}

impl From<activity::Model> for ActivityResponse {
    fn from(model: activity::Model) -> Self {
        Self {
            id: model.id,
            semester_id: model.semester_id,
            organizer_id: model.organizer_id,
            name: model.name,
            description: model.description,
            activity_type: model.activity_type.as_str().to_string(),
            status: model.status.as_str().to_string(),
            status_label: model.status.label().to_string(),
            registration_start: model.registration_start,
            registration_end: model.registration_end,
            event_start: model.event_start,
            event_end: model.event_end,
            location: model.location,
            capacity: model.capacity,
            training_point: model.training_point,
            image_url: model.image_url,
        }
    }
}

/// Query parameters for listing activities
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct ActivityQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// Filter by lifecycle status
    pub status: Option<String>,
    /// Filter by semester
    pub semester_id: Option<i32>,
    /// Filter by category name
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
}

/// Create a new activity
#[utoipa::path(
    post,
    path = "/api/v1/activities",
    tag = "activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created successfully", body = ApiResponse<ActivityResponse>),
        (status = 400, description = "Invalid request or unknown category", body = ErrorResponse),
        (status = 404, description = "Semester or organizer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActivityResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_activity function");
    debug!("Creating activity: {}", request.name);

    // The category must be one of the fixed set
    let activity_type = ActivityType::parse(&request.activity_type).ok_or_else(|| {
        domain_error_response(DomainError::UnknownCategory(request.activity_type.clone()))
    })?;

    let input = NewActivity {
        semester_id: request.semester_id,
        organizer_id: request.organizer_id,
        name: request.name,
        description: request.description,
        activity_type,
        registration_start: request.registration_start,
        registration_end: request.registration_end,
        event_start: request.event_start,
        event_end: request.event_end,
        location: request.location,
        capacity: request.capacity,
        training_point: request.training_point,
        image_url: request.image_url,
    };

    let created = lifecycle::activity::create(&state.db, &state.registry, input, None)
        .await
        .map_err(domain_error_response)?;

    info!(
        "Activity created with ID: {}, type: {}, {} points",
        created.id,
        created.activity_type.as_str(),
        created.training_point
    );
    let response = ApiResponse {
        data: ActivityResponse::from(created),
        message: "Activity created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get activities with optional filters and pagination
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    tag = "activities",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Activities retrieved successfully", body = ApiResponse<Vec<ActivityResponse>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_activities(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ActivityQuery>>,
) -> Result<Json<ApiResponse<Vec<ActivityResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_activities function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    debug!("Listing activities, page {} with limit {}", page, limit);

    let mut find = activity::Entity::find();

    if let Some(ref status) = query.status {
        let Some(status) = ActivityStatus::parse(status) else {
            warn!("Rejected activity list with unknown status filter: {}", status);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown status '{}'", status),
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            ));
        };
        find = find.filter(activity::Column::Status.eq(status));
    }
    if let Some(semester_id) = query.semester_id {
        find = find.filter(activity::Column::SemesterId.eq(semester_id));
    }
    if let Some(ref type_label) = query.activity_type {
        let activity_type = ActivityType::parse(type_label).ok_or_else(|| {
            domain_error_response(DomainError::UnknownCategory(type_label.clone()))
        })?;
        find = find.filter(activity::Column::ActivityType.eq(activity_type));
    }

    let paginator = find
        .order_by_asc(activity::Column::EventStart)
        .paginate(&state.db, limit);

    match paginator.fetch_page(page - 1).await {
        Ok(activities) => {
            debug!("Retrieved {} activities", activities.len());
            let response = ApiResponse {
                data: activities.into_iter().map(ActivityResponse::from).collect(),
                message: "Activities retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve activities: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while listing activities".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get a specific activity by ID
#[utoipa::path(
    get,
    path = "/api/v1/activities/{activity_id}",
    tag = "activities",
    params(
        ("activity_id" = i32, Path, description = "Activity ID"),
    ),
    responses(
        (status = 200, description = "Activity retrieved successfully", body = ApiResponse<ActivityResponse>),
        (status = 404, description = "Activity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_activity(
    Path(activity_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ActivityResponse>>, StatusCode> {
    trace!("Entering get_activity for activity_id: {}", activity_id);

    match activity::Entity::find_by_id(activity_id).one(&state.db).await {
        Ok(Some(activity_model)) => {
            info!("Successfully retrieved activity with ID: {}", activity_model.id);
            let response = ApiResponse {
                data: ActivityResponse::from(activity_model),
                message: "Activity retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Activity with ID {} not found", activity_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve activity with ID {}: {}",
                activity_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update an activity's descriptive fields
#[utoipa::path(
    put,
    path = "/api/v1/activities/{activity_id}",
    tag = "activities",
    params(
        ("activity_id" = i32, Path, description = "Activity ID"),
    ),
    request_body = UpdateActivityRequest,
    responses(
        (status = 200, description = "Activity updated successfully", body = ApiResponse<ActivityResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_activity(
    Path(activity_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<Json<ApiResponse<ActivityResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_activity for activity_id: {}", activity_id);

    let existing = match activity::Entity::find_by_id(activity_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Activity with ID {} not found for update", activity_id);
            return Err(domain_error_response(DomainError::NotFound("activity")));
        }
        Err(db_error) => {
            error!(
                "Failed to look up activity {} for update: {}",
                activity_id, db_error
            );
            return Err(domain_error_response(db_error.into()));
        }
    };

    if let Some(capacity) = request.capacity {
        if capacity <= 0 {
            return Err(domain_error_response(DomainError::Validation(
                "capacity must be positive".to_string(),
            )));
        }
        // The capacity may not drop below the seats already taken
        let occupied = participation::Entity::find()
            .filter(participation::Column::ActivityId.eq(activity_id))
            .filter(participation::Column::Status.ne(ParticipationStatus::Rejected))
            .count(&state.db)
            .await
            .map_err(|e| domain_error_response(e.into()))?;
        if (capacity as u64) < occupied {
            warn!(
                "Rejected capacity {} below {} occupied seats for activity {}",
                capacity, occupied, activity_id
            );
            return Err(domain_error_response(DomainError::Validation(format!(
                "capacity {} is below the {} seats already taken",
                capacity, occupied
            ))));
        }
    }

    let mut active: activity::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(location) = request.location {
        active.location = Set(location);
    }
    if let Some(capacity) = request.capacity {
        active.capacity = Set(capacity);
    }
    if let Some(image_url) = request.image_url {
        active.image_url = Set(Some(image_url));
    }

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Activity with ID {} updated successfully", activity_id);
            Ok(Json(ApiResponse {
                data: ActivityResponse::from(updated),
                message: "Activity updated successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!(
                "Failed to update activity with ID {}: {}",
                activity_id, db_error
            );
            Err(domain_error_response(db_error.into()))
        }
    }
}

/// Delete an activity
#[utoipa::path(
    delete,
    path = "/api/v1/activities/{activity_id}",
    tag = "activities",
    params(
        ("activity_id" = i32, Path, description = "Activity ID"),
    ),
    responses(
        (status = 200, description = "Activity deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Activity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_activity(
    Path(activity_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_activity for activity_id: {}", activity_id);

    match activity::Entity::delete_by_id(activity_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Activity with ID {} deleted successfully", activity_id);
                let response = ApiResponse {
                    data: format!("Activity {} deleted", activity_id),
                    message: "Activity deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Activity with ID {} not found for deletion", activity_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete activity with ID {}: {}",
                activity_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Move an activity along its lifecycle
///
/// Status only moves forward (`upcoming -> ongoing -> completed`); reverse
/// moves are rejected with INVALID_TRANSITION.
#[utoipa::path(
    put,
    path = "/api/v1/activities/{activity_id}/status",
    tag = "activities",
    params(
        ("activity_id" = i32, Path, description = "Activity ID"),
    ),
    request_body = TransitionActivityRequest,
    responses(
        (status = 200, description = "Activity status updated", body = ApiResponse<ActivityResponse>),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse),
        (status = 409, description = "Illegal transition", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn transition_activity(
    Path(activity_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<TransitionActivityRequest>,
) -> Result<Json<ApiResponse<ActivityResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering transition_activity for activity_id: {}", activity_id);
    debug!("Requested activity status: {}", request.status);

    let Some(target) = ActivityStatus::parse(&request.status) else {
        warn!("Rejected unknown activity status: {}", request.status);
        return Err(domain_error_response(DomainError::Validation(format!(
            "unknown status '{}'",
            request.status
        ))));
    };

    let updated = lifecycle::activity::transition(&state.db, activity_id, target)
        .await
        .map_err(domain_error_response)?;

    info!(
        "Activity {} moved to status {}",
        activity_id,
        updated.status.as_str()
    );
    Ok(Json(ApiResponse {
        data: ActivityResponse::from(updated),
        message: "Activity status updated successfully".to_string(),
        success: true,
    }))
}
