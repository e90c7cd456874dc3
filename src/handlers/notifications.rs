use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::entities::notification::{self, NotificationStatus};
use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for sending a notification
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateNotificationRequest {
    /// Sending user
    pub sender_id: i32,
    /// Receiving user
    pub recipient_id: i32,
    pub title: String,
    pub message: String,
}

/// Notification response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub sender_id: i32,
    pub recipient_id: i32,
    pub title: String,
    pub message: String,
    pub status: String,
}

impl From<notification::Model> for NotificationResponse {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            sender_id: model.sender_id,
            recipient_id: model.recipient_id,
            title: model.title,
            message: model.message,
            status: model.status.as_str().to_string(),
        }
    }
}

/// Query parameters for listing notifications
#[derive(Debug, Deserialize, IntoParams)]
pub struct NotificationQuery {
    /// Recipient user ID
    pub recipient_id: i32,
    /// When true, only unread notifications are returned
    pub unread_only: Option<bool>,
}

/// Send a notification from one user to another
#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    tag = "notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created successfully", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "Sender or recipient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NotificationResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_notification function");
    debug!(
        "Creating notification from user {} to user {}",
        request.sender_id, request.recipient_id
    );

    // Both ends of the message must exist
    for (label, user_id) in [("sender", request.sender_id), ("recipient", request.recipient_id)] {
        match user::Entity::find_by_id(user_id).one(&state.db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("Notification {} with ID {} not found", label, user_id);
                return Err((
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: format!("Notification {} with ID {} not found", label, user_id),
                        code: "NOT_FOUND".to_string(),
                        success: false,
                    }),
                ));
            }
            Err(db_error) => {
                error!("Failed to look up {} {}: {}", label, user_id, db_error);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to validate notification {}", label),
                        code: "DATABASE_ERROR".to_string(),
                        success: false,
                    }),
                ));
            }
        }
    }

    let new_notification = notification::ActiveModel {
        sender_id: Set(request.sender_id),
        recipient_id: Set(request.recipient_id),
        title: Set(request.title.clone()),
        message: Set(request.message.clone()),
        status: Set(NotificationStatus::Unread),
        ..Default::default()
    };

    match new_notification.insert(&state.db).await {
        Ok(notification_model) => {
            info!(
                "Notification {} created for user {}",
                notification_model.id, notification_model.recipient_id
            );
            let response = ApiResponse {
                data: NotificationResponse::from(notification_model),
                message: "Notification created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create notification: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating notification".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get notifications for a recipient
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications retrieved successfully", body = ApiResponse<Vec<NotificationResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationResponse>>>, StatusCode> {
    trace!(
        "Entering get_notifications for recipient: {}",
        query.recipient_id
    );

    let mut find = notification::Entity::find()
        .filter(notification::Column::RecipientId.eq(query.recipient_id));
    if query.unread_only.unwrap_or(false) {
        find = find.filter(notification::Column::Status.eq(NotificationStatus::Unread));
    }

    match find
        .order_by_desc(notification::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(notifications) => {
            debug!(
                "Retrieved {} notifications for user {}",
                notifications.len(),
                query.recipient_id
            );
            let response = ApiResponse {
                data: notifications
                    .into_iter()
                    .map(NotificationResponse::from)
                    .collect(),
                message: "Notifications retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve notifications: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Mark a notification as read
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{notification_id}/read",
    tag = "notifications",
    params(
        ("notification_id" = i32, Path, description = "Notification ID"),
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "Notification not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn mark_notification_read(
    Path(notification_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<NotificationResponse>>, StatusCode> {
    trace!(
        "Entering mark_notification_read for notification_id: {}",
        notification_id
    );

    let existing = match notification::Entity::find_by_id(notification_id)
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Notification with ID {} not found", notification_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to look up notification {}: {}",
                notification_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Marking an already-read notification again is a no-op
    let mut active: notification::ActiveModel = existing.into();
    active.status = Set(NotificationStatus::Read);

    match active.update(&state.db).await {
        Ok(updated) => {
            info!("Notification {} marked as read", notification_id);
            Ok(Json(ApiResponse {
                data: NotificationResponse::from(updated),
                message: "Notification marked as read".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!(
                "Failed to mark notification {} as read: {}",
                notification_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
