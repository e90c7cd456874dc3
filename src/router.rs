use crate::handlers::{
    activities::{
        create_activity, delete_activity, get_activities, get_activity, transition_activity,
        update_activity,
    },
    complaints::{create_complaint, get_complaint, get_complaints, resolve_complaint},
    health::health_check,
    notifications::{create_notification, get_notifications, mark_notification_read},
    organizers::{create_organizer, get_organizer, get_organizers},
    participations::{
        create_participation, get_participation, get_participations, transition_participation,
    },
    semesters::{
        create_semester, delete_semester, get_semester, get_semesters, update_semester,
    },
    students::{
        create_student, get_student, get_student_activities, get_student_points, get_students,
    },
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Student routes
        .route("/api/v1/students", post(create_student))
        .route("/api/v1/students", get(get_students))
        .route("/api/v1/students/:student_id", get(get_student))
        .route("/api/v1/students/:student_id/points", get(get_student_points))
        // Legacy feed kept for the existing web client
        .route("/student/activities", get(get_student_activities))
        // Organizer routes
        .route("/api/v1/organizers", post(create_organizer))
        .route("/api/v1/organizers", get(get_organizers))
        .route("/api/v1/organizers/:organizer_id", get(get_organizer))
        // Semester CRUD routes
        .route("/api/v1/semesters", post(create_semester))
        .route("/api/v1/semesters", get(get_semesters))
        .route("/api/v1/semesters/:semester_id", get(get_semester))
        .route("/api/v1/semesters/:semester_id", put(update_semester))
        .route("/api/v1/semesters/:semester_id", delete(delete_semester))
        // Activity CRUD and lifecycle routes
        .route("/api/v1/activities", post(create_activity))
        .route("/api/v1/activities", get(get_activities))
        .route("/api/v1/activities/:activity_id", get(get_activity))
        .route("/api/v1/activities/:activity_id", put(update_activity))
        .route("/api/v1/activities/:activity_id", delete(delete_activity))
        .route(
            "/api/v1/activities/:activity_id/status",
            put(transition_activity),
        )
        // Participation routes
        .route("/api/v1/participations", post(create_participation))
        .route("/api/v1/participations", get(get_participations))
        .route(
            "/api/v1/participations/:participation_id",
            get(get_participation),
        )
        .route(
            "/api/v1/participations/:participation_id/status",
            put(transition_participation),
        )
        // Complaint routes
        .route("/api/v1/complaints", post(create_complaint))
        .route("/api/v1/complaints", get(get_complaints))
        .route("/api/v1/complaints/:complaint_id", get(get_complaint))
        .route(
            "/api/v1/complaints/:complaint_id/resolve",
            put(resolve_complaint),
        )
        // Notification routes
        .route("/api/v1/notifications", post(create_notification))
        .route("/api/v1/notifications", get(get_notifications))
        .route(
            "/api/v1/notifications/:notification_id/read",
            put(mark_notification_read),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
