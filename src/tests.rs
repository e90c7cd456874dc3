#[cfg(test)]
mod integration_tests {
    use crate::handlers::complaints::{CreateComplaintRequest, ResolveComplaintRequest};
    use crate::handlers::notifications::CreateNotificationRequest;
    use crate::handlers::organizers::CreateOrganizerRequest;
    use crate::handlers::participations::{
        CreateParticipationRequest, TransitionParticipationRequest,
    };
    use crate::handlers::semesters::CreateSemesterRequest;
    use crate::handlers::students::CreateStudentRequest;
    use crate::handlers::users::CreateUserRequest;
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use serde_json::json;

    async fn create_user(server: &TestServer, username: &str, role: &str) -> i64 {
        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                username: username.to_string(),
                display_name: format!("Tài khoản {username}"),
                role: role.to_string(),
                phone: None,
                email: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_student(server: &TestServer, username: &str, code: &str) -> i64 {
        let user_id = create_user(server, username, "student").await;
        let response = server
            .post("/api/v1/students")
            .json(&CreateStudentRequest {
                student_code: code.to_string(),
                user_id: user_id as i32,
                sex: None,
                date_of_birth: None,
                academic_year: Some("2023-2024".to_string()),
                faculty: Some("Công nghệ thông tin".to_string()),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_organizer(server: &TestServer, username: &str) -> i64 {
        let user_id = create_user(server, username, "organizer").await;
        let response = server
            .post("/api/v1/organizers")
            .json(&CreateOrganizerRequest {
                user_id: user_id as i32,
                department: "Phòng Công tác sinh viên".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_semester(server: &TestServer, name: &str) -> i64 {
        let response = server
            .post("/api/v1/semesters")
            .json(&CreateSemesterRequest {
                name: name.to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    /// Activity creation payload with sane windows; the point override is
    /// omitted when None so the registry default applies.
    fn activity_payload(
        semester_id: i64,
        organizer_id: i64,
        name: &str,
        activity_type: &str,
        capacity: i32,
        training_point: Option<i32>,
    ) -> serde_json::Value {
        // Windows far in the future so the derived status is stable
        let mut payload = json!({
            "semester_id": semester_id,
            "organizer_id": organizer_id,
            "name": name,
            "type": activity_type,
            "registration_start": "2030-09-05T08:00:00",
            "registration_end": "2030-09-20T17:00:00",
            "event_start": "2030-09-25T07:00:00",
            "event_end": "2030-09-25T17:00:00",
            "location": "Hội trường A",
            "capacity": capacity,
        });
        if let Some(points) = training_point {
            payload["training_point"] = json!(points);
        }
        payload
    }

    async fn create_activity(
        server: &TestServer,
        semester_id: i64,
        organizer_id: i64,
        name: &str,
        activity_type: &str,
        capacity: i32,
        training_point: Option<i32>,
    ) -> i64 {
        let response = server
            .post("/api/v1/activities")
            .json(&activity_payload(
                semester_id,
                organizer_id,
                name,
                activity_type,
                capacity,
                training_point,
            ))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn register(server: &TestServer, student_id: i64, activity_id: i64) -> i64 {
        let response = server
            .post("/api/v1/participations")
            .json(&CreateParticipationRequest {
                student_id: student_id as i32,
                activity_id: activity_id as i32,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn set_participation_status(
        server: &TestServer,
        participation_id: i64,
        status: &str,
    ) -> axum_test::TestResponse {
        server
            .put(&format!("/api/v1/participations/{}/status", participation_id))
            .json(&TransitionParticipationRequest {
                status: status.to_string(),
                training_point: None,
            })
            .await
    }

    #[tokio::test]
    async fn test_health_check() {
        // Setup test server
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Send GET request to health endpoint
        let response = server.get("/health").await;

        // Verify response
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                username: "sv001".to_string(),
                display_name: "Nguyễn Văn A".to_string(),
                role: "student".to_string(),
                phone: Some("0901234567".to_string()),
                email: Some("sv001@stu.edu.vn".to_string()),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["username"], "sv001");
        assert_eq!(body.data["role"], "student");
        assert!(body.data["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_user_with_unknown_role() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                username: "sv001".to_string(),
                display_name: "Nguyễn Văn A".to_string(),
                role: "admin".to_string(),
                phone: None,
                email: None,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_student_profile_requires_student_account() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let organizer_user = create_user(&server, "doantruong", "organizer").await;

        let response = server
            .post("/api/v1/students")
            .json(&CreateStudentRequest {
                student_code: "B21DCCN001".to_string(),
                user_id: organizer_user as i32,
                sex: None,
                date_of_birth: None,
                academic_year: None,
                faculty: None,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_semester_rejects_inverted_range() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/semesters")
            .json(&CreateSemesterRequest {
                name: "HK1 2025-2026".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_activity_point_defaults_round_trip() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;

        // No explicit override, "Kỹ năng" defaults to 10
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Workshop kỹ năng thuyết trình",
            "Kỹ năng",
            40,
            None,
        )
        .await;

        // Persisted and re-read with the registry default
        let response = server.get(&format!("/api/v1/activities/{}", activity)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["training_point"], 10);
        assert_eq!(body.data["type"], "Kỹ năng");
        assert_eq!(body.data["status"], "upcoming");
    }

    #[tokio::test]
    async fn test_activity_unknown_category() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;

        let response = server
            .post("/api/v1/activities")
            .json(&activity_payload(
                semester,
                organizer,
                "Hoạt động lạ",
                "Thể dục",
                10,
                None,
            ))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UNKNOWN_CATEGORY");
    }

    #[tokio::test]
    async fn test_activity_rejects_zero_capacity() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;

        let response = server
            .post("/api/v1/activities")
            .json(&activity_payload(
                semester,
                organizer,
                "Hoạt động không chỗ",
                "Khác",
                0,
                None,
            ))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_duplicate_participation_conflict() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let student = create_student(&server, "sv001", "B21DCCN001").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Hiến máu nhân đạo",
            "Tình nguyện",
            30,
            None,
        )
        .await;

        register(&server, student, activity).await;

        let response = server
            .post("/api/v1/participations")
            .json(&CreateParticipationRequest {
                student_id: student as i32,
                activity_id: activity as i32,
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "DUPLICATE_PARTICIPATION");
    }

    #[tokio::test]
    async fn test_capacity_exceeded_conflict() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Đêm nhạc gây quỹ",
            "Nghệ thuật",
            2,
            None,
        )
        .await;

        let first = create_student(&server, "sv001", "B21DCCN001").await;
        let second = create_student(&server, "sv002", "B21DCCN002").await;
        let third = create_student(&server, "sv003", "B21DCCN003").await;

        register(&server, first, activity).await;
        register(&server, second, activity).await;

        let response = server
            .post("/api/v1/participations")
            .json(&CreateParticipationRequest {
                student_id: third as i32,
                activity_id: activity as i32,
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "CAPACITY_EXCEEDED");
    }

    #[tokio::test]
    async fn test_participation_transition_paths() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let student = create_student(&server, "sv001", "B21DCCN001").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Hội thảo hướng nghiệp",
            "Hội thảo",
            100,
            None,
        )
        .await;

        let participation = register(&server, student, activity).await;

        // pending -> present skips approval and must fail
        let response = set_participation_status(&server, participation, "present").await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_TRANSITION");

        // happy path: approved then present
        let response = set_participation_status(&server, participation, "approved").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "approved");
        assert_eq!(body.data["status_label"], "Đã duyệt");

        let response = set_participation_status(&server, participation, "present").await;
        response.assert_status(StatusCode::OK);

        // present is terminal
        let response = set_participation_status(&server, participation, "pending").await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_rejected_participation_is_terminal() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let student = create_student(&server, "sv001", "B21DCCN001").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Giải bóng đá sinh viên",
            "Thể thao",
            50,
            None,
        )
        .await;

        let participation = register(&server, student, activity).await;

        let response = set_participation_status(&server, participation, "rejected").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status_label"], "Bị từ chối");

        let response = set_participation_status(&server, participation, "approved").await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_training_points_count_only_present() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let student = create_student(&server, "sv001", "B21DCCN001").await;

        let attended = create_activity(
            &server,
            semester,
            organizer,
            "Hiến máu nhân đạo",
            "Tình nguyện",
            30,
            None,
        )
        .await;
        let approved_only = create_activity(
            &server,
            semester,
            organizer,
            "Hội thảo hướng nghiệp",
            "Hội thảo",
            100,
            None,
        )
        .await;

        let p1 = register(&server, student, attended).await;
        set_participation_status(&server, p1, "approved")
            .await
            .assert_status(StatusCode::OK);

        let p2 = register(&server, student, approved_only).await;
        set_participation_status(&server, p2, "approved")
            .await
            .assert_status(StatusCode::OK);

        // Nothing attended yet
        let response = server
            .get(&format!("/api/v1/students/{}/points", student))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total"], 0);
        assert_eq!(body.data["present_count"], 0);

        // Attendance credits the volunteer activity's 15 points; the cached
        // total must be invalidated by the transition
        set_participation_status(&server, p1, "present")
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .get(&format!("/api/v1/students/{}/points", student))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total"], 15);
        assert_eq!(body.data["present_count"], 1);
    }

    #[tokio::test]
    async fn test_student_feed_wire_shape() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let student = create_student(&server, "sv001", "B21DCCN001").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Tình nguyện tại Sở thú",
            "Tình nguyện",
            25,
            None,
        )
        .await;
        let rejected_activity = create_activity(
            &server,
            semester,
            organizer,
            "Đêm nhạc gây quỹ",
            "Nghệ thuật",
            25,
            None,
        )
        .await;

        register(&server, student, activity).await;
        let refused = register(&server, student, rejected_activity).await;
        set_participation_status(&server, refused, "rejected")
            .await
            .assert_status(StatusCode::OK);

        // Legacy envelope with camelCase row fields
        let response = server
            .get("/student/activities")
            .add_query_param("studentId", student)
            .add_query_param("allStatus", true)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        let activities = body["activities"].as_array().unwrap();
        assert_eq!(activities.len(), 2);

        let row = activities
            .iter()
            .find(|r| r["name"] == "Tình nguyện tại Sở thú")
            .unwrap();
        assert_eq!(row["activityID"], activity);
        assert_eq!(row["type"], "Tình nguyện");
        assert_eq!(row["trainingPoint"], 15);
        assert_eq!(row["location"], "Hội trường A");
        assert_eq!(row["participationStatus"], "pending");
        assert_eq!(row["statusLabel"], "Chờ duyệt");
        assert_eq!(row["eventStart"], "2030-09-25T07:00:00");

        // Without allStatus the rejected row disappears
        let response = server
            .get("/student/activities")
            .add_query_param("studentId", student)
            .await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["activities"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_activity_status_endpoint_is_monotonic() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Cuộc thi lập trình",
            "Học thuật",
            100,
            None,
        )
        .await;

        let response = server
            .put(&format!("/api/v1/activities/{}/status", activity))
            .json(&json!({ "status": "ongoing" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status_label"], "Đang diễn ra");

        let response = server
            .put(&format!("/api/v1/activities/{}/status", activity))
            .json(&json!({ "status": "completed" }))
            .await;
        response.assert_status(StatusCode::OK);

        // No reverse transition
        let response = server
            .put(&format!("/api/v1/activities/{}/status", activity))
            .json(&json!({ "status": "upcoming" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_complaint_flow() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        let student = create_student(&server, "sv001", "B21DCCN001").await;
        let activity = create_activity(
            &server,
            semester,
            organizer,
            "Hội thảo hướng nghiệp",
            "Hội thảo",
            100,
            None,
        )
        .await;
        let participation = register(&server, student, activity).await;
        set_participation_status(&server, participation, "rejected")
            .await
            .assert_status(StatusCode::OK);

        // Student disputes the rejection
        let response = server
            .post("/api/v1/complaints")
            .json(&CreateComplaintRequest {
                participation_id: participation as i32,
                description: "Em đã đăng ký đúng hạn".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let complaint_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["status"], "open");
        assert_eq!(body.data["status_label"], "Chờ xử lý");

        // Organizer resolves with a response
        let response = server
            .put(&format!("/api/v1/complaints/{}/resolve", complaint_id))
            .json(&ResolveComplaintRequest {
                response: "Đã kiểm tra, đăng ký đến sau khi hết chỗ".to_string(),
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "resolved");
        assert!(body.data["response"].as_str().is_some());

        // No second resolution
        let response = server
            .put(&format!("/api/v1/complaints/{}/resolve", complaint_id))
            .json(&ResolveComplaintRequest {
                response: "lần nữa".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_notification_flow() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let sender = create_user(&server, "doantruong", "organizer").await;
        let recipient = create_user(&server, "sv001", "student").await;

        let response = server
            .post("/api/v1/notifications")
            .json(&CreateNotificationRequest {
                sender_id: sender as i32,
                recipient_id: recipient as i32,
                title: "Kết quả đăng ký".to_string(),
                message: "Đăng ký của bạn đã được duyệt.".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let notification_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["status"], "unread");

        // Unread filter sees it
        let response = server
            .get("/api/v1/notifications")
            .add_query_param("recipient_id", recipient)
            .add_query_param("unread_only", true)
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);

        // Mark read, unread filter is empty afterwards
        let response = server
            .put(&format!("/api/v1/notifications/{}/read", notification_id))
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/notifications")
            .add_query_param("recipient_id", recipient)
            .add_query_param("unread_only", true)
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_activity_list_filters() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let semester = create_semester(&server, "HK1 2025-2026").await;
        let organizer = create_organizer(&server, "doantruong").await;
        create_activity(
            &server,
            semester,
            organizer,
            "Hiến máu nhân đạo",
            "Tình nguyện",
            30,
            None,
        )
        .await;
        create_activity(
            &server,
            semester,
            organizer,
            "Cuộc thi lập trình",
            "Học thuật",
            100,
            None,
        )
        .await;

        let response = server
            .get("/api/v1/activities")
            .add_query_param("type", "Tình nguyện")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["name"], "Hiến máu nhân đạo");

        // Unknown type filter is rejected, not silently empty
        let response = server
            .get("/api/v1/activities")
            .add_query_param("type", "Thể dục")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UNKNOWN_CATEGORY");
    }
}
