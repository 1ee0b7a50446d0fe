// Integration tests for the skill-verification notification workflow
// Run with: cargo test -p skillverify-control-plane --test notification_workflow
// In-process router over in-memory storage; no external services needed.

mod common;

use axum::http::StatusCode;
use common::{schedule, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_request_creates_pending_notification() {
    let app = TestApp::open();
    let student_id = app
        .register_student("Asha Raman", "asha@example.com", &["Rust", "SQL"])
        .await;

    let (status, body) = app
        .post("/v1/notification-request", json!({"studentId": student_id}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request sent to admin successfully");
    let notification = &body["notification"];
    assert_eq!(notification["status"], "pending");
    assert_eq!(notification["type"], "skill_verification_request");
    assert_eq!(notification["read"], false);
    assert_eq!(notification["studentId"], student_id.as_str());
    assert_eq!(
        notification["message"],
        "Skill verification request from Asha Raman (asha@example.com). Skills: Rust, SQL"
    );
    assert!(notification.get("meetingLink").is_none());
}

#[tokio::test]
async fn test_request_validation() {
    let app = TestApp::open();

    let (status, body) = app.post("/v1/notification-request", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student ID is required");

    let (status, body) = app
        .post("/v1/notification-request", json!({"studentId": "not-a-uuid"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid student ID");

    let (status, body) = app
        .post(
            "/v1/notification-request",
            json!({"studentId": uuid::Uuid::now_v7().to_string()}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_second_request_while_pending_is_rejected() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    app.request_verification(&student_id).await;

    let (status, body) = app
        .post("/v1/notification-request", json!({"studentId": student_id}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You have already applied for a meeting. Please wait for the admin to respond."
    );

    let (_, list) = app
        .get(&format!("/v1/notifications?studentId={}", student_id))
        .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_accept_schedules_meeting() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &["Rust"]).await;
    let notification_id = app.request_verification(&student_id).await;

    let (status, body) = app
        .post("/v1/notification-accept", schedule(&notification_id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Meeting scheduled successfully");
    let notification = &body["notification"];
    assert_eq!(notification["status"], "accepted");
    assert_eq!(notification["interviewDate"], "2026-11-02");
    assert_eq!(notification["interviewTime"], "10:30 IST");
    assert_eq!(
        notification["meetingLink"],
        "https://meet.example.com/abc-defg-hij"
    );
    assert_eq!(notification["adminMessage"], "Please join five minutes early");
}

#[tokio::test]
async fn test_accept_requires_schedule_fields() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    let notification_id = app.request_verification(&student_id).await;

    let (status, body) = app
        .post(
            "/v1/notification-accept",
            json!({
                "notificationId": notification_id,
                "interviewDate": "2026-11-02",
                "interviewTime": "10:30",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Interview date, time and meeting link are required"
    );

    // Empty strings count as missing
    let mut empty_link = schedule(&notification_id);
    empty_link["meetingLink"] = json!("");
    let (status, _) = app.post("/v1/notification-accept", empty_link).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post("/v1/notification-accept", json!({"interviewDate": "2026-11-02"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Notification ID is required");

    // Still pending after the failed attempts
    let (_, list) = app.get("/v1/notifications").await;
    assert_eq!(list["data"][0]["status"], "pending");
}

#[tokio::test]
async fn test_accept_unknown_notification() {
    let app = TestApp::open();
    let (status, body) = app
        .post(
            "/v1/notification-accept",
            schedule(&uuid::Uuid::now_v7().to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Notification not found");
}

#[tokio::test]
async fn test_processed_notification_cannot_change() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    let notification_id = app.request_verification(&student_id).await;

    let (status, _) = app
        .post(
            "/v1/notification-reject",
            json!({"notificationId": notification_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/v1/notification-accept", schedule(&notification_id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This request has already been processed");

    let (status, _) = app
        .post(
            "/v1/notification-reject",
            json!({"notificationId": notification_id}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Fields unchanged by the failed accept
    let (_, list) = app.get("/v1/notifications").await;
    let stored = &list["data"][0];
    assert_eq!(stored["status"], "rejected");
    assert!(stored.get("interviewDate").is_none());
    assert!(stored.get("meetingLink").is_none());
}

#[tokio::test]
async fn test_reject_leaves_schedule_empty() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    let notification_id = app.request_verification(&student_id).await;

    let (status, body) = app
        .post(
            "/v1/notification-reject",
            json!({"notificationId": notification_id}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request rejected");
    let notification = &body["notification"];
    assert_eq!(notification["status"], "rejected");
    for field in ["interviewDate", "interviewTime", "meetingLink", "adminMessage"] {
        assert!(notification.get(field).is_none(), "{field} should be absent");
    }
}

#[tokio::test]
async fn test_mark_read_regardless_of_status() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    let notification_id = app.request_verification(&student_id).await;

    let (status, body) = app
        .post(
            "/v1/notification-mark-read",
            json!({"notificationId": notification_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notification marked as read");
    assert_eq!(body["notification"]["read"], true);
    assert_eq!(body["notification"]["status"], "pending");

    app.post("/v1/notification-accept", schedule(&notification_id))
        .await;

    // Idempotent, and works after acceptance too
    let (status, body) = app
        .post(
            "/v1/notification-mark-read",
            json!({"notificationId": notification_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["read"], true);
    assert_eq!(body["notification"]["status"], "accepted");

    let (status, _) = app
        .post(
            "/v1/notification-mark-read",
            json!({"notificationId": uuid::Uuid::now_v7().to_string()}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_student_newest_first() {
    let app = TestApp::open();
    let asha = app.register_student("Asha", "asha@example.com", &[]).await;
    let ravi = app.register_student("Ravi", "ravi@example.com", &[]).await;

    let first = app.request_verification(&asha).await;
    app.post("/v1/notification-reject", json!({"notificationId": first}))
        .await;
    app.request_verification(&ravi).await;
    let second = app.request_verification(&asha).await;

    let (status, body) = app
        .get(&format!("/v1/notifications?studentId={}", asha))
        .await;
    assert_eq!(status, StatusCode::OK);

    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second.as_str());
    assert_eq!(items[1]["id"], first.as_str());
    assert!(items.iter().all(|n| n["studentId"] == asha.as_str()));
    assert_eq!(items[0]["student"]["name"], "Asha");
    assert_eq!(items[0]["student"]["email"], "asha@example.com");

    let (_, all) = app.get("/v1/notifications").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_new_request_allowed_after_answer() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;

    let first = app.request_verification(&student_id).await;
    app.post("/v1/notification-accept", schedule(&first)).await;

    let (status, _) = app
        .post("/v1/notification-request", json!({"studentId": student_id}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_verified_skill_appears_in_next_message() {
    let app = TestApp::open();
    let student_id = app
        .register_student("Asha", "asha@example.com", &["Rust", "SQL"])
        .await;

    let first = app.request_verification(&student_id).await;
    app.post("/v1/notification-accept", schedule(&first)).await;

    let (status, body) = app
        .post(
            "/v1/skills/verify",
            json!({"studentId": student_id, "skill": "rust"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Skill verified successfully");

    let (_, body) = app
        .post("/v1/notification-request", json!({"studentId": student_id}))
        .await;
    assert_eq!(
        body["notification"]["message"],
        "Skill verification request from Asha (asha@example.com). Skills: Rust (verified), SQL"
    );
}

#[tokio::test]
async fn test_oversized_schedule_is_rejected() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    let notification_id = app.request_verification(&student_id).await;

    let mut body = schedule(&notification_id);
    body["meetingLink"] = json!(format!("https://meet.example.com/{}", "x".repeat(4096)));

    let (status, response) = app.post("/v1/notification-accept", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Input exceeds allowed limits");
}

#[tokio::test]
async fn test_malformed_body_returns_message() {
    let app = TestApp::open();

    let (status, body) = app
        .post("/v1/notification-request", json!({"studentId": 42}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));

    let (status, body) = app
        .post_raw(
            "/v1/notification-reject",
            Some("application/json"),
            r#"{"notificationId": "#,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = app
        .post_raw("/v1/notification-mark-read", None, r#"{"notificationId": "x"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = app
        .post_raw("/v1/students", Some("application/json"), "not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_concurrent_accept_and_reject() {
    let app = TestApp::open();
    let student_id = app.register_student("Asha", "asha@example.com", &[]).await;
    let notification_id = app.request_verification(&student_id).await;

    let ((accept_status, accept_body), (reject_status, reject_body)) = tokio::join!(
        app.post("/v1/notification-accept", schedule(&notification_id)),
        app.post(
            "/v1/notification-reject",
            json!({"notificationId": notification_id})
        ),
    );

    let mut statuses = [accept_status, reject_status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);

    let loser = if accept_status == StatusCode::OK {
        reject_body
    } else {
        accept_body
    };
    assert_eq!(loser["message"], "This request has already been processed");
}
