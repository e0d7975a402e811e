mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{Campus, PASSWORD, jwt_config, token_for};
use http_body_util::BodyExt;
use registrar::registrar_auth::Role;
use registrar::router::init_router;
use registrar::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    app: axum::Router,
    admin_token: String,
    professor_token: String,
    student_token: String,
    student_id: i32,
    other_student_id: i32,
    course_id: i32,
}

impl TestApp {
    async fn new() -> Self {
        let campus = Campus::new().await;
        let other = campus.add_student("grace@uni.edu", 50).await;

        let admin_token = token_for(campus.admin.id, &campus.admin.email, Role::Admin);
        let professor_token =
            token_for(campus.professor.id, &campus.professor.email, Role::Professor);
        let student_token = token_for(campus.student.id, &campus.student.email, Role::Student);
        let student_id = campus.student.id;
        let course_id = campus.course.id;

        let state = AppState::new(Arc::new(campus.store), jwt_config());

        Self {
            app: init_router(state),
            admin_token,
            professor_token,
            student_token,
            student_id,
            other_student_id: other.id,
            course_id,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Registrar API");
    assert!(body["paths"].get("/api/registrations/register").is_some());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "prof@uni.edu", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["user"]["role"], "professor");
}

#[tokio::test]
async fn test_login_missing_password_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "prof@uni.edu" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");
}

#[tokio::test]
async fn test_login_invalid_email_format_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "not-an-email", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/api/students", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");

    let (status, _) = app
        .send("GET", "/api/students", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_list_is_faculty_only() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send("GET", "/api/students", Some(&app.student_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("GET", "/api/students", Some(&app.professor_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert!(body[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_student_sees_only_their_own_record() {
    let app = TestApp::new().await;

    let own = format!("/api/students/{}", app.student_id);
    let (status, body) = app.send("GET", &own, Some(&app.student_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["e_wallet"], 500);

    let other = format!("/api/students/{}", app.other_student_id);
    let (status, _) = app.send("GET", &other, Some(&app.student_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send("GET", "/api/admin/pending", Some(&app.professor_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("GET", "/api/admin/pending", Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["students"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_enroll_and_review_over_http() {
    let app = TestApp::new().await;

    let (status, registration) = app
        .send(
            "POST",
            "/api/registrations/register",
            Some(&app.student_token),
            Some(json!({ "student_id": app.student_id, "course_id": app.course_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registration["approval_status"], "pending");

    let (status, body) = app
        .send(
            "POST",
            "/api/registrations/register",
            Some(&app.student_token),
            Some(json!({ "student_id": app.student_id, "course_id": app.course_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "already_exists");

    let review = format!(
        "/api/registrations/{}/approve?comments=Welcome",
        registration["id"]
    );
    let (status, _) = app.send("PUT", &review, Some(&app.student_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, approved) = app
        .send("PUT", &review, Some(&app.professor_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["approval_status"], "approved");
    assert_eq!(approved["comments"], "Welcome");

    let by_status = format!("/api/registrations/student/{}/status/approved", app.student_id);
    let (status, body) = app
        .send("GET", &by_status, Some(&app.student_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_student_cannot_enroll_someone_else() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            "POST",
            "/api/registrations/register",
            Some(&app.student_token),
            Some(json!({ "student_id": app.other_student_id, "course_id": app.course_id })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_insufficient_balance_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/registrations/register",
            Some(&app.professor_token),
            Some(json!({ "student_id": app.other_student_id, "course_id": app.course_id })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "business_rule_violation");
    assert_eq!(body["error"], "Insufficient wallet balance");
}

#[tokio::test]
async fn test_unknown_course_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send("GET", "/api/courses/999", Some(&app.student_token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No such course exists");
}

#[tokio::test]
async fn test_invalid_status_segment_is_bad_request() {
    let app = TestApp::new().await;

    let uri = format!("/api/registrations/course/{}/status/done", app.course_id);
    let (status, _) = app.send("GET", &uri, Some(&app.professor_token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
