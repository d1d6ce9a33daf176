use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use student_management::api::router;
use student_management::config::HashingCost;
use student_management::credentials::CredentialStore;
use student_management::state::AppState;

async fn app() -> Router {
    app_with(database().await)
}

async fn database() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn app_with(pool: SqlitePool) -> Router {
    let credentials = CredentialStore::new(&HashingCost {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid params");

    router(AppState { db: pool, credentials })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_professor(app: &Router, name: &str, email: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/admin/professors",
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["professor_id"].as_i64().expect("professor_id")
}

#[tokio::test]
async fn test_root_and_db_check() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["admin_login"], "/admin/login");

    let (status, body) = send(&app, "GET", "/test-db", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Database connection is working");
}

#[tokio::test]
async fn test_database_failure_hides_driver_error() {
    let pool = database().await;
    let app = app_with(pool.clone());
    pool.close().await;

    let (status, body) = send(&app, "GET", "/test-db", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");
    assert_eq!(body["error"], "500 Internal Server Error");

    let (status, body) = send(&app, "GET", "/admin/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");
}

#[tokio::test]
async fn test_admin_register_and_login() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/admin/register",
        Some(json!({ "name": "A", "email": "a@x.com", "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@x.com");
    assert!(body["admin_id"].as_i64().is_some());

    let (status, body) = send(
        &app,
        "POST",
        "/admin/login",
        Some(json!({ "email": "a@x.com", "password": "p" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["token"], "dummy-token");

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/admin/login",
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/admin/login",
        Some(json!({ "email": "ghost@x.com", "password": "p" })),
    )
    .await;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["detail"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_register_duplicate_email() {
    let app = app().await;

    let payload = json!({ "name": "A", "email": "a@x.com", "password": "p" });
    let (status, _) = send(&app, "POST", "/admin/register", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/admin/register",
        Some(json!({ "name": "B", "email": "a@x.com", "password": "q" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Admin already exists");
}

#[tokio::test]
async fn test_professor_course_listing() {
    let app = app().await;
    let professor_id = create_professor(&app, "P", "p@x.com", "pw").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/addcourse?professor_id={professor_id}"),
        Some(json!({
            "course_name": "CS1",
            "course_field": "Computer Science",
            "course_duration": "12 weeks",
            "course_price": "100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course added successfully");
    assert_eq!(body["course"]["course_name"], "CS1");
    assert_eq!(body["course"]["professor_id"], professor_id);

    let (status, body) = send(&app, "GET", "/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    let courses = body["courses"].as_array().expect("courses array");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["course_name"], "CS1");
    assert_eq!(courses[0]["professor_name"], "P");
    assert_eq!(courses[0]["professor_email"], "p@x.com");
}

#[tokio::test]
async fn test_add_course_unknown_professor() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/addcourse?professor_id=12345",
        Some(json!({
            "course_name": "CS1",
            "course_field": "CS",
            "course_duration": "1 week",
            "course_price": "0"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Professor not found");

    let (_, body) = send(&app, "GET", "/courses", None).await;
    assert!(body["courses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_professor_lifecycle() {
    let app = app().await;
    let professor_id = create_professor(&app, "P", "p@x.com", "pw").await;

    let (status, body) = send(&app, "GET", &format!("/admin/professors/{professor_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "p@x.com");
    assert!(body.get("password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/admin/professors",
        Some(json!({ "name": "Other", "email": "p@x.com", "department": "Art", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Professor already exists");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/professors/{professor_id}"),
        Some(json!({ "password": "new-pw", "department": "Math" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "Math");

    let (status, _) = send(
        &app,
        "POST",
        "/auth/professor/login",
        Some(json!({ "email": "p@x.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/auth/professor/login",
        Some(json!({ "email": "p@x.com", "password": "new-pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["professor_id"], professor_id);
    assert_eq!(body["role"], "professor");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/professors/{professor_id}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No fields to update");

    let (status, _) = send(&app, "DELETE", &format!("/admin/professors/{professor_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/admin/professors/{professor_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_professor_with_courses_cannot_be_deleted() {
    let app = app().await;
    let professor_id = create_professor(&app, "P", "p@x.com", "pw").await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/addcourse?professor_id={professor_id}"),
        Some(json!({
            "course_name": "CS1",
            "course_field": "CS",
            "course_duration": "1 week",
            "course_price": "0"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/admin/professors/{professor_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, "GET", "/courses", None).await;
    assert_eq!(body["courses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_student_admin_crud() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/admin/students",
        Some(json!({
            "name": "S",
            "age": 20,
            "email": "s@x.com",
            "department": "Math",
            "password": "plain"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student created successfully");

    let (status, body) = send(
        &app,
        "POST",
        "/admin/students",
        Some(json!({ "name": "T", "age": 21, "email": "s@x.com", "department": "Art" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Student already exists");

    let (status, body) = send(&app, "GET", "/admin/students", None).await;
    assert_eq!(status, StatusCode::OK);
    let students = body["students"].as_array().expect("students array");
    assert_eq!(students.len(), 1);
    assert!(students[0].get("password").is_none());
    let id = students[0]["students_id"].as_i64().unwrap();

    let (status, body) = send(&app, "PUT", &format!("/admin/students/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No fields to update");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/students/{id}"),
        Some(json!({ "age": 22 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student updated successfully");

    let (status, body) = send(&app, "GET", &format!("/admin/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 22);
    assert_eq!(body["name"], "S");

    let (status, body) = send(&app, "GET", &format!("/profile?student_id={id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student_id"], id);
    assert_eq!(body["department"], "Math");

    let (status, _) = send(&app, "DELETE", &format!("/admin/students/{}", id + 1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = send(&app, "GET", "/admin/students", None).await;
    assert_eq!(body["students"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "DELETE", &format!("/admin/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let (status, body) = send(&app, "GET", &format!("/profile?student_id={id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Student not found");
}

#[tokio::test]
async fn test_student_signup_and_login() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/addstudent",
        Some(json!({
            "name": "S",
            "age": 20,
            "email": "s@x.com",
            "department": "Math",
            "password": "secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student added successfully");

    // Password is not part of the student login check.
    let (status, body) = send(
        &app,
        "POST",
        "/loginstudent",
        Some(json!({ "name": "S", "email": "s@x.com", "password": "anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "S");
    assert_eq!(body["role"], "student");
    assert!(body["student_id"].as_i64().is_some());

    let (status, body) = send(
        &app,
        "POST",
        "/loginstudent",
        Some(json!({ "name": "Nope", "email": "s@x.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_management_routes() {
    let app = app().await;

    let (_, body) = send(
        &app,
        "POST",
        "/admin/register",
        Some(json!({ "name": "A", "email": "a@x.com", "password": "p" })),
    )
    .await;
    let id = body["admin_id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/admin/admins", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admins"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/admins/{id}"),
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
    assert!(body.get("password").is_none());

    let (status, _) = send(&app, "DELETE", &format!("/admin/admins/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/admin/admins/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_into_taken_email_is_rejected() {
    let app = app().await;
    create_professor(&app, "P", "p@x.com", "pw").await;
    let other = create_professor(&app, "Q", "q@x.com", "pw").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/professors/{other}"),
        Some(json!({ "email": "p@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Professor already exists");

    send(
        &app,
        "POST",
        "/admin/register",
        Some(json!({ "name": "A", "email": "a@x.com", "password": "p" })),
    )
    .await;
    let (_, body) = send(
        &app,
        "POST",
        "/admin/register",
        Some(json!({ "name": "B", "email": "b@x.com", "password": "p" })),
    )
    .await;
    let admin = body["admin_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/admin/admins/{admin}"),
        Some(json!({ "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Admin already exists");
}
