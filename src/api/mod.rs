mod admins;
mod courses;
mod professors;
mod students;

use axum::routing::post;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test-db", get(test_db))
        .route("/addstudent", post(students::add_student))
        .route("/loginstudent", post(students::login_student))
        .route("/profile", get(students::profile))
        .route("/admin/register", post(admins::register_admin))
        .route("/admin/login", post(admins::login_admin))
        .route("/admin/admins", get(admins::list_admins))
        .route(
            "/admin/admins/{id}",
            get(admins::get_admin)
                .put(admins::update_admin)
                .delete(admins::delete_admin),
        )
        .route(
            "/admin/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/admin/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/admin/professors",
            get(professors::list_professors).post(professors::create_professor),
        )
        .route(
            "/admin/professors/{id}",
            get(professors::get_professor)
                .put(professors::update_professor)
                .delete(professors::delete_professor),
        )
        .route("/auth/professor/login", post(professors::login_professor))
        .route("/addcourse", post(courses::add_course))
        .route("/courses", get(courses::list_courses))
        .route("/admin/courses", get(courses::list_courses))
        .route(
            "/admin/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Student Management API",
        "endpoints": {
            "test_db": "/test-db",
            "add_student": "/addstudent",
            "login_student": "/loginstudent",
            "student_profile": "/profile",
            "add_course": "/addcourse",
            "all_courses": "/courses",
            "admin_login": "/admin/login",
            "admin_register": "/admin/register",
            "admin_students": "/admin/students",
            "admin_professors": "/admin/professors",
            "admin_courses": "/admin/courses",
            "admin_admins": "/admin/admins",
            "professor_login": "/auth/professor/login"
        }
    }))
}

async fn test_db(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(MessageResponse::new("Database connection is working"))
}
