use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::db::students;
use crate::error::AppError;
use crate::models::*;
use crate::services::{AuthService, StudentIdentity};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfileParams {
    student_id: i64,
}

#[derive(Serialize)]
pub struct StudentList {
    students: Vec<Student>,
}

#[derive(Serialize)]
pub struct StudentLoginResponse {
    message: &'static str,
    #[serde(flatten)]
    identity: StudentIdentity,
}

pub async fn add_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    students::insert_student(&state.db, req).await?;
    Ok(MessageResponse::new("Student added successfully"))
}

pub async fn login_student(
    State(state): State<AppState>,
    Json(req): Json<StudentLoginRequest>,
) -> Result<Json<StudentLoginResponse>, AppError> {
    let service = AuthService::new(state.db.clone(), state.credentials.clone());
    let identity = service.login_student(req).await?;
    Ok(Json(StudentLoginResponse {
        message: "Login successful",
        identity,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileParams>,
) -> Result<Json<StudentProfile>, AppError> {
    let student = students::find_student_by_id(&state.db, params.student_id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;
    Ok(Json(student.into()))
}

pub async fn list_students(State(state): State<AppState>) -> Result<Json<StudentList>, AppError> {
    let students = students::fetch_students(&state.db).await?;
    Ok(Json(StudentList { students }))
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    students::insert_student(&state.db, req).await?;
    Ok(MessageResponse::new("Student created successfully"))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = students::find_student_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;
    Ok(Json(student))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    students::update_student(&state.db, id, req).await?;
    Ok(MessageResponse::new("Student updated successfully"))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    students::delete_student(&state.db, id).await?;
    Ok(MessageResponse::new("Student deleted successfully"))
}
