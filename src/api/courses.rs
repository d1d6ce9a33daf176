use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::db::courses;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddCourseParams {
    professor_id: i64,
}

#[derive(Serialize)]
pub struct CourseList {
    courses: Vec<CourseWithProfessor>,
}

#[derive(Serialize)]
pub struct CourseCreated {
    message: &'static str,
    course: Course,
}

pub async fn add_course(
    State(state): State<AppState>,
    Query(params): Query<AddCourseParams>,
    Json(req): Json<NewCourseRequest>,
) -> Result<Json<CourseCreated>, AppError> {
    let course = courses::insert_course(&state.db, params.professor_id, req).await?;
    Ok(Json(CourseCreated {
        message: "Course added successfully",
        course,
    }))
}

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<CourseList>, AppError> {
    let courses = courses::fetch_courses_with_professor(&state.db).await?;
    Ok(Json(CourseList { courses }))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let course = courses::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Course"))?;
    Ok(Json(course))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = courses::update_course(&state.db, id, req).await?;
    Ok(Json(course))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    courses::delete_course(&state.db, id).await?;
    Ok(MessageResponse::new("Course deleted successfully"))
}
