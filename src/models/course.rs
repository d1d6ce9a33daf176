use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub course_field: String,
    pub course_duration: String,
    pub course_price: String,
    pub professor_id: i64,
    pub created_at: String,
}

/// A course joined with its owning professor, as listed by `/courses`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CourseWithProfessor {
    pub course_id: i64,
    pub course_name: String,
    pub course_field: String,
    pub course_duration: String,
    pub course_price: String,
    pub professor_id: i64,
    pub created_at: String,
    pub professor_name: String,
    pub professor_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub course_name: String,
    pub course_field: String,
    pub course_duration: String,
    pub course_price: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub course_name: Option<String>,
    pub course_field: Option<String>,
    pub course_duration: Option<String>,
    pub course_price: Option<String>,
    pub professor_id: Option<i64>,
}
