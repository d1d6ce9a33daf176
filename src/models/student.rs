use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student row. The password is kept exactly as the client sent it and is
/// never serialized back out.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    pub students_id: i64,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub department: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentRequest {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// Shape returned by `/profile`.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub student_id: i64,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub department: String,
}

impl From<Student> for StudentProfile {
    fn from(student: Student) -> Self {
        Self {
            student_id: student.students_id,
            name: student.name,
            age: student.age,
            email: student.email,
            department: student.department,
        }
    }
}
