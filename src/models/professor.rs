use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Professor {
    pub professor_id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfessorRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfessorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
}
