use serde::{Deserialize, Serialize};

/// Email + password login used by admins and professors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Students log in by name and email. A password may be sent but is not checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentLoginRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}
