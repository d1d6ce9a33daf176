use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::credentials::CredentialStore;
use crate::db::{admins, professors, students};
use crate::error::AppError;
use crate::models::{Admin, LoginRequest, NewAdminRequest, StudentLoginRequest};

/// Issued to admins on login. No session state backs it.
pub const PLACEHOLDER_TOKEN: &str = "dummy-token";

#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub admin_id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
    pub role: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessorIdentity {
    pub professor_id: i64,
    pub email: String,
    pub role: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentIdentity {
    pub student_id: i64,
    pub name: String,
    pub role: &'static str,
}

/// Registration and the three login flows.
///
/// Admin and professor logins answer an unknown email and a wrong password
/// with the same `InvalidCredentials`, and both paths run one password
/// verification.
pub struct AuthService {
    db: SqlitePool,
    credentials: CredentialStore,
}

impl AuthService {
    pub fn new(db: SqlitePool, credentials: CredentialStore) -> Self {
        Self { db, credentials }
    }

    pub async fn register_admin(&self, req: NewAdminRequest) -> Result<Admin, AppError> {
        admins::insert_admin(&self.db, &self.credentials, req).await
    }

    pub async fn login_admin(&self, req: LoginRequest) -> Result<AdminIdentity, AppError> {
        let email = req.email.trim();
        let Some(admin) = admins::find_admin_by_email(&self.db, email).await? else {
            self.credentials.verify_decoy(&req.password).await;
            warn!("admin login rejected");
            return Err(AppError::InvalidCredentials);
        };

        if !self.credentials.verify(&req.password, &admin.password).await? {
            warn!("admin login rejected");
            return Err(AppError::InvalidCredentials);
        }

        info!(admin_id = admin.admin_id, "admin logged in");
        Ok(AdminIdentity {
            admin_id: admin.admin_id,
            name: admin.name,
            email: admin.email,
            token: PLACEHOLDER_TOKEN.to_string(),
            role: "admin",
        })
    }

    pub async fn login_professor(&self, req: LoginRequest) -> Result<ProfessorIdentity, AppError> {
        let Some(professor) = professors::find_professor_by_email(&self.db, &req.email).await? else {
            self.credentials.verify_decoy(&req.password).await;
            warn!("professor login rejected");
            return Err(AppError::InvalidCredentials);
        };

        if !self.credentials.verify(&req.password, &professor.password).await? {
            warn!("professor login rejected");
            return Err(AppError::InvalidCredentials);
        }

        info!(professor_id = professor.professor_id, "professor logged in");
        Ok(ProfessorIdentity {
            professor_id: professor.professor_id,
            email: professor.email,
            role: "professor",
        })
    }

    /// Students are matched on name and email only; any password sent along
    /// is ignored.
    pub async fn login_student(&self, req: StudentLoginRequest) -> Result<StudentIdentity, AppError> {
        let Some(student) =
            students::find_student_by_name_and_email(&self.db, &req.name, &req.email).await?
        else {
            warn!("student login rejected");
            return Err(AppError::InvalidCredentials);
        };

        info!(students_id = student.students_id, "student logged in");
        Ok(StudentIdentity {
            student_id: student.students_id,
            name: student.name,
            role: "student",
        })
    }
}
