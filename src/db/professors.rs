use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{begin_write, now, present};
use crate::credentials::CredentialStore;
use crate::error::AppError;
use crate::models::{NewProfessorRequest, Professor, UpdateProfessorRequest};

const ENTITY: &str = "Professor";
const PROFESSOR_COLUMNS: &str = "professor_id, name, email, department, password, created_at";

pub async fn fetch_professors(db: &SqlitePool) -> Result<Vec<Professor>, sqlx::Error> {
    sqlx::query_as::<_, Professor>(&format!("SELECT {PROFESSOR_COLUMNS} FROM professors"))
    .fetch_all(db)
    .await
}

pub async fn find_professor_by_id(db: &SqlitePool, id: i64) -> Result<Option<Professor>, sqlx::Error> {
    sqlx::query_as::<_, Professor>(&format!(
        "SELECT {PROFESSOR_COLUMNS} FROM professors WHERE professor_id = ?1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_professor_by_email(db: &SqlitePool, email: &str) -> Result<Option<Professor>, sqlx::Error> {
    sqlx::query_as::<_, Professor>(&format!(
        "SELECT {PROFESSOR_COLUMNS} FROM professors WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn insert_professor(
    db: &SqlitePool,
    credentials: &CredentialStore,
    req: NewProfessorRequest,
) -> Result<Professor, AppError> {
    let password = credentials.hash(&req.password).await?;
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT professor_id FROM professors WHERE email = ?1")
            .bind(&req.email)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_some() {
        return Err(AppError::Duplicate(ENTITY));
    }

    let created_at = now();

    let professor_id = sqlx::query(
        r#"
        INSERT INTO professors (name, email, department, password, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.department)
    .bind(&password)
    .bind(&created_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?
    .last_insert_rowid();

    tx.commit().await?;
    info!(professor_id, "professor created");

    Ok(Professor {
        professor_id,
        name: req.name,
        email: req.email,
        department: req.department,
        password,
        created_at,
    })
}

/// Applies the non-empty fields of `req`. A new password is hashed before the
/// write transaction starts.
pub async fn update_professor(
    db: &SqlitePool,
    credentials: &CredentialStore,
    id: i64,
    req: UpdateProfessorRequest,
) -> Result<Professor, AppError> {
    let password = match present(req.password) {
        Some(password) => Some(credentials.hash(&password).await?),
        None => None,
    };
    let mut tx = begin_write(db).await?;

    let mut current = sqlx::query_as::<_, Professor>(&format!(
        "SELECT {PROFESSOR_COLUMNS} FROM professors WHERE professor_id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound(ENTITY))?;

    let name = present(req.name);
    let email = present(req.email);
    let department = present(req.department);

    if name.is_none() && email.is_none() && department.is_none() && password.is_none() {
        return Err(AppError::NoFieldsToUpdate);
    }

    if let Some(name) = name {
        current.name = name;
    }
    if let Some(email) = email {
        current.email = email;
    }
    if department.is_some() {
        current.department = department;
    }
    if let Some(password) = password {
        current.password = password;
    }

    sqlx::query(
        r#"
        UPDATE professors
        SET name = ?1,
            email = ?2,
            department = ?3,
            password = ?4
        WHERE professor_id = ?5
        "#
    )
    .bind(&current.name)
    .bind(&current.email)
    .bind(&current.department)
    .bind(&current.password)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?;

    tx.commit().await?;
    info!(professor_id = id, "professor updated");

    Ok(current)
}

/// Deletion is refused while any course still belongs to the professor.
pub async fn delete_professor(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT professor_id FROM professors WHERE professor_id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_none() {
        return Err(AppError::NotFound(ENTITY));
    }

    let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE professor_id = ?1")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if courses > 0 {
        warn!(professor_id = id, courses, "refusing to delete professor with courses");
        return Err(AppError::Conflict(format!(
            "Professor still owns {} course(s)",
            courses
        )));
    }

    sqlx::query("DELETE FROM professors WHERE professor_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(ENTITY, e))?;

    tx.commit().await?;
    info!(professor_id = id, "professor deleted");

    Ok(())
}
