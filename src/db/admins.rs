use sqlx::SqlitePool;
use tracing::info;

use super::{begin_write, now, present};
use crate::credentials::CredentialStore;
use crate::error::AppError;
use crate::models::{Admin, NewAdminRequest, UpdateAdminRequest};

const ENTITY: &str = "Admin";
const ADMIN_COLUMNS: &str = "admin_id, name, email, password, created_at";

pub async fn fetch_admins(db: &SqlitePool) -> Result<Vec<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLUMNS} FROM admins"))
        .fetch_all(db)
        .await
}

pub async fn find_admin_by_id(db: &SqlitePool, id: i64) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!(
        "SELECT {ADMIN_COLUMNS} FROM admins WHERE admin_id = ?1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_admin_by_email(db: &SqlitePool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!(
        "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn insert_admin(
    db: &SqlitePool,
    credentials: &CredentialStore,
    req: NewAdminRequest,
) -> Result<Admin, AppError> {
    let password = credentials.hash(&req.password).await?;
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT admin_id FROM admins WHERE email = ?1")
        .bind(&req.email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(AppError::Duplicate(ENTITY));
    }

    let created_at = now();

    let admin_id = sqlx::query(
        "INSERT INTO admins (name, email, password, created_at) VALUES (?1, ?2, ?3, ?4)"
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&password)
    .bind(&created_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?
    .last_insert_rowid();

    tx.commit().await?;
    info!(admin_id, "admin registered");

    Ok(Admin {
        admin_id,
        name: req.name,
        email: req.email,
        password,
        created_at,
    })
}

pub async fn update_admin(
    db: &SqlitePool,
    credentials: &CredentialStore,
    id: i64,
    req: UpdateAdminRequest,
) -> Result<Admin, AppError> {
    let password = match present(req.password) {
        Some(password) => Some(credentials.hash(&password).await?),
        None => None,
    };
    let mut tx = begin_write(db).await?;

    let mut current = sqlx::query_as::<_, Admin>(&format!(
        "SELECT {ADMIN_COLUMNS} FROM admins WHERE admin_id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound(ENTITY))?;

    let name = present(req.name);
    let email = present(req.email);

    if name.is_none() && email.is_none() && password.is_none() {
        return Err(AppError::NoFieldsToUpdate);
    }

    if let Some(name) = name {
        current.name = name;
    }
    if let Some(email) = email {
        current.email = email;
    }
    if let Some(password) = password {
        current.password = password;
    }

    sqlx::query("UPDATE admins SET name = ?1, email = ?2, password = ?3 WHERE admin_id = ?4")
        .bind(&current.name)
        .bind(&current.email)
        .bind(&current.password)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(ENTITY, e))?;

    tx.commit().await?;
    info!(admin_id = id, "admin updated");

    Ok(current)
}

pub async fn delete_admin(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> = sqlx::query_scalar("SELECT admin_id FROM admins WHERE admin_id = ?1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(AppError::NotFound(ENTITY));
    }

    sqlx::query("DELETE FROM admins WHERE admin_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(admin_id = id, "admin deleted");

    Ok(())
}
