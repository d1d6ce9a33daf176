use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use super::MessageResponse;
use crate::db::admins;
use crate::error::AppError;
use crate::models::*;
use crate::services::{AdminIdentity, AuthService};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AdminRegistered {
    message: &'static str,
    admin_id: i64,
    name: String,
    email: String,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    message: &'static str,
    #[serde(flatten)]
    identity: AdminIdentity,
}

#[derive(Serialize)]
pub struct AdminList {
    admins: Vec<Admin>,
}

pub async fn register_admin(
    State(state): State<AppState>,
    Json(req): Json<NewAdminRequest>,
) -> Result<Json<AdminRegistered>, AppError> {
    let service = AuthService::new(state.db.clone(), state.credentials.clone());
    let admin = service.register_admin(req).await?;
    Ok(Json(AdminRegistered {
        message: "Admin registered successfully",
        admin_id: admin.admin_id,
        name: admin.name,
        email: admin.email,
    }))
}

pub async fn login_admin(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let service = AuthService::new(state.db.clone(), state.credentials.clone());
    let identity = service.login_admin(req).await?;
    Ok(Json(AdminLoginResponse {
        message: "Login successful",
        identity,
    }))
}

pub async fn list_admins(State(state): State<AppState>) -> Result<Json<AdminList>, AppError> {
    let admins = admins::fetch_admins(&state.db).await?;
    Ok(Json(AdminList { admins }))
}

pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Admin>, AppError> {
    let admin = admins::find_admin_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Admin"))?;
    Ok(Json(admin))
}

pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAdminRequest>,
) -> Result<Json<Admin>, AppError> {
    let admin = admins::update_admin(&state.db, &state.credentials, id, req).await?;
    Ok(Json(admin))
}

pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    admins::delete_admin(&state.db, id).await?;
    Ok(MessageResponse::new("Admin deleted successfully"))
}
