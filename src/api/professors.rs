use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use super::MessageResponse;
use crate::db::professors;
use crate::error::AppError;
use crate::models::*;
use crate::services::{AuthService, ProfessorIdentity};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfessorList {
    professors: Vec<Professor>,
}

#[derive(Serialize)]
pub struct ProfessorLoginResponse {
    message: &'static str,
    #[serde(flatten)]
    identity: ProfessorIdentity,
}

pub async fn list_professors(State(state): State<AppState>) -> Result<Json<ProfessorList>, AppError> {
    let professors = professors::fetch_professors(&state.db).await?;
    Ok(Json(ProfessorList { professors }))
}

pub async fn create_professor(
    State(state): State<AppState>,
    Json(req): Json<NewProfessorRequest>,
) -> Result<Json<Professor>, AppError> {
    let professor = professors::insert_professor(&state.db, &state.credentials, req).await?;
    Ok(Json(professor))
}

pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Professor>, AppError> {
    let professor = professors::find_professor_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Professor"))?;
    Ok(Json(professor))
}

pub async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProfessorRequest>,
) -> Result<Json<Professor>, AppError> {
    let professor = professors::update_professor(&state.db, &state.credentials, id, req).await?;
    Ok(Json(professor))
}

pub async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    professors::delete_professor(&state.db, id).await?;
    Ok(MessageResponse::new("Professor deleted successfully"))
}

pub async fn login_professor(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ProfessorLoginResponse>, AppError> {
    let service = AuthService::new(state.db.clone(), state.credentials.clone());
    let identity = service.login_professor(req).await?;
    Ok(Json(ProfessorLoginResponse {
        message: "Login successful",
        identity,
    }))
}
