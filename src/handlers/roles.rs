// src/handlers/roles.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{rbac::RolContext, tenancy::ClubContext},
    models::membresia::RolClub,
};

#[derive(Debug, Deserialize, Validate)]
pub struct AsignarRolPayload {
    #[validate(email(message = "El e-mail no es válido."))]
    pub email: String,
    pub rol: RolClub,
}

/// Asigna (o cambia) el rol de un usuario registrado en este club.
/// Escribir roles es exclusivo del admin del club.
pub async fn asignar_rol(
    State(app_state): State<AppState>,
    club: ClubContext,
    Extension(rol_caller): Extension<RolContext>,
    Json(payload): Json<AsignarRolPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if rol_caller.0 != RolClub::Admin {
        return Err(AppError::Forbidden(
            "Asignar roles requiere rol admin.".to_string(),
        ));
    }

    let user = app_state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;

    let membresia = app_state
        .membresia_repo
        .asignar(&app_state.db_pool, user.id, club.0.id, payload.rol)
        .await?;

    Ok((StatusCode::CREATED, Json(membresia)))
}

pub async fn listar_membresias(
    State(app_state): State<AppState>,
    club: ClubContext,
) -> Result<impl IntoResponse, AppError> {
    let membresias = app_state.membresia_repo.list_por_club(club.0.id).await?;
    Ok(Json(membresias))
}

pub async fn quitar_membresia(
    State(app_state): State<AppState>,
    club: ClubContext,
    Extension(rol_caller): Extension<RolContext>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if rol_caller.0 != RolClub::Admin {
        return Err(AppError::Forbidden(
            "Quitar membresías requiere rol admin.".to_string(),
        ));
    }

    app_state.membresia_repo.quitar(user_id, club.0.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
