// src/handlers/clientes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::tenancy::ClubContext,
};

// Clientes cargados a mano por el staff (no registrados en la plataforma)

#[derive(Debug, Deserialize, Validate)]
pub struct ClienteManualPayload {
    #[validate(length(min = 1, message = "El nombre del cliente es obligatorio."))]
    pub nombre: String,
    #[validate(email(message = "El e-mail no es válido."))]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub notas: Option<String>,
}

pub async fn crear_cliente(
    State(app_state): State<AppState>,
    club: ClubContext,
    Json(payload): Json<ClienteManualPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_repo
        .create(
            club.0.id,
            &payload.nombre,
            payload.email.as_deref(),
            payload.telefono.as_deref(),
            payload.notas.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

pub async fn listar_clientes(
    State(app_state): State<AppState>,
    club: ClubContext,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.cliente_repo.list_por_club(club.0.id).await?;
    Ok(Json(clientes))
}

pub async fn actualizar_cliente(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClienteManualPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_repo
        .update(
            club.0.id,
            id,
            &payload.nombre,
            payload.email.as_deref(),
            payload.telefono.as_deref(),
            payload.notas.as_deref(),
        )
        .await?;

    Ok(Json(cliente))
}
