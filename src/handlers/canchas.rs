// src/handlers/canchas.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::tenancy::ClubContext,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CrearCanchaPayload {
    #[validate(length(min = 1, message = "El nombre de la cancha es obligatorio."))]
    pub nombre: String,
    #[serde(default = "deporte_default")]
    pub deporte: String,
    pub categoria: Option<String>,
    #[serde(default = "capacidad_default")]
    pub capacidad: i32,
    pub precio_base: Decimal,
    #[serde(default)]
    pub exterior: bool,
}

fn deporte_default() -> String {
    "padel".to_string()
}

fn capacidad_default() -> i32 {
    4
}

pub async fn crear_cancha(
    State(app_state): State<AppState>,
    club: ClubContext,
    Json(payload): Json<CrearCanchaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.precio_base <= Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "El precio base debe ser mayor que cero.".to_string(),
        ));
    }

    let cancha = app_state
        .cancha_repo
        .create(
            club.0.id,
            &payload.nombre,
            &payload.deporte,
            payload.categoria.as_deref(),
            payload.capacidad,
            payload.precio_base,
            payload.exterior,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cancha)))
}

pub async fn listar_canchas(
    State(app_state): State<AppState>,
    club: ClubContext,
) -> Result<impl IntoResponse, AppError> {
    let canchas = app_state.cancha_repo.list_por_club(club.0.id).await?;
    Ok(Json(canchas))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarCanchaPayload {
    #[validate(length(min = 1, message = "El nombre de la cancha es obligatorio."))]
    pub nombre: String,
    pub categoria: Option<String>,
    pub capacidad: i32,
    pub precio_base: Decimal,
    pub exterior: bool,
    pub activa: bool,
}

pub async fn actualizar_cancha(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarCanchaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cancha = app_state
        .cancha_repo
        .update(
            club.0.id,
            id,
            &payload.nombre,
            payload.categoria.as_deref(),
            payload.capacidad,
            payload.precio_base,
            payload.exterior,
            payload.activa,
        )
        .await?;

    Ok(Json(cancha))
}

/// Baja lógica: la cancha desaparece de los listados pero sus reservas
/// históricas quedan.
pub async fn eliminar_cancha(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cancha_repo.baja_logica(club.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
