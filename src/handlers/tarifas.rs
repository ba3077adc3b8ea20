// src/handlers/tarifas.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::ClubContext,
    models::tarifa::Segmento,
    services::pricing::duracion_slot,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CrearTarifarioPayload {
    #[validate(length(min = 1, message = "El nombre del tarifario es obligatorio."))]
    pub nombre: String,
}

pub async fn crear_tarifario(
    State(app_state): State<AppState>,
    club: ClubContext,
    Json(payload): Json<CrearTarifarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tarifario = app_state
        .tarifa_repo
        .create_tarifario(club.0.id, &payload.nombre)
        .await?;

    Ok((StatusCode::CREATED, Json(tarifario)))
}

pub async fn listar_tarifarios(
    State(app_state): State<AppState>,
    club: ClubContext,
) -> Result<impl IntoResponse, AppError> {
    let tarifarios = app_state.tarifa_repo.list_tarifarios(club.0.id).await?;
    Ok(Json(tarifarios))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearReglaPayload {
    pub segmento: Segmento,
    pub dia_semana: Option<i16>,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    #[serde(default)]
    pub cruza_medianoche: bool,
    pub duracion_min: i32,
    pub precio: Decimal,
    #[serde(default)]
    pub prioridad: i32,
    pub vigente_desde: Option<NaiveDate>,
    pub vigente_hasta: Option<NaiveDate>,
}

pub async fn crear_regla(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(tarifario_id): Path<Uuid>,
    Json(payload): Json<CrearReglaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // El tarifario tiene que ser de este club
    app_state
        .tarifa_repo
        .find_tarifario(club.0.id, tarifario_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarifario no encontrado.".to_string()))?;

    if let Some(dia) = payload.dia_semana {
        if !(0..=6).contains(&dia) {
            return Err(AppError::InvalidInput(
                "dia_semana debe estar entre 0 (domingo) y 6 (sábado).".to_string(),
            ));
        }
    }
    if payload.duracion_min <= 0 {
        return Err(AppError::InvalidInput(
            "La duración debe ser mayor que cero.".to_string(),
        ));
    }
    // misma validación de ventana que usa el matcher
    duracion_slot(payload.hora_inicio, payload.hora_fin, payload.cruza_medianoche)?;

    let regla = app_state
        .tarifa_repo
        .create_regla(
            tarifario_id,
            payload.segmento,
            payload.dia_semana,
            payload.hora_inicio,
            payload.hora_fin,
            payload.cruza_medianoche,
            payload.duracion_min,
            payload.precio,
            payload.prioridad,
            payload.vigente_desde,
            payload.vigente_hasta,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(regla)))
}

pub async fn listar_reglas(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(tarifario_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .tarifa_repo
        .find_tarifario(club.0.id, tarifario_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarifario no encontrado.".to_string()))?;

    let reglas = app_state.tarifa_repo.list_reglas(tarifario_id).await?;
    Ok(Json(reglas))
}

pub async fn desactivar_regla(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path((tarifario_id, regla_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .tarifa_repo
        .find_tarifario(club.0.id, tarifario_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tarifario no encontrado.".to_string()))?;

    app_state
        .tarifa_repo
        .desactivar_regla(tarifario_id, regla_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
