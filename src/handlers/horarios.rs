// src/handlers/horarios.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveTime;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::tenancy::ClubContext,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CrearHorarioPayload {
    pub cancha_id: Uuid,
    #[validate(length(min = 1, message = "El nombre del horario es obligatorio."))]
    pub nombre: String,
    pub dia_semana: i16,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
}

pub async fn crear_horario(
    State(app_state): State<AppState>,
    club: ClubContext,
    Json(payload): Json<CrearHorarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !(0..=6).contains(&payload.dia_semana) {
        return Err(AppError::InvalidInput(
            "dia_semana debe estar entre 0 (domingo) y 6 (sábado).".to_string(),
        ));
    }
    if payload.hora_fin <= payload.hora_inicio {
        return Err(AppError::InvalidInput(
            "El rango horario es inválido: el fin debe ser posterior al inicio.".to_string(),
        ));
    }

    // la cancha tiene que existir en este club
    app_state
        .cancha_repo
        .find(club.0.id, payload.cancha_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cancha no encontrada.".to_string()))?;

    let horario = app_state
        .horario_repo
        .create(
            club.0.id,
            payload.cancha_id,
            &payload.nombre,
            payload.dia_semana,
            payload.hora_inicio,
            payload.hora_fin,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(horario)))
}

pub async fn listar_horarios(
    State(app_state): State<AppState>,
    club: ClubContext,
) -> Result<impl IntoResponse, AppError> {
    let horarios = app_state.horario_repo.list_por_club(club.0.id).await?;
    Ok(Json(horarios))
}

pub async fn desactivar_horario(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.horario_repo.desactivar(club.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
