// src/handlers/clubs.rs

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

use crate::{common::error::AppError, config::AppState};

// Gestión de tenants. Todo este módulo vive detrás del guard de
// super-admin: no hay resolución por subdominio acá.

#[derive(Debug, Deserialize, Validate)]
pub struct CrearClubPayload {
    #[validate(length(min = 1, message = "El nombre del club es obligatorio."))]
    pub nombre: String,
    #[validate(length(min = 1, max = 63, message = "El subdominio es obligatorio."))]
    pub subdominio: String,
}

fn subdominio_valido(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !s.starts_with('-')
        && !s.ends_with('-')
}

pub async fn crear_club(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearClubPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let subdominio = payload.subdominio.to_lowercase();
    if !subdominio_valido(&subdominio) {
        return Err(AppError::InvalidInput(
            "El subdominio solo admite minúsculas, dígitos y guiones.".to_string(),
        ));
    }

    let club = app_state
        .club_repo
        .create_club(&app_state.db_pool, &payload.nombre, &subdominio)
        .await?;

    // el árbol de carpetas de media se aprovisiona junto con el club
    app_state.media_service.provisionar_club(club.id).await?;

    tracing::info!(club_id = %club.id, subdominio = %club.subdominio, "Club creado");
    Ok((StatusCode::CREATED, Json(club)))
}

pub async fn listar_clubs(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clubs = app_state.club_repo.list_all().await?;
    Ok(Json(clubs))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarClubPayload {
    #[validate(length(min = 1, message = "El nombre del club es obligatorio."))]
    pub nombre: String,
    pub porcentaje_anticipo: Decimal,
    pub texto_bienvenida: Option<String>,
    pub color_primario: Option<String>,
    pub color_secundario: Option<String>,
}

pub async fn actualizar_club(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarClubPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.porcentaje_anticipo < Decimal::ZERO
        || payload.porcentaje_anticipo > Decimal::from(100)
    {
        return Err(AppError::InvalidInput(
            "El porcentaje de anticipo debe estar entre 0 y 100.".to_string(),
        ));
    }

    let club = app_state
        .club_repo
        .update_datos(
            id,
            &payload.nombre,
            payload.porcentaje_anticipo,
            payload.texto_bienvenida.as_deref(),
            payload.color_primario.as_deref(),
            payload.color_secundario.as_deref(),
        )
        .await?;

    Ok(Json(club))
}

pub async fn desactivar_club(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let club = app_state.club_repo.desactivar(id).await?;
    tracing::info!(club_id = %club.id, "Club desactivado");
    Ok(Json(club))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdominios_validos() {
        assert!(subdominio_valido("padel-norte"));
        assert!(subdominio_valido("club123"));
        assert!(!subdominio_valido(""));
        assert!(!subdominio_valido("-feo"));
        assert!(!subdominio_valido("feo-"));
        assert!(!subdominio_valido("con espacios"));
        assert!(!subdominio_valido("Mayusculas"));
    }
}
