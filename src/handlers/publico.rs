// src/handlers/publico.rs
//
// El sitio público de reservas: branding del club, canchas visibles,
// cotización de un slot y el draft de reserva en cookie firmada.

use axum::{Json, extract::{Query, State}, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::OptionalUser, tenancy::ClubContext},
    models::{club::ClubPublico, reserva::DraftReserva},
    services::{draft::DRAFT_COOKIE, pricing::segmento_para},
};

/// Branding del club resuelto por subdominio.
#[utoipa::path(
    get,
    path = "/api/public/club",
    responses(
        (status = 200, description = "Branding del club", body = ClubPublico),
        (status = 404, description = "Subdominio desconocido o club inactivo")
    )
)]
pub async fn get_club(club: ClubContext) -> Result<impl IntoResponse, AppError> {
    Ok(Json(ClubPublico::from(club.0)))
}

pub async fn list_canchas(
    State(app_state): State<AppState>,
    club: ClubContext,
) -> Result<impl IntoResponse, AppError> {
    let canchas = app_state.cancha_repo.list_activas(club.0.id).await?;
    Ok(Json(canchas))
}

// ---
// Cotización
// ---

#[derive(Debug, Deserialize, IntoParams)]
pub struct CotizacionParams {
    pub cancha_id: Uuid,
    /// AAAA-MM-DD
    pub fecha: NaiveDate,
    /// HH:MM:SS
    pub inicio: NaiveTime,
    /// HH:MM:SS
    pub fin: NaiveTime,
    #[serde(default)]
    pub termina_dia_siguiente: bool,
}

/// Precio autoritativo de un slot. El segmento sale del rol del caller
/// en ESTE club (profe => profesional), nunca de un parámetro.
#[utoipa::path(
    get,
    path = "/api/public/cotizacion",
    params(CotizacionParams),
    responses(
        (status = 200, description = "Cotización del slot", body = crate::models::tarifa::Cotizacion),
        (status = 400, description = "Rango horario inválido"),
        (status = 404, description = "Cancha no encontrada")
    )
)]
pub async fn cotizar(
    State(app_state): State<AppState>,
    club: ClubContext,
    user: OptionalUser,
    Query(params): Query<CotizacionParams>,
) -> Result<impl IntoResponse, AppError> {
    let rol = match &user.0 {
        Some(u) => app_state.membresia_repo.rol_en_club(u.id, club.0.id).await?,
        None => None,
    };
    let segmento = segmento_para(rol);

    let cotizacion = app_state
        .pricing_service
        .cotizar(
            club.0.id,
            params.cancha_id,
            params.fecha,
            params.inicio,
            params.fin,
            params.termina_dia_siguiente,
            segmento,
        )
        .await?;

    Ok(Json(cotizacion))
}

// ---
// Draft de reserva
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CrearDraftPayload {
    pub cancha_id: Uuid,
    pub fecha: NaiveDate,
    pub inicio: NaiveTime,
    pub fin: NaiveTime,
    #[serde(default)]
    pub termina_dia_siguiente: bool,
}

/// Escribe el draft: recalcula el precio server-side (el cliente nunca
/// manda un precio) y lo congela en el cookie firmado de 30 minutos.
#[utoipa::path(
    post,
    path = "/api/public/draft",
    request_body = CrearDraftPayload,
    responses(
        (status = 201, description = "Draft escrito", body = DraftReserva),
        (status = 400, description = "Rango horario inválido"),
        (status = 404, description = "Cancha no encontrada")
    )
)]
pub async fn crear_draft(
    State(app_state): State<AppState>,
    club: ClubContext,
    user: OptionalUser,
    jar: CookieJar,
    Json(payload): Json<CrearDraftPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user_id = user.0.as_ref().map(|u| u.id);
    let rol = match user_id {
        Some(id) => app_state.membresia_repo.rol_en_club(id, club.0.id).await?,
        None => None,
    };
    let segmento = segmento_para(rol);

    let cotizacion = app_state
        .pricing_service
        .cotizar(
            club.0.id,
            payload.cancha_id,
            payload.fecha,
            payload.inicio,
            payload.fin,
            payload.termina_dia_siguiente,
            segmento,
        )
        .await?;

    let draft = DraftReserva {
        id_club: club.0.id,
        id_cancha: payload.cancha_id,
        user_id,
        segmento,
        fecha: payload.fecha,
        inicio: payload.inicio,
        fin: payload.fin,
        termina_dia_siguiente: payload.termina_dia_siguiente,
        duracion_min: cotizacion.duracion_min,
        id_tarifario: cotizacion.id_tarifario,
        id_regla: cotizacion.id_regla,
        precio_total: cotizacion.precio_total,
        created_at: chrono::Utc::now(), // lo pisa el codificador
        exp: 0,
    };

    let token = app_state.draft_service.codificar(draft.clone())?;
    let jar = jar.add(app_state.draft_service.cookie(token));

    Ok((StatusCode::CREATED, jar, Json(draft)))
}

/// Lee el draft actual. Ausente, corrupto o vencido => `draft: null`.
#[utoipa::path(
    get,
    path = "/api/public/draft",
    responses((status = 200, description = "Draft actual o null"))
)]
pub async fn leer_draft(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let draft = jar
        .get(DRAFT_COOKIE)
        .and_then(|c| app_state.draft_service.decodificar(c.value()));

    Ok(Json(json!({ "draft": draft })))
}

/// Borra el draft (cancelación explícita del flujo).
pub async fn borrar_draft(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let jar = jar.add(app_state.draft_service.cookie_de_borrado());
    Ok((jar, StatusCode::NO_CONTENT))
}
