// src/handlers/reservas.rs
//
// Confirmación de la reserva desde el draft, "mis reservas" y el
// webhook del procesador de pagos.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::OptionalUser, tenancy::ClubContext},
    models::reserva::EstadoPago,
    services::draft::DRAFT_COOKIE,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConfirmarReservaPayload {
    // contacto para reservas de invitados (sin usuario registrado)
    #[validate(length(min = 1, message = "El nombre de contacto no puede estar vacío."))]
    pub nombre_contacto: Option<String>,
    #[validate(email(message = "El e-mail de contacto no es válido."))]
    pub email_contacto: Option<String>,
    pub telefono_contacto: Option<String>,
}

/// Confirma el draft vigente: lo lee del cookie firmado, persiste la
/// reserva en `pendiente_pago` y borra el draft. El precio es el que se
/// congeló al escribir el draft; acá no se recalcula ni se acepta nada
/// del cliente.
#[utoipa::path(
    post,
    path = "/api/client/reservas",
    request_body = ConfirmarReservaPayload,
    responses(
        (status = 201, description = "Reserva creada en pendiente_pago"),
        (status = 400, description = "No hay draft vigente"),
        (status = 409, description = "El slot ya está reservado")
    )
)]
pub async fn confirmar_reserva(
    State(app_state): State<AppState>,
    club: ClubContext,
    user: OptionalUser,
    jar: CookieJar,
    Json(payload): Json<ConfirmarReservaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let draft = jar
        .get(DRAFT_COOKIE)
        .and_then(|c| app_state.draft_service.decodificar(c.value()))
        .ok_or_else(|| {
            AppError::InvalidInput("No hay un draft de reserva vigente.".to_string())
        })?;

    // Un draft atado a un usuario solo lo confirma ese usuario
    let sesion = user.0.as_ref().map(|u| u.id);
    if !crate::services::reservas::draft_confirmable_por(draft.user_id, sesion) {
        return Err(AppError::Forbidden(
            "El draft pertenece a otra sesión.".to_string(),
        ));
    }

    // Una reserva anónima necesita al menos un nombre de contacto
    if draft.user_id.is_none() && user.0.is_none() && payload.nombre_contacto.is_none() {
        return Err(AppError::InvalidInput(
            "Falta el nombre de contacto para la reserva.".to_string(),
        ));
    }

    let reserva = app_state
        .reserva_service
        .crear_desde_draft(
            &club.0,
            &draft,
            payload.nombre_contacto,
            payload.email_contacto,
            payload.telefono_contacto,
        )
        .await?;

    // draft consumido
    let jar = jar.add(app_state.draft_service.cookie_de_borrado());

    Ok((StatusCode::CREATED, jar, Json(reserva)))
}

/// Las reservas del usuario autenticado en este club, con el estado
/// efectivo derivado en lectura.
pub async fn mis_reservas(
    State(app_state): State<AppState>,
    club: ClubContext,
    user: OptionalUser,
) -> Result<impl IntoResponse, AppError> {
    let user = user.0.ok_or(AppError::InvalidToken)?;

    let reservas = app_state
        .reserva_repo
        .list_por_user(club.0.id, user.id)
        .await?;

    let mut con_estado = Vec::with_capacity(reservas.len());
    for reserva in reservas {
        con_estado.push(app_state.reserva_service.con_estado(reserva).await?);
    }

    Ok(Json(con_estado))
}

#[utoipa::path(
    get,
    path = "/api/client/reservas/{id}",
    params(("id" = Uuid, Path, description = "Id de la reserva")),
    responses(
        (status = 200, description = "Reserva con estado efectivo"),
        (status = 404, description = "Reserva no encontrada")
    )
)]
pub async fn get_reserva(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reserva = app_state.reserva_service.buscar(club.0.id, id).await?;
    Ok(Json(reserva))
}

// ---
// Back-office
// ---

#[derive(Debug, Deserialize)]
pub struct ListarReservasParams {
    pub fecha: Option<chrono::NaiveDate>,
}

/// Listado de reservas del club para el staff, filtrable por fecha.
pub async fn listar_reservas_admin(
    State(app_state): State<AppState>,
    club: ClubContext,
    axum::extract::Query(params): axum::extract::Query<ListarReservasParams>,
) -> Result<impl IntoResponse, AppError> {
    let reservas = app_state
        .reserva_repo
        .list_por_club(club.0.id, params.fecha)
        .await?;

    let mut con_estado = Vec::with_capacity(reservas.len());
    for reserva in reservas {
        con_estado.push(app_state.reserva_service.con_estado(reserva).await?);
    }

    Ok(Json(con_estado))
}

/// Cancelación forzada. El guard de staff ya corrió; acá se afina:
/// cancelar es de admin o cajero, un profe no puede.
pub async fn cancelar_reserva(
    State(app_state): State<AppState>,
    club: ClubContext,
    rol: axum::Extension<crate::middleware::rbac::RolContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    use crate::models::membresia::RolClub;

    if !matches!(rol.0.0, RolClub::Admin | RolClub::Cajero) {
        return Err(AppError::Forbidden(
            "Cancelar reservas requiere rol admin o cajero.".to_string(),
        ));
    }

    let reserva = app_state.reserva_service.cancelar(club.0.id, id).await?;
    Ok(Json(reserva))
}

// ---
// Webhook de pagos
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PagoWebhookPayload {
    pub reserva_id: Uuid,
    pub estado: EstadoPago,
    pub monto: Decimal,
    pub detalle: Option<String>,
    pub referencia_externa: Option<String>,
}

/// Entrada del procesador externo de pagos. Registra el pago; un
/// aprobado confirma la reserva solo si sigue pendiente y sin expirar.
pub async fn pago_webhook(
    State(app_state): State<AppState>,
    Json(payload): Json<PagoWebhookPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let pago = app_state
        .reserva_service
        .registrar_pago(
            payload.reserva_id,
            payload.estado,
            payload.detalle.as_deref(),
            payload.monto,
            payload.referencia_externa.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(pago)))
}
