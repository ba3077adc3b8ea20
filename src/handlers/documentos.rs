// src/handlers/documentos.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::tenancy::ClubContext,
};

/// Descarga el comprobante PDF de una reserva confirmada del club.
pub async fn comprobante_reserva(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(reserva_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state
        .document_service
        .generar_comprobante_pdf(&club.0, reserva_id)
        .await?;

    // Headers para que el navegador descargue el PDF
    let filename = format!("attachment; filename=\"comprobante_{}.pdf\"", reserva_id);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, &filename),
    ];

    Ok((headers, pdf_bytes).into_response())
}
