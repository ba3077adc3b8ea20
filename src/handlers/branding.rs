// src/handlers/branding.rs

use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::ClubContext,
    services::media::TipoBranding,
};

/// Sube el logo o el hero del club (multipart, campo `file`). Pisa el
/// archivo anterior y actualiza la URL de branding en la fila del club.
pub async fn subir_branding(
    State(app_state): State<AppState>,
    club: ClubContext,
    Path(tipo): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let tipo = TipoBranding::desde_slug(&tipo).ok_or_else(|| {
        AppError::InvalidInput("Tipo de branding desconocido; use 'logo' o 'hero'.".to_string())
    })?;

    // busca el campo del archivo
    let mut data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Multipart inválido: {}", e)))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Lectura fallida: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = data.ok_or_else(|| {
        AppError::InvalidInput("Falta el campo 'file' en el multipart.".to_string())
    })?;
    let filename = filename.ok_or_else(|| {
        AppError::InvalidInput("El archivo no trae nombre.".to_string())
    })?;

    let club = app_state
        .media_service
        .subir_branding(club.0.id, tipo, &filename, &data)
        .await?;

    Ok(Json(club))
}
