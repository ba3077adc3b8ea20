// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::club::Club};

/// Extrae el label de subdominio de un host, o None si no hay tenant.
///
/// - `padelcentro.miplataforma.com` con base `miplataforma.com` => `padelcentro`
/// - `padelcentro.localhost:3000` (desarrollo) => `padelcentro`
/// - el dominio base pelado, `localhost`, u hosts ajenos => None
///
/// Match exacto de un único label; nada de wildcards.
pub fn subdominio_de_host(host: &str, base_domain: &str) -> Option<String> {
    // descarta el puerto si viene
    let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();

    // caso especial de desarrollo: <sub>.localhost
    if let Some(prefijo) = host.strip_suffix(".localhost") {
        if !prefijo.is_empty() && !prefijo.contains('.') {
            return Some(prefijo.to_string());
        }
        return None;
    }

    let base = base_domain.to_ascii_lowercase();
    let prefijo = host.strip_suffix(&format!(".{}", base))?;
    if prefijo.is_empty() || prefijo.contains('.') {
        return None;
    }
    Some(prefijo.to_string())
}

// El contexto del tenant que viaja en las extensions de la request.
#[derive(Debug, Clone)]
pub struct ClubContext(pub Club);

/// Resuelve el club por el header Host. Subdominio desconocido o club
/// desactivado => 404, igual que una URL inexistente.
pub async fn club_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

    let subdominio = subdominio_de_host(host, &app_state.base_domain)
        .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

    let club = app_state
        .club_repo
        .find_by_subdominio_activo(&subdominio)
        .await?
        .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

    request.extensions_mut().insert(ClubContext(club));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for ClubContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ClubContext>()
            .cloned()
            .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "miplataforma.com";

    #[test]
    fn extrae_el_subdominio_en_produccion() {
        assert_eq!(
            subdominio_de_host("padelcentro.miplataforma.com", BASE),
            Some("padelcentro".to_string())
        );
        assert_eq!(
            subdominio_de_host("PadelCentro.MiPlataforma.com", BASE),
            Some("padelcentro".to_string())
        );
    }

    #[test]
    fn extrae_el_subdominio_en_desarrollo() {
        assert_eq!(
            subdominio_de_host("padelcentro.localhost:3000", BASE),
            Some("padelcentro".to_string())
        );
        assert_eq!(
            subdominio_de_host("padelcentro.localhost", BASE),
            Some("padelcentro".to_string())
        );
    }

    #[test]
    fn sin_subdominio_no_hay_tenant() {
        assert_eq!(subdominio_de_host("miplataforma.com", BASE), None);
        assert_eq!(subdominio_de_host("localhost:3000", BASE), None);
        assert_eq!(subdominio_de_host("localhost", BASE), None);
    }

    #[test]
    fn hosts_ajenos_o_anidados_no_matchean() {
        assert_eq!(subdominio_de_host("otrodominio.com", BASE), None);
        assert_eq!(subdominio_de_host("club.otrodominio.com", BASE), None);
        // nada de wildcards: dos niveles no es un tenant
        assert_eq!(subdominio_de_host("a.b.miplataforma.com", BASE), None);
        assert_eq!(subdominio_de_host("a.b.localhost", BASE), None);
    }

    #[test]
    fn el_puerto_se_descarta() {
        assert_eq!(
            subdominio_de_host("padelcentro.miplataforma.com:8080", BASE),
            Some("padelcentro".to_string())
        );
    }
}
