// src/middleware/rbac.rs

use axum::{
    extract::State,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::ClubContext,
    models::{auth::User, membresia::RolClub},
};

/// Cookie que fuerza el flujo de reseteo de contraseña.
pub const RECOVERY_COOKIE: &str = "recovery_pending";

// El rol del caller dentro del club resuelto, para que los handlers
// puedan afinar (ej.: cancelar exige admin o cajero, no profe).
#[derive(Debug, Clone, Copy)]
pub struct RolContext(pub RolClub);

/// Gate de acceso al back-office. El chequeo es POR CLUB: se mira la
/// membresía del usuario en el club resuelto por subdominio, nunca
/// "algún rol en algún club".
pub async fn staff_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Estos dos los dejaron auth_guard y club_guard, que corren antes
    let user = request
        .extensions()
        .get::<User>()
        .cloned()
        .ok_or(AppError::InvalidToken)?;
    let club = request
        .extensions()
        .get::<ClubContext>()
        .cloned()
        .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

    let rol = app_state
        .membresia_repo
        .rol_en_club(user.id, club.0.id)
        .await?
        .ok_or_else(|| {
            AppError::Forbidden("No tenés permisos de staff en este club.".to_string())
        })?;

    if !rol.es_staff() {
        return Err(AppError::Forbidden(
            "No tenés permisos de staff en este club.".to_string(),
        ));
    }

    request.extensions_mut().insert(RolContext(rol));
    Ok(next.run(request).await)
}

/// Gate del administrador de tenants: requiere el flag global.
pub async fn superadmin_guard(
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or(AppError::InvalidToken)?;

    if !user.es_superadmin {
        return Err(AppError::Forbidden(
            "Solo el super-admin puede administrar clubes.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

fn recovery_pendiente(jar: &CookieJar) -> bool {
    jar.get(RECOVERY_COOKIE)
        .map(|c| c.value() == "true")
        .unwrap_or(false)
}

/// Mientras `recovery_pending` sea "true", toda ruta fuera del reseteo
/// de contraseña contesta 409 con un marcador fijo; el front convierte
/// eso en la redirección a la pantalla de reset. Va en TODOS los scopes
/// salvo `/api/auth` (el reset mismo vive ahí) y el webhook de pagos.
pub async fn recovery_guard(
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(request.headers());
    if recovery_pendiente(&jar) {
        return Err(AppError::Conflict("recovery_pendiente".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, header};

    fn jar_con(cookies: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookies.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn el_cookie_de_recovery_bloquea() {
        assert!(recovery_pendiente(&jar_con("recovery_pending=true")));
        assert!(recovery_pendiente(&jar_con(
            "otra=x; recovery_pending=true"
        )));
    }

    #[test]
    fn sin_cookie_o_con_otro_valor_no_bloquea() {
        assert!(!recovery_pendiente(&CookieJar::new()));
        assert!(!recovery_pendiente(&jar_con("recovery_pending=false")));
        assert!(!recovery_pendiente(&jar_con("otra=true")));
    }
}
