// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::RECOVERY_COOKIE},
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload},
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuario creado", body = AuthResponse),
        (status = 409, description = "El e-mail ya existe")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .register_user(&payload.email, &payload.password, payload.nombre.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sesión iniciada", body = AuthResponse),
        (status = 401, description = "Credenciales inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

pub async fn get_me(user: AuthenticatedUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(user.0))
}

/// Los clubes donde el usuario tiene membresía, con su rol en cada uno.
pub async fn get_my_clubs(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let membresias = app_state.membresia_repo.list_por_user(user.0.id).await?;
    Ok(Json(membresias))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordPayload {
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

/// Cambia la contraseña y limpia el cookie `recovery_pending`, que es
/// lo que estaba forzando al front a la pantalla de reset.
pub async fn reset_password(
    State(app_state): State<AppState>,
    jar: CookieJar,
    user: AuthenticatedUser,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let password = payload.password.clone();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falló la task de hashing: {}", e))??;

    app_state.user_repo.update_password(user.0.id, &hashed).await?;

    let limpieza = Cookie::build((RECOVERY_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();

    Ok((jar.add(limpieza), StatusCode::NO_CONTENT))
}
