// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Sitio público ---
        handlers::publico::get_club,
        handlers::publico::cotizar,
        handlers::publico::crear_draft,
        handlers::publico::leer_draft,

        // --- Reservas ---
        handlers::reservas::confirmar_reserva,
        handlers::reservas::get_reserva,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Tenant ---
            models::club::Club,
            models::club::ClubPublico,
            models::cancha::Cancha,

            // --- Tarifario ---
            models::tarifa::Segmento,
            models::tarifa::Tarifario,
            models::tarifa::ReglaTarifa,
            models::tarifa::Cotizacion,

            // --- Reservas ---
            models::reserva::EstadoReserva,
            models::reserva::EstadoPago,
            models::reserva::Reserva,
            models::reserva::ReservaConEstado,
            models::reserva::DraftReserva,
            models::reserva::Pago,

            // --- Payloads ---
            handlers::publico::CrearDraftPayload,
            handlers::reservas::ConfirmarReservaPayload,
            handlers::reservas::PagoWebhookPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación y registro"),
        (name = "Publico", description = "Sitio público del club (por subdominio)"),
        (name = "Reservas", description = "Draft, confirmación y estado de reservas"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
