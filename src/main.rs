//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::rbac::{recovery_guard, staff_guard, superadmin_guard};
use crate::middleware::tenancy::club_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    // Si la configuración falla, la aplicación no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallaron las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones ejecutadas");

    // Rutas de autenticación (sin guards)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        // El reset de contraseña necesita sesión pero tiene que seguir
        // accesible con `recovery_pending` puesto: va fuera de ese guard.
        .route(
            "/reset-password",
            post(handlers::auth::reset_password).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/clubs", get(handlers::auth::get_my_clubs))
        .layer(axum_middleware::from_fn(recovery_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Sitio público del club: resuelto por subdominio, con o sin sesión
    let public_routes = Router::new()
        .route("/club", get(handlers::publico::get_club))
        .route("/canchas", get(handlers::publico::list_canchas))
        .route("/cotizacion", get(handlers::publico::cotizar))
        .route(
            "/draft",
            post(handlers::publico::crear_draft)
                .get(handlers::publico::leer_draft)
                .delete(handlers::publico::borrar_draft),
        )
        .layer(axum_middleware::from_fn(recovery_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            club_guard,
        ));

    // Flujo de reserva del cliente (invitado o logueado)
    let client_routes = Router::new()
        .route(
            "/reservas",
            post(handlers::reservas::confirmar_reserva).get(handlers::reservas::mis_reservas),
        )
        .route("/reservas/{id}", get(handlers::reservas::get_reserva))
        .layer(axum_middleware::from_fn(recovery_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            club_guard,
        ));

    // Back-office del club. Orden de los guards: primero se resuelve el
    // club, después el usuario, y recién ahí el rol de staff en ESE club.
    let admin_routes = Router::new()
        .route(
            "/canchas",
            post(handlers::canchas::crear_cancha).get(handlers::canchas::listar_canchas),
        )
        .route(
            "/canchas/{id}",
            put(handlers::canchas::actualizar_cancha).delete(handlers::canchas::eliminar_cancha),
        )
        .route(
            "/tarifarios",
            post(handlers::tarifas::crear_tarifario).get(handlers::tarifas::listar_tarifarios),
        )
        .route(
            "/tarifarios/{id}/reglas",
            post(handlers::tarifas::crear_regla).get(handlers::tarifas::listar_reglas),
        )
        .route(
            "/tarifarios/{id}/reglas/{regla_id}",
            delete(handlers::tarifas::desactivar_regla),
        )
        .route(
            "/horarios-fijos",
            post(handlers::horarios::crear_horario).get(handlers::horarios::listar_horarios),
        )
        .route(
            "/horarios-fijos/{id}",
            delete(handlers::horarios::desactivar_horario),
        )
        .route(
            "/clientes",
            post(handlers::clientes::crear_cliente).get(handlers::clientes::listar_clientes),
        )
        .route("/clientes/{id}", put(handlers::clientes::actualizar_cliente))
        .route("/reservas", get(handlers::reservas::listar_reservas_admin))
        .route(
            "/reservas/{id}/cancelar",
            post(handlers::reservas::cancelar_reserva),
        )
        .route(
            "/reservas/{id}/comprobante",
            get(handlers::documentos::comprobante_reserva),
        )
        .route(
            "/roles",
            post(handlers::roles::asignar_rol).get(handlers::roles::listar_membresias),
        )
        .route(
            "/roles/{user_id}",
            delete(handlers::roles::quitar_membresia),
        )
        .route("/branding/{tipo}", post(handlers::branding::subir_branding))
        .layer(axum_middleware::from_fn(recovery_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            staff_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            club_guard,
        ));

    // Administración de tenants (sin subdominio)
    let superadmin_routes = Router::new()
        .route(
            "/clubs",
            post(handlers::clubs::crear_club).get(handlers::clubs::listar_clubs),
        )
        .route("/clubs/{id}", put(handlers::clubs::actualizar_club))
        .route(
            "/clubs/{id}/desactivar",
            post(handlers::clubs::desactivar_club),
        )
        .layer(axum_middleware::from_fn(recovery_guard))
        .layer(axum_middleware::from_fn(superadmin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/public", public_routes)
        .nest("/api/client", client_routes)
        .route("/api/pagos/webhook", post(handlers::reservas::pago_webhook))
        .nest("/api/admin", admin_routes)
        .nest("/api/superadmin", superadmin_routes)
        .nest_service("/media", ServeDir::new(&app_state.storage_root))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falló el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", addr);
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
