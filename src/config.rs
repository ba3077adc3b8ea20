// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{
        CanchaRepository, ClienteRepository, ClubRepository, HorarioRepository,
        MembresiaRepository, ReservaRepository, TarifaRepository, UserRepository,
    },
    services::{
        auth::AuthService, documents::DocumentService, draft::DraftService, media::MediaService,
        pricing::PricingService, reservas::ReservaService,
    },
};

/// Minutos que una reserva queda en pendiente_pago antes de expirar,
/// si el entorno no dice otra cosa.
const RESERVA_TTL_MIN_DEFAULT: i64 = 30;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    // Dominio base contra el que se recorta el subdominio del Host
    pub base_domain: String,
    pub storage_root: PathBuf,

    pub user_repo: UserRepository,
    pub club_repo: ClubRepository,
    pub cancha_repo: CanchaRepository,
    pub tarifa_repo: TarifaRepository,
    pub reserva_repo: ReservaRepository,
    pub membresia_repo: MembresiaRepository,
    pub cliente_repo: ClienteRepository,
    pub horario_repo: HorarioRepository,

    pub auth_service: AuthService,
    pub pricing_service: PricingService,
    pub draft_service: DraftService,
    pub reserva_service: ReservaService,
    pub media_service: MediaService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL debe estar definida"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET debe estar definido"))?;
        let base_domain = env::var("BASE_DOMAIN").unwrap_or_else(|_| "localhost".to_string());
        let storage_root =
            PathBuf::from(env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".to_string()));
        let ttl_min = env::var("RESERVA_TTL_MIN")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(RESERVA_TTL_MIN_DEFAULT);
        let draft_ttl_min = env::var("DRAFT_TTL_MIN")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(crate::services::draft::DRAFT_TTL_MIN);

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida");

        // --- Arma el grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let club_repo = ClubRepository::new(db_pool.clone());
        let cancha_repo = CanchaRepository::new(db_pool.clone());
        let tarifa_repo = TarifaRepository::new(db_pool.clone());
        let reserva_repo = ReservaRepository::new(db_pool.clone());
        let membresia_repo = MembresiaRepository::new(db_pool.clone());
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let horario_repo = HorarioRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let pricing_service = PricingService::new(tarifa_repo.clone(), cancha_repo.clone());
        let draft_service = DraftService::new(jwt_secret.clone(), draft_ttl_min);
        let reserva_service =
            ReservaService::new(reserva_repo.clone(), db_pool.clone(), ttl_min);
        let media_service = MediaService::new(storage_root.clone(), club_repo.clone());
        let document_service = DocumentService::new(reserva_repo.clone(), cancha_repo.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            base_domain,
            storage_root,
            user_repo,
            club_repo,
            cancha_repo,
            tarifa_repo,
            reserva_repo,
            membresia_repo,
            cliente_repo,
            horario_repo,
            auth_service,
            pricing_service,
            draft_service,
            reserva_service,
            media_service,
            document_service,
        })
    }
}
