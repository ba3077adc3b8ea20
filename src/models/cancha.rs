// src/models/cancha.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Una cancha pertenece a exactamente un club.
// `activa` la saca del sitio público; `estado` es la baja lógica.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cancha {
    pub id: Uuid,
    pub club_id: Uuid,
    pub nombre: String,
    pub deporte: String,
    pub categoria: Option<String>,
    pub capacidad: i32,
    // Precio por hora, usado como fallback cuando ninguna regla matchea
    pub precio_base: Decimal,
    pub exterior: bool,
    pub activa: bool,
    pub estado: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
