// src/models/club.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Club (el "Tenant")
// ---
// Cada club se resuelve por subdominio y tiene su propio branding.
// Nunca se borra: solo se desactiva.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: Uuid,
    pub nombre: String,
    pub subdominio: String,
    pub logo_url: Option<String>,
    pub hero_url: Option<String>,
    pub color_primario: Option<String>,
    pub color_secundario: Option<String>,
    pub texto_bienvenida: Option<String>,
    pub porcentaje_anticipo: Decimal,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. Vista pública del club
// ---
// Lo que ve el sitio de reservas: branding, sin campos administrativos.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubPublico {
    pub id: Uuid,
    pub nombre: String,
    pub logo_url: Option<String>,
    pub hero_url: Option<String>,
    pub color_primario: Option<String>,
    pub color_secundario: Option<String>,
    pub texto_bienvenida: Option<String>,
}

impl From<Club> for ClubPublico {
    fn from(c: Club) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre,
            logo_url: c.logo_url,
            hero_url: c.hero_url,
            color_primario: c.color_primario,
            color_secundario: c.color_secundario,
            texto_bienvenida: c.texto_bienvenida,
        }
    }
}
