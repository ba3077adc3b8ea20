// src/models/membresia.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Rol de un usuario dentro de UN club. Un mismo usuario puede ser
// admin en un club y cliente en otro: el rol nunca es global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "rol_club", rename_all = "snake_case")]
pub enum RolClub {
    Admin,
    Cajero,
    Profe,
    Cliente,
}

impl RolClub {
    // Roles que pasan el guard de staff del back-office
    pub fn es_staff(&self) -> bool {
        matches!(self, RolClub::Admin | RolClub::Cajero | RolClub::Profe)
    }
}

// La "puente" usuario-club
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembresiaClub {
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub rol: RolClub,
    pub created_at: DateTime<Utc>,
}

// Membresía con el nombre del club, para GET /users/me/clubs
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembresiaConClub {
    pub club_id: Uuid,
    pub club_nombre: String,
    pub subdominio: String,
    pub rol: RolClub,
}
