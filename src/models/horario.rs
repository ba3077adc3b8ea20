// src/models/horario.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Plantilla de horario fijo (turno recurrente semanal).
// Las reservas generadas a partir de una plantilla guardan el vínculo
// en `reservas.horario_fijo_id`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HorarioFijo {
    pub id: Uuid,
    pub club_id: Uuid,
    pub cancha_id: Uuid,
    pub nombre: String,
    pub dia_semana: i16,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}
