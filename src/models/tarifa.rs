// src/models/tarifa.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Segmento del cliente
// ---
// Un usuario con rol `profe` en el club cotiza como profesional;
// todos los demás cotizan como público.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "segmento", rename_all = "snake_case")]
pub enum Segmento {
    Publico,
    Profesional,
}

// ---
// 2. Tarifario (contenedor de reglas)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tarifario {
    pub id: Uuid,
    pub club_id: Uuid,
    pub nombre: String,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

// ---
// 3. Regla de tarifa
// ---
// `dia_semana`: 0 = domingo .. 6 = sábado, NULL = cualquier día.
// `cruza_medianoche` hace que la ventana [hora_inicio, hora_fin)
// se interprete pasando las 24:00.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReglaTarifa {
    pub id: Uuid,
    pub tarifario_id: Uuid,
    pub segmento: Segmento,
    pub dia_semana: Option<i16>,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub cruza_medianoche: bool,
    pub duracion_min: i32,
    pub precio: Decimal,
    pub prioridad: i32,
    pub activa: bool,
    pub vigente_desde: Option<NaiveDate>,
    pub vigente_hasta: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Cotización
// ---
// Resultado del matcher: el precio autoritativo más los ids usados,
// para auditoría y para congelarlos en el draft.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cotizacion {
    pub precio_total: Decimal,
    pub duracion_min: i32,
    pub segmento: Segmento,
    // None cuando se cayó al precio base de la cancha
    pub id_tarifario: Option<Uuid>,
    pub id_regla: Option<Uuid>,
}
