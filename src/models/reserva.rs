// src/models/reserva.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::tarifa::Segmento;

// ---
// 1. Estados
// ---
// `pendiente_pago` es el único estado no terminal. `expirada` y
// `rechazada` se derivan en lectura; la fila puede seguir diciendo
// `pendiente_pago` en la base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "estado_reserva", rename_all = "snake_case")]
pub enum EstadoReserva {
    PendientePago,
    Confirmada,
    Rechazada,
    Expirada,
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "estado_pago", rename_all = "snake_case")]
pub enum EstadoPago {
    Pendiente,
    Aprobado,
    Rechazado,
    Cancelado,
}

// ---
// 2. Reserva
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    pub id: Uuid,
    pub club_id: Uuid,
    pub cancha_id: Uuid,
    pub user_id: Option<Uuid>,
    pub nombre_contacto: Option<String>,
    pub email_contacto: Option<String>,
    pub telefono_contacto: Option<String>,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub termina_dia_siguiente: bool,
    pub duracion_min: i32,
    pub precio_total: Decimal,
    pub porcentaje_anticipo: Decimal,
    pub monto_anticipo: Decimal,
    pub estado: EstadoReserva,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub horario_fijo_id: Option<Uuid>,
    pub id_tarifario: Option<Uuid>,
    pub id_regla: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Reserva tal como se entrega al cliente: el estado ya viene derivado
// (expiración / último pago evaluados en lectura).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaConEstado {
    #[serde(flatten)]
    pub reserva: Reserva,
    pub estado_efectivo: EstadoReserva,
}

// ---
// 3. Pago
// ---
// Sub-registros uno-a-muchos bajo la reserva; el más reciente manda
// cuando la reserva sigue pendiente.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pago {
    pub id: Uuid,
    pub reserva_id: Uuid,
    pub estado_procesador: EstadoPago,
    pub detalle: Option<String>,
    pub monto: Decimal,
    pub referencia_externa: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Draft de reserva (cookie firmada, nunca persistido)
// ---
// Snapshot punto-en-el-tiempo de la selección de slot. El precio se
// recalcula server-side al escribir; jamás se acepta uno del cliente.
// `exp` lo valida jsonwebtoken: un draft de más de 30 minutos no decodifica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftReserva {
    pub id_club: Uuid,
    pub id_cancha: Uuid,
    pub user_id: Option<Uuid>,
    pub segmento: Segmento,
    pub fecha: NaiveDate,
    pub inicio: NaiveTime,
    pub fin: NaiveTime,
    pub termina_dia_siguiente: bool,
    pub duracion_min: i32,
    pub id_tarifario: Option<Uuid>,
    pub id_regla: Option<Uuid>,
    pub precio_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub exp: usize,
}
