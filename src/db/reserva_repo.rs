// src/db/reserva_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reserva::{EstadoPago, Pago, Reserva},
};

/// Campos de una reserva nueva, congelados desde el draft.
#[derive(Debug)]
pub struct NuevaReserva {
    pub club_id: Uuid,
    pub cancha_id: Uuid,
    pub user_id: Option<Uuid>,
    pub nombre_contacto: Option<String>,
    pub email_contacto: Option<String>,
    pub telefono_contacto: Option<String>,
    pub fecha: NaiveDate,
    pub hora_inicio: chrono::NaiveTime,
    pub hora_fin: chrono::NaiveTime,
    pub termina_dia_siguiente: bool,
    pub duracion_min: i32,
    pub precio_total: Decimal,
    pub porcentaje_anticipo: Decimal,
    pub monto_anticipo: Decimal,
    pub expires_at: DateTime<Utc>,
    pub horario_fijo_id: Option<Uuid>,
    pub id_tarifario: Option<Uuid>,
    pub id_regla: Option<Uuid>,
}

#[derive(Clone)]
pub struct ReservaRepository {
    pool: PgPool,
}

impl ReservaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta la reserva en `pendiente_pago`. El solapamiento sobre la
    /// misma cancha lo rechaza la constraint de exclusión de la base.
    pub async fn crear<'e, E>(&self, executor: E, nueva: NuevaReserva) -> Result<Reserva, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Reserva>(
            r#"
            INSERT INTO reservas (
                club_id, cancha_id, user_id,
                nombre_contacto, email_contacto, telefono_contacto,
                fecha, hora_inicio, hora_fin, termina_dia_siguiente, duracion_min,
                precio_total, porcentaje_anticipo, monto_anticipo,
                expires_at, horario_fijo_id, id_tarifario, id_regla
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(nueva.club_id)
        .bind(nueva.cancha_id)
        .bind(nueva.user_id)
        .bind(nueva.nombre_contacto)
        .bind(nueva.email_contacto)
        .bind(nueva.telefono_contacto)
        .bind(nueva.fecha)
        .bind(nueva.hora_inicio)
        .bind(nueva.hora_fin)
        .bind(nueva.termina_dia_siguiente)
        .bind(nueva.duracion_min)
        .bind(nueva.precio_total)
        .bind(nueva.porcentaje_anticipo)
        .bind(nueva.monto_anticipo)
        .bind(nueva.expires_at)
        .bind(nueva.horario_fijo_id)
        .bind(nueva.id_tarifario)
        .bind(nueva.id_regla)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // 23P01 = exclusion_violation: el slot ya está tomado
                if db_err.code().as_deref() == Some("23P01") {
                    return AppError::Conflict(
                        "Ese horario ya está reservado para la cancha.".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn find(&self, club_id: Uuid, id: Uuid) -> Result<Option<Reserva>, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>(
            "SELECT * FROM reservas WHERE id = $1 AND club_id = $2",
        )
        .bind(id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reserva)
    }

    pub async fn list_por_club(
        &self,
        club_id: Uuid,
        fecha: Option<NaiveDate>,
    ) -> Result<Vec<Reserva>, AppError> {
        let reservas = match fecha {
            Some(f) => {
                sqlx::query_as::<_, Reserva>(
                    r#"
                    SELECT * FROM reservas
                    WHERE club_id = $1 AND fecha = $2
                    ORDER BY fecha DESC, hora_inicio ASC
                    "#,
                )
                .bind(club_id)
                .bind(f)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Reserva>(
                    "SELECT * FROM reservas WHERE club_id = $1 ORDER BY fecha DESC, hora_inicio ASC",
                )
                .bind(club_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(reservas)
    }

    pub async fn list_por_user(
        &self,
        club_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Reserva>, AppError> {
        let reservas = sqlx::query_as::<_, Reserva>(
            r#"
            SELECT * FROM reservas
            WHERE club_id = $1 AND user_id = $2
            ORDER BY fecha DESC, hora_inicio ASC
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservas)
    }

    /// Cancelación explícita de staff: pisa el estado sin mirar
    /// expiración ni pagos.
    pub async fn cancelar(&self, club_id: Uuid, id: Uuid) -> Result<Reserva, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas SET estado = 'cancelada'
            WHERE id = $1 AND club_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada.".to_string()))?;

        Ok(reserva)
    }

    /// Confirmación por pago aprobado. El WHERE exige que la reserva
    /// siga pendiente y sin expirar: confirmar una expirada no hace nada.
    pub async fn confirmar_si_pendiente<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        ahora: DateTime<Utc>,
    ) -> Result<Option<Reserva>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reserva = sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas
            SET estado = 'confirmada', confirmed_at = $2
            WHERE id = $1 AND estado = 'pendiente_pago' AND expires_at > $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ahora)
        .fetch_optional(executor)
        .await?;

        Ok(reserva)
    }

    // =========================================================================
    //  PAGOS
    // =========================================================================

    pub async fn crear_pago<'e, E>(
        &self,
        executor: E,
        reserva_id: Uuid,
        estado: EstadoPago,
        detalle: Option<&str>,
        monto: Decimal,
        referencia_externa: Option<&str>,
    ) -> Result<Pago, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            INSERT INTO pagos (reserva_id, estado_procesador, detalle, monto, referencia_externa)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(reserva_id)
        .bind(estado)
        .bind(detalle)
        .bind(monto)
        .bind(referencia_externa)
        .fetch_one(executor)
        .await?;

        Ok(pago)
    }

    /// El pago más reciente decide el estado efectivo de una reserva
    /// pendiente.
    pub async fn ultimo_pago(&self, reserva_id: Uuid) -> Result<Option<Pago>, AppError> {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            SELECT * FROM pagos
            WHERE reserva_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(reserva_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pago)
    }

    pub async fn find_por_id(&self, id: Uuid) -> Result<Option<Reserva>, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reserva)
    }
}
