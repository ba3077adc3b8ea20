// src/db/horario_repo.rs

use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::horario::HorarioFijo};

#[derive(Clone)]
pub struct HorarioRepository {
    pool: PgPool,
}

impl HorarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        club_id: Uuid,
        cancha_id: Uuid,
        nombre: &str,
        dia_semana: i16,
        hora_inicio: NaiveTime,
        hora_fin: NaiveTime,
    ) -> Result<HorarioFijo, AppError> {
        let horario = sqlx::query_as::<_, HorarioFijo>(
            r#"
            INSERT INTO horarios_fijos (club_id, cancha_id, nombre, dia_semana, hora_inicio, hora_fin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(cancha_id)
        .bind(nombre)
        .bind(dia_semana)
        .bind(hora_inicio)
        .bind(hora_fin)
        .fetch_one(&self.pool)
        .await?;

        Ok(horario)
    }

    pub async fn list_por_club(&self, club_id: Uuid) -> Result<Vec<HorarioFijo>, AppError> {
        let horarios = sqlx::query_as::<_, HorarioFijo>(
            r#"
            SELECT * FROM horarios_fijos
            WHERE club_id = $1
            ORDER BY dia_semana ASC, hora_inicio ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(horarios)
    }

    pub async fn desactivar(&self, club_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE horarios_fijos SET activo = FALSE WHERE id = $2 AND club_id = $1")
                .bind(club_id)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Horario fijo no encontrado.".to_string()));
        }

        Ok(())
    }
}
