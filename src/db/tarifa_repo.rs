// src/db/tarifa_repo.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tarifa::{ReglaTarifa, Segmento, Tarifario},
};

#[derive(Clone)]
pub struct TarifaRepository {
    pool: PgPool,
}

impl TarifaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TARIFARIOS
    // =========================================================================

    pub async fn create_tarifario(
        &self,
        club_id: Uuid,
        nombre: &str,
    ) -> Result<Tarifario, AppError> {
        let tarifario = sqlx::query_as::<_, Tarifario>(
            r#"
            INSERT INTO tarifarios (club_id, nombre)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(nombre)
        .fetch_one(&self.pool)
        .await?;

        Ok(tarifario)
    }

    pub async fn list_tarifarios(&self, club_id: Uuid) -> Result<Vec<Tarifario>, AppError> {
        let tarifarios = sqlx::query_as::<_, Tarifario>(
            "SELECT * FROM tarifarios WHERE club_id = $1 ORDER BY nombre ASC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tarifarios)
    }

    pub async fn find_tarifario(
        &self,
        club_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Tarifario>, AppError> {
        let tarifario = sqlx::query_as::<_, Tarifario>(
            "SELECT * FROM tarifarios WHERE id = $1 AND club_id = $2",
        )
        .bind(id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tarifario)
    }

    // =========================================================================
    //  REGLAS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_regla(
        &self,
        tarifario_id: Uuid,
        segmento: Segmento,
        dia_semana: Option<i16>,
        hora_inicio: NaiveTime,
        hora_fin: NaiveTime,
        cruza_medianoche: bool,
        duracion_min: i32,
        precio: Decimal,
        prioridad: i32,
        vigente_desde: Option<NaiveDate>,
        vigente_hasta: Option<NaiveDate>,
    ) -> Result<ReglaTarifa, AppError> {
        let regla = sqlx::query_as::<_, ReglaTarifa>(
            r#"
            INSERT INTO reglas_tarifa (
                tarifario_id, segmento, dia_semana, hora_inicio, hora_fin,
                cruza_medianoche, duracion_min, precio, prioridad,
                vigente_desde, vigente_hasta
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(tarifario_id)
        .bind(segmento)
        .bind(dia_semana)
        .bind(hora_inicio)
        .bind(hora_fin)
        .bind(cruza_medianoche)
        .bind(duracion_min)
        .bind(precio)
        .bind(prioridad)
        .bind(vigente_desde)
        .bind(vigente_hasta)
        .fetch_one(&self.pool)
        .await?;

        Ok(regla)
    }

    pub async fn list_reglas(&self, tarifario_id: Uuid) -> Result<Vec<ReglaTarifa>, AppError> {
        let reglas = sqlx::query_as::<_, ReglaTarifa>(
            r#"
            SELECT * FROM reglas_tarifa
            WHERE tarifario_id = $1
            ORDER BY segmento, prioridad DESC, dia_semana, hora_inicio, duracion_min
            "#,
        )
        .bind(tarifario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reglas)
    }

    /// Las reglas candidatas para cotizar: activas y de tarifarios
    /// activos del club. El filtrado fino (ventana, vigencia, día,
    /// segmento) lo hace el matcher en memoria, que es código puro.
    pub async fn reglas_activas_del_club(
        &self,
        club_id: Uuid,
    ) -> Result<Vec<ReglaTarifa>, AppError> {
        let reglas = sqlx::query_as::<_, ReglaTarifa>(
            r#"
            SELECT r.* FROM reglas_tarifa r
            JOIN tarifarios t ON t.id = r.tarifario_id
            WHERE t.club_id = $1 AND t.activo = TRUE AND r.activa = TRUE
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reglas)
    }

    pub async fn desactivar_regla(&self, tarifario_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE reglas_tarifa SET activa = FALSE WHERE id = $2 AND tarifario_id = $1",
        )
        .bind(tarifario_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Regla no encontrada.".to_string()));
        }

        Ok(())
    }
}
