// src/db/cancha_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::cancha::Cancha};

#[derive(Clone)]
pub struct CanchaRepository {
    pool: PgPool,
}

impl CanchaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        club_id: Uuid,
        nombre: &str,
        deporte: &str,
        categoria: Option<&str>,
        capacidad: i32,
        precio_base: Decimal,
        exterior: bool,
    ) -> Result<Cancha, AppError> {
        let cancha = sqlx::query_as::<_, Cancha>(
            r#"
            INSERT INTO canchas (club_id, nombre, deporte, categoria, capacidad, precio_base, exterior)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(nombre)
        .bind(deporte)
        .bind(categoria)
        .bind(capacidad)
        .bind(precio_base)
        .bind(exterior)
        .fetch_one(&self.pool)
        .await?;

        Ok(cancha)
    }

    /// Todas las canchas no dadas de baja del club (back-office).
    pub async fn list_por_club(&self, club_id: Uuid) -> Result<Vec<Cancha>, AppError> {
        let canchas = sqlx::query_as::<_, Cancha>(
            "SELECT * FROM canchas WHERE club_id = $1 AND estado = TRUE ORDER BY nombre ASC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(canchas)
    }

    /// Solo las canchas visibles en el sitio público.
    pub async fn list_activas(&self, club_id: Uuid) -> Result<Vec<Cancha>, AppError> {
        let canchas = sqlx::query_as::<_, Cancha>(
            r#"
            SELECT * FROM canchas
            WHERE club_id = $1 AND estado = TRUE AND activa = TRUE
            ORDER BY nombre ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(canchas)
    }

    /// Busca siempre dentro del club resuelto: una cancha de otro
    /// tenant es un 404, no un 403.
    pub async fn find(&self, club_id: Uuid, id: Uuid) -> Result<Option<Cancha>, AppError> {
        let cancha = sqlx::query_as::<_, Cancha>(
            "SELECT * FROM canchas WHERE id = $1 AND club_id = $2 AND estado = TRUE",
        )
        .bind(id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cancha)
    }

    pub async fn update(
        &self,
        club_id: Uuid,
        id: Uuid,
        nombre: &str,
        categoria: Option<&str>,
        capacidad: i32,
        precio_base: Decimal,
        exterior: bool,
        activa: bool,
    ) -> Result<Cancha, AppError> {
        let cancha = sqlx::query_as::<_, Cancha>(
            r#"
            UPDATE canchas
            SET nombre = $3, categoria = $4, capacidad = $5,
                precio_base = $6, exterior = $7, activa = $8, updated_at = now()
            WHERE id = $2 AND club_id = $1 AND estado = TRUE
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(id)
        .bind(nombre)
        .bind(categoria)
        .bind(capacidad)
        .bind(precio_base)
        .bind(exterior)
        .bind(activa)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Cancha no encontrada.".to_string()))?;

        Ok(cancha)
    }

    /// Baja lógica. La fila queda por las reservas históricas.
    pub async fn baja_logica(&self, club_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE canchas SET estado = FALSE, activa = FALSE, updated_at = now() WHERE id = $2 AND club_id = $1",
        )
        .bind(club_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cancha no encontrada.".to_string()));
        }

        Ok(())
    }
}
