// src/db/club_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::club::Club};

#[derive(Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolución de tenant: subdominio exacto y club activo, nada de
    /// matching difuso. Un club desactivado resuelve como inexistente.
    pub async fn find_by_subdominio_activo(
        &self,
        subdominio: &str,
    ) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>(
            "SELECT * FROM clubs WHERE subdominio = $1 AND activo = TRUE",
        )
        .bind(subdominio)
        .fetch_optional(&self.pool)
        .await?;

        Ok(club)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>, AppError> {
        let club = sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(club)
    }

    pub async fn create_club<'e, E>(
        &self,
        executor: E, // acepta un executor (pool o transacción)
        nombre: &str,
        subdominio: &str,
    ) -> Result<Club, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (nombre, subdominio)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(subdominio)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Ese subdominio ya está en uso.".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Club>, AppError> {
        let clubs = sqlx::query_as::<_, Club>("SELECT * FROM clubs ORDER BY nombre ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(clubs)
    }

    pub async fn update_datos(
        &self,
        id: Uuid,
        nombre: &str,
        porcentaje_anticipo: rust_decimal::Decimal,
        texto_bienvenida: Option<&str>,
        color_primario: Option<&str>,
        color_secundario: Option<&str>,
    ) -> Result<Club, AppError> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs
            SET nombre = $2,
                porcentaje_anticipo = $3,
                texto_bienvenida = $4,
                color_primario = $5,
                color_secundario = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(porcentaje_anticipo)
        .bind(texto_bienvenida)
        .bind(color_primario)
        .bind(color_secundario)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

        Ok(club)
    }

    /// Baja lógica: el club deja de resolver por subdominio pero la
    /// fila (y sus reservas) quedan.
    pub async fn desactivar(&self, id: Uuid) -> Result<Club, AppError> {
        let club = sqlx::query_as::<_, Club>(
            "UPDATE clubs SET activo = FALSE, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

        Ok(club)
    }

    /// Actualiza la URL de logo o hero después de subir el archivo.
    pub async fn update_branding_url(
        &self,
        id: Uuid,
        campo_logo: bool,
        url: &str,
    ) -> Result<Club, AppError> {
        let query = if campo_logo {
            "UPDATE clubs SET logo_url = $2, updated_at = now() WHERE id = $1 RETURNING *"
        } else {
            "UPDATE clubs SET hero_url = $2, updated_at = now() WHERE id = $1 RETURNING *"
        };

        let club = sqlx::query_as::<_, Club>(query)
            .bind(id)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club no encontrado.".to_string()))?;

        Ok(club)
    }
}
