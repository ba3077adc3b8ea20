// src/db/cliente_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::cliente::ClienteManual};

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        club_id: Uuid,
        nombre: &str,
        email: Option<&str>,
        telefono: Option<&str>,
        notas: Option<&str>,
    ) -> Result<ClienteManual, AppError> {
        let cliente = sqlx::query_as::<_, ClienteManual>(
            r#"
            INSERT INTO clientes_manuales (club_id, nombre, email, telefono, notas)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(nombre)
        .bind(email)
        .bind(telefono)
        .bind(notas)
        .fetch_one(&self.pool)
        .await?;

        Ok(cliente)
    }

    pub async fn list_por_club(&self, club_id: Uuid) -> Result<Vec<ClienteManual>, AppError> {
        let clientes = sqlx::query_as::<_, ClienteManual>(
            "SELECT * FROM clientes_manuales WHERE club_id = $1 ORDER BY nombre ASC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clientes)
    }

    pub async fn update(
        &self,
        club_id: Uuid,
        id: Uuid,
        nombre: &str,
        email: Option<&str>,
        telefono: Option<&str>,
        notas: Option<&str>,
    ) -> Result<ClienteManual, AppError> {
        let cliente = sqlx::query_as::<_, ClienteManual>(
            r#"
            UPDATE clientes_manuales
            SET nombre = $3, email = $4, telefono = $5, notas = $6, updated_at = now()
            WHERE id = $2 AND club_id = $1
            RETURNING *
            "#,
        )
        .bind(club_id)
        .bind(id)
        .bind(nombre)
        .bind(email)
        .bind(telefono)
        .bind(notas)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente no encontrado.".to_string()))?;

        Ok(cliente)
    }
}
