// src/db/membresia_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::membresia::{MembresiaClub, MembresiaConClub, RolClub},
};

#[derive(Clone)]
pub struct MembresiaRepository {
    pool: PgPool,
}

impl MembresiaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// El rol del usuario DENTRO del club resuelto. Esta es la consulta
    /// de autorización central: el guard de staff nunca mira otros clubes.
    pub async fn rol_en_club(
        &self,
        user_id: Uuid,
        club_id: Uuid,
    ) -> Result<Option<RolClub>, AppError> {
        let rol = sqlx::query_scalar::<_, RolClub>(
            "SELECT rol FROM membresias_club WHERE user_id = $1 AND club_id = $2",
        )
        .bind(user_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rol)
    }

    /// Asigna (o actualiza) el rol de un usuario en un club.
    pub async fn asignar<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        club_id: Uuid,
        rol: RolClub,
    ) -> Result<MembresiaClub, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membresia = sqlx::query_as::<_, MembresiaClub>(
            r#"
            INSERT INTO membresias_club (user_id, club_id, rol)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, club_id) DO UPDATE SET rol = EXCLUDED.rol
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(rol)
        .fetch_one(executor)
        .await?;

        Ok(membresia)
    }

    pub async fn quitar(&self, user_id: Uuid, club_id: Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM membresias_club WHERE user_id = $1 AND club_id = $2")
                .bind(user_id)
                .bind(club_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Membresía no encontrada.".to_string()));
        }

        Ok(())
    }

    pub async fn list_por_club(&self, club_id: Uuid) -> Result<Vec<MembresiaClub>, AppError> {
        let membresias = sqlx::query_as::<_, MembresiaClub>(
            "SELECT * FROM membresias_club WHERE club_id = $1 ORDER BY created_at ASC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(membresias)
    }

    /// Los clubes del usuario con su rol en cada uno (GET /users/me/clubs).
    pub async fn list_por_user(&self, user_id: Uuid) -> Result<Vec<MembresiaConClub>, AppError> {
        let membresias = sqlx::query_as::<_, MembresiaConClub>(
            r#"
            SELECT m.club_id, c.nombre AS club_nombre, c.subdominio, m.rol
            FROM membresias_club m
            JOIN clubs c ON c.id = m.club_id
            WHERE m.user_id = $1
            ORDER BY c.nombre ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(membresias)
    }
}
