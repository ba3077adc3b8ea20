// src/services/reservas.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ReservaRepository, reserva_repo::NuevaReserva},
    models::{
        club::Club,
        reserva::{DraftReserva, EstadoPago, EstadoReserva, Pago, Reserva, ReservaConEstado},
    },
};

// ---
// 1. Proyección pura del estado efectivo
// ---

/// Deriva el estado que se le muestra al caller SIN tocar la fila.
///
/// El estado guardado manda salvo que sea `pendiente_pago`; ahí el
/// último pago rechazado/cancelado gana sobre la expiración por
/// timestamp, y la expiración sobre seguir pendiente. No hay sweeper:
/// cada lectura recalcula esto.
pub fn derivar_estado_efectivo(
    estado: EstadoReserva,
    expires_at: DateTime<Utc>,
    ultimo_pago: Option<&Pago>,
    ahora: DateTime<Utc>,
) -> EstadoReserva {
    if estado != EstadoReserva::PendientePago {
        return estado;
    }

    if let Some(pago) = ultimo_pago {
        if matches!(pago.estado_procesador, EstadoPago::Rechazado | EstadoPago::Cancelado) {
            return EstadoReserva::Rechazada;
        }
    }

    if expires_at <= ahora {
        return EstadoReserva::Expirada;
    }

    EstadoReserva::PendientePago
}

/// ¿Este draft puede confirmarse desde esta sesión? Un draft anónimo lo
/// confirma cualquiera (incluso alguien que se logueó después); uno
/// atado a un usuario, solo ese usuario.
pub fn draft_confirmable_por(draft_user: Option<Uuid>, sesion: Option<Uuid>) -> bool {
    match draft_user {
        None => true,
        Some(id) => sesion == Some(id),
    }
}

// ---
// 2. Servicio de reservas
// ---

#[derive(Clone)]
pub struct ReservaService {
    reserva_repo: ReservaRepository,
    pool: PgPool,
    // minutos que una reserva pendiente espera el pago antes de expirar
    ttl_min: i64,
}

impl ReservaService {
    pub fn new(reserva_repo: ReservaRepository, pool: PgPool, ttl_min: i64) -> Self {
        Self { reserva_repo, pool, ttl_min }
    }

    /// Confirmación del usuario: el draft firmado es la única fuente de
    /// precio. Se persiste en `pendiente_pago` con su expiración.
    pub async fn crear_desde_draft(
        &self,
        club: &Club,
        draft: &DraftReserva,
        nombre_contacto: Option<String>,
        email_contacto: Option<String>,
        telefono_contacto: Option<String>,
    ) -> Result<Reserva, AppError> {
        if draft.id_club != club.id {
            // draft escrito contra otro subdominio
            return Err(AppError::InvalidInput(
                "El draft no corresponde a este club.".to_string(),
            ));
        }

        let ahora = Utc::now();
        let monto_anticipo = (draft.precio_total * club.porcentaje_anticipo
            / Decimal::from(100))
        .round_dp(2);

        let nueva = NuevaReserva {
            club_id: club.id,
            cancha_id: draft.id_cancha,
            user_id: draft.user_id,
            nombre_contacto,
            email_contacto,
            telefono_contacto,
            fecha: draft.fecha,
            hora_inicio: draft.inicio,
            hora_fin: draft.fin,
            termina_dia_siguiente: draft.termina_dia_siguiente,
            duracion_min: draft.duracion_min,
            precio_total: draft.precio_total,
            porcentaje_anticipo: club.porcentaje_anticipo,
            monto_anticipo,
            expires_at: ahora + chrono::Duration::minutes(self.ttl_min),
            horario_fijo_id: None,
            id_tarifario: draft.id_tarifario,
            id_regla: draft.id_regla,
        };

        let reserva = self.reserva_repo.crear(&self.pool, nueva).await?;
        tracing::info!(
            reserva_id = %reserva.id,
            club_id = %club.id,
            "Reserva creada en pendiente_pago"
        );

        Ok(reserva)
    }

    /// Adjunta el estado efectivo derivado en lectura. Solo consulta el
    /// último pago cuando hace falta (reserva aún pendiente).
    pub async fn con_estado(&self, reserva: Reserva) -> Result<ReservaConEstado, AppError> {
        let ultimo_pago = if reserva.estado == EstadoReserva::PendientePago {
            self.reserva_repo.ultimo_pago(reserva.id).await?
        } else {
            None
        };

        let estado_efectivo = derivar_estado_efectivo(
            reserva.estado,
            reserva.expires_at,
            ultimo_pago.as_ref(),
            Utc::now(),
        );

        Ok(ReservaConEstado { reserva, estado_efectivo })
    }

    pub async fn buscar(
        &self,
        club_id: Uuid,
        reserva_id: Uuid,
    ) -> Result<ReservaConEstado, AppError> {
        let reserva = self
            .reserva_repo
            .find(club_id, reserva_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada.".to_string()))?;

        self.con_estado(reserva).await
    }

    /// Cancelación explícita de staff: fuerza `cancelada` sin mirar
    /// expiración ni pagos. El rol ya fue verificado por el guard.
    pub async fn cancelar(&self, club_id: Uuid, reserva_id: Uuid) -> Result<Reserva, AppError> {
        let reserva = self.reserva_repo.cancelar(club_id, reserva_id).await?;
        tracing::info!(reserva_id = %reserva.id, "Reserva cancelada por staff");
        Ok(reserva)
    }

    /// Webhook del procesador de pagos. Registra el pago y, si vino
    /// aprobado y la reserva sigue pendiente y sin expirar, la confirma.
    /// Un aprobado tardío (reserva ya expirada) queda registrado pero
    /// no confirma nada.
    pub async fn registrar_pago(
        &self,
        reserva_id: Uuid,
        estado: EstadoPago,
        detalle: Option<&str>,
        monto: Decimal,
        referencia_externa: Option<&str>,
    ) -> Result<Pago, AppError> {
        let reserva = self
            .reserva_repo
            .find_por_id(reserva_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada.".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let pago = self
            .reserva_repo
            .crear_pago(&mut *tx, reserva.id, estado, detalle, monto, referencia_externa)
            .await?;

        if estado == EstadoPago::Aprobado {
            let confirmada = self
                .reserva_repo
                .confirmar_si_pendiente(&mut *tx, reserva.id, Utc::now())
                .await?;

            match confirmada {
                Some(r) => tracing::info!(reserva_id = %r.id, "Reserva confirmada por pago"),
                None => tracing::warn!(
                    reserva_id = %reserva.id,
                    "Pago aprobado sobre una reserva no confirmable (expirada o ya resuelta)"
                ),
            }
        }

        tx.commit().await?;

        Ok(pago)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pago(estado: EstadoPago, hace_min: i64) -> Pago {
        Pago {
            id: Uuid::new_v4(),
            reserva_id: Uuid::new_v4(),
            estado_procesador: estado,
            detalle: None,
            monto: "5000".parse().unwrap(),
            referencia_externa: None,
            created_at: Utc::now() - Duration::minutes(hace_min),
        }
    }

    #[test]
    fn pendiente_vencida_se_reporta_expirada() {
        let ahora = Utc::now();
        let estado = derivar_estado_efectivo(
            EstadoReserva::PendientePago,
            ahora - Duration::minutes(1),
            None,
            ahora,
        );
        assert_eq!(estado, EstadoReserva::Expirada);
    }

    #[test]
    fn pendiente_vigente_sigue_pendiente() {
        let ahora = Utc::now();
        let estado = derivar_estado_efectivo(
            EstadoReserva::PendientePago,
            ahora + Duration::minutes(10),
            None,
            ahora,
        );
        assert_eq!(estado, EstadoReserva::PendientePago);
    }

    #[test]
    fn pago_rechazado_gana_aunque_la_fila_siga_pendiente() {
        let ahora = Utc::now();
        let p = pago(EstadoPago::Rechazado, 5);
        let estado = derivar_estado_efectivo(
            EstadoReserva::PendientePago,
            ahora + Duration::minutes(10),
            Some(&p),
            ahora,
        );
        assert_eq!(estado, EstadoReserva::Rechazada);

        // también con la reserva ya vencida: el rechazo es la señal
        // más específica
        let estado = derivar_estado_efectivo(
            EstadoReserva::PendientePago,
            ahora - Duration::minutes(10),
            Some(&p),
            ahora,
        );
        assert_eq!(estado, EstadoReserva::Rechazada);
    }

    #[test]
    fn pago_pendiente_no_cambia_nada() {
        let ahora = Utc::now();
        let p = pago(EstadoPago::Pendiente, 5);
        let estado = derivar_estado_efectivo(
            EstadoReserva::PendientePago,
            ahora + Duration::minutes(10),
            Some(&p),
            ahora,
        );
        assert_eq!(estado, EstadoReserva::PendientePago);
    }

    #[test]
    fn el_draft_ajeno_no_se_confirma_desde_otra_sesion() {
        let duenio = Uuid::new_v4();
        let otro = Uuid::new_v4();

        assert!(draft_confirmable_por(Some(duenio), Some(duenio)));
        assert!(!draft_confirmable_por(Some(duenio), Some(otro)));
        assert!(!draft_confirmable_por(Some(duenio), None));

        // el draft anónimo no está atado a nadie
        assert!(draft_confirmable_por(None, None));
        assert!(draft_confirmable_por(None, Some(otro)));
    }

    #[test]
    fn los_estados_terminales_son_autoritativos() {
        let ahora = Utc::now();
        let p = pago(EstadoPago::Rechazado, 5);
        // una confirmada no se "expira" ni se "rechaza" en lectura
        let estado = derivar_estado_efectivo(
            EstadoReserva::Confirmada,
            ahora - Duration::minutes(10),
            Some(&p),
            ahora,
        );
        assert_eq!(estado, EstadoReserva::Confirmada);

        let estado = derivar_estado_efectivo(
            EstadoReserva::Cancelada,
            ahora - Duration::minutes(10),
            None,
            ahora,
        );
        assert_eq!(estado, EstadoReserva::Cancelada);
    }
}
