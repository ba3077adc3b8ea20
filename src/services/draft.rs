// src/services/draft.rs

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{common::error::AppError, models::reserva::DraftReserva};

/// Nombre del cookie del draft de reserva.
pub const DRAFT_COOKIE: &str = "reserva_draft_v1";

/// TTL por defecto del draft: 30 minutos, tanto en el max-age del
/// cookie como en el `exp` firmado dentro del token.
pub const DRAFT_TTL_MIN: i64 = 30;

// El draft vive solo en el navegador, firmado con el secreto del
// servidor. Escrituras concurrentes del mismo usuario simplemente se
// pisan (last-write-wins): es estado por sesión de navegador.
#[derive(Clone)]
pub struct DraftService {
    secret: String,
    ttl_min: i64,
}

impl DraftService {
    pub fn new(secret: String, ttl_min: i64) -> Self {
        Self { secret, ttl_min }
    }

    /// Firma el snapshot. El `exp` se setea acá; el caller ya tiene que
    /// haber recalculado el precio server-side.
    pub fn codificar(&self, mut draft: DraftReserva) -> Result<String, AppError> {
        let ahora = Utc::now();
        draft.created_at = ahora;
        draft.exp = (ahora + chrono::Duration::minutes(self.ttl_min)).timestamp() as usize;

        Ok(encode(
            &Header::default(),
            &draft,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    /// Devuelve None ante cualquier cookie ausente, corrupta, adulterada
    /// o vencida: para el caller todos esos casos son "no hay draft".
    /// Sin tolerancia sobre el `exp`: vencido es vencido.
    pub fn decodificar(&self, token: &str) -> Option<DraftReserva> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<DraftReserva>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .ok()
    }

    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((DRAFT_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::minutes(self.ttl_min))
            .build()
    }

    /// Cookie de borrado inmediato (cancelación o confirmación exitosa).
    pub fn cookie_de_borrado(&self) -> Cookie<'static> {
        Cookie::build((DRAFT_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::ZERO)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    use crate::models::tarifa::Segmento;

    fn draft_de_prueba() -> DraftReserva {
        DraftReserva {
            id_club: Uuid::new_v4(),
            id_cancha: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            segmento: Segmento::Publico,
            fecha: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            inicio: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            fin: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            termina_dia_siguiente: false,
            duracion_min: 90,
            id_tarifario: None,
            id_regla: None,
            precio_total: "15000".parse().unwrap(),
            created_at: Utc::now(),
            exp: 0,
        }
    }

    fn servicio(secret: &str) -> DraftService {
        DraftService::new(secret.to_string(), DRAFT_TTL_MIN)
    }

    #[test]
    fn escribir_y_leer_devuelve_el_mismo_snapshot() {
        let svc = servicio("secreto-de-test");
        let draft = draft_de_prueba();

        let token = svc.codificar(draft.clone()).unwrap();
        let leido = svc.decodificar(&token).unwrap();

        assert_eq!(leido.id_club, draft.id_club);
        assert_eq!(leido.id_cancha, draft.id_cancha);
        assert_eq!(leido.precio_total, draft.precio_total);
        assert_eq!(leido.duracion_min, 90);
    }

    #[test]
    fn token_adulterado_se_lee_como_ausente() {
        let svc = servicio("secreto-de-test");
        let token = svc.codificar(draft_de_prueba()).unwrap();

        let mut adulterado = token.clone();
        adulterado.truncate(token.len() - 4);
        assert!(svc.decodificar(&adulterado).is_none());
        assert!(svc.decodificar("basura").is_none());

        // firmado con otro secreto
        let otro = servicio("otro-secreto");
        assert!(otro.decodificar(&token).is_none());
    }

    // firma a mano un draft con el exp que se pida
    fn token_con_exp(secret: &str, exp: usize) -> String {
        let mut draft = draft_de_prueba();
        draft.exp = exp;
        encode(
            &Header::default(),
            &draft,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn draft_vencido_se_lee_como_ausente() {
        let svc = servicio("secreto-de-test");
        let exp = (Utc::now() - chrono::Duration::minutes(31)).timestamp() as usize;
        assert!(svc.decodificar(&token_con_exp("secreto-de-test", exp)).is_none());
    }

    #[test]
    fn el_vencimiento_no_tiene_tolerancia() {
        // recién vencido (segundos, no minutos): también es ausente
        let svc = servicio("secreto-de-test");
        let exp = (Utc::now() - chrono::Duration::seconds(5)).timestamp() as usize;
        assert!(svc.decodificar(&token_con_exp("secreto-de-test", exp)).is_none());
    }

    #[test]
    fn cookie_con_atributos_correctos() {
        let svc = servicio("s");
        let cookie = svc.cookie("tok".to_string());
        assert_eq!(cookie.name(), DRAFT_COOKIE);
        assert!(cookie.http_only().unwrap());
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::minutes(30)));
    }
}
