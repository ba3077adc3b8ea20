// src/services/pricing.rs

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CanchaRepository, TarifaRepository},
    models::{
        membresia::RolClub,
        tarifa::{Cotizacion, ReglaTarifa, Segmento},
    },
};

// ---
// 1. Decisión de segmento
// ---

/// Regla canónica y ÚNICA de segmento: un usuario cotiza como
/// profesional si y solo si su rol en el club resuelto es `profe`.
/// Tanto la cotización como la escritura del draft pasan por acá.
pub fn segmento_para(rol_en_club: Option<RolClub>) -> Segmento {
    match rol_en_club {
        Some(RolClub::Profe) => Segmento::Profesional,
        _ => Segmento::Publico,
    }
}

// ---
// 2. Matcher puro de reglas
// ---

/// Día de la semana como lo guardan las reglas: 0 = domingo .. 6 = sábado.
fn dia_semana_de(fecha: NaiveDate) -> i16 {
    fecha.weekday().num_days_from_sunday() as i16
}

fn minutos_desde_medianoche(t: NaiveTime) -> i32 {
    (t.num_seconds_from_midnight() / 60) as i32
}

/// Duración del slot en minutos. `fin <= inicio` solo es válido si el
/// slot declara que termina al día siguiente.
pub fn duracion_slot(
    inicio: NaiveTime,
    fin: NaiveTime,
    termina_dia_siguiente: bool,
) -> Result<i32, AppError> {
    let i = minutos_desde_medianoche(inicio);
    let mut f = minutos_desde_medianoche(fin);
    if termina_dia_siguiente {
        f += 24 * 60;
    }
    if f <= i {
        return Err(AppError::InvalidInput(
            "El rango horario es inválido: el fin debe ser posterior al inicio.".to_string(),
        ));
    }
    Ok(f - i)
}

/// ¿La ventana [hora_inicio, hora_fin) de la regla contiene al slot?
/// Una regla con `cruza_medianoche` se desenrolla pasando las 24:00
/// (22:00-02:00 => [1320, 1560)).
fn ventana_contiene(
    regla: &ReglaTarifa,
    inicio: NaiveTime,
    fin: NaiveTime,
    slot_cruza: bool,
) -> bool {
    let ri = minutos_desde_medianoche(regla.hora_inicio);
    let mut rf = minutos_desde_medianoche(regla.hora_fin);
    if regla.cruza_medianoche {
        rf += 24 * 60;
    }
    if rf <= ri {
        // ventana mal cargada; no matchea nunca
        return false;
    }

    let si = minutos_desde_medianoche(inicio);
    let mut sf = minutos_desde_medianoche(fin);
    if slot_cruza {
        sf += 24 * 60;
    }

    if ri <= si && sf <= rf {
        return true;
    }
    // Slot de madrugada contra una ventana nocturna del día anterior
    // (regla 22:00-02:00, slot 00:30-01:30).
    regla.cruza_medianoche && ri <= si + 24 * 60 && sf + 24 * 60 <= rf
}

fn vigencia_contiene(regla: &ReglaTarifa, fecha: NaiveDate) -> bool {
    if let Some(desde) = regla.vigente_desde {
        if fecha < desde {
            return false;
        }
    }
    if let Some(hasta) = regla.vigente_hasta {
        if fecha > hasta {
            return false;
        }
    }
    true
}

/// Selección determinística de la regla aplicable.
///
/// Filtra por segmento (el del caller, con `publico` como fallback),
/// vigencia, día de semana y ventana horaria; después ordena por
/// prioridad descendente y, a igual prioridad, por especificidad:
/// segmento exacto sobre genérico, día exacto sobre "cualquiera",
/// duración más cercana (exacta primero), hora de inicio más temprana.
/// El orden de llegada desde el storage nunca decide.
pub fn elegir_regla<'a>(
    reglas: &'a [ReglaTarifa],
    fecha: NaiveDate,
    inicio: NaiveTime,
    fin: NaiveTime,
    termina_dia_siguiente: bool,
    segmento: Segmento,
) -> Result<Option<&'a ReglaTarifa>, AppError> {
    let duracion = duracion_slot(inicio, fin, termina_dia_siguiente)?;
    let dia = dia_semana_de(fecha);

    let mut candidatas: Vec<&ReglaTarifa> = reglas
        .iter()
        .filter(|r| r.activa)
        .filter(|r| r.segmento == segmento || r.segmento == Segmento::Publico)
        .filter(|r| vigencia_contiene(r, fecha))
        .filter(|r| r.dia_semana.is_none() || r.dia_semana == Some(dia))
        .filter(|r| ventana_contiene(r, inicio, fin, termina_dia_siguiente))
        .collect();

    candidatas.sort_by(|a, b| {
        b.prioridad
            .cmp(&a.prioridad)
            .then_with(|| (b.segmento == segmento).cmp(&(a.segmento == segmento)))
            .then_with(|| b.dia_semana.is_some().cmp(&a.dia_semana.is_some()))
            .then_with(|| {
                (a.duracion_min - duracion)
                    .abs()
                    .cmp(&(b.duracion_min - duracion).abs())
            })
            .then_with(|| a.hora_inicio.cmp(&b.hora_inicio))
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(candidatas.first().copied())
}

/// Precio de fallback: la tarifa base por hora de la cancha,
/// prorrateada por la duración pedida.
pub fn precio_base_prorrateado(precio_base_hora: Decimal, duracion_min: i32) -> Decimal {
    precio_base_hora * Decimal::from(duracion_min) / Decimal::from(60)
}

// ---
// 3. Servicio de cotización
// ---

#[derive(Clone)]
pub struct PricingService {
    tarifa_repo: TarifaRepository,
    cancha_repo: CanchaRepository,
}

impl PricingService {
    pub fn new(tarifa_repo: TarifaRepository, cancha_repo: CanchaRepository) -> Self {
        Self { tarifa_repo, cancha_repo }
    }

    /// Cotización autoritativa server-side. Jamás acepta un precio del
    /// cliente: solo ids, fecha y horario.
    pub async fn cotizar(
        &self,
        club_id: Uuid,
        cancha_id: Uuid,
        fecha: NaiveDate,
        inicio: NaiveTime,
        fin: NaiveTime,
        termina_dia_siguiente: bool,
        segmento: Segmento,
    ) -> Result<Cotizacion, AppError> {
        let cancha = self
            .cancha_repo
            .find(club_id, cancha_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cancha no encontrada.".to_string()))?;

        let duracion = duracion_slot(inicio, fin, termina_dia_siguiente)?;
        let reglas = self.tarifa_repo.reglas_activas_del_club(club_id).await?;

        match elegir_regla(&reglas, fecha, inicio, fin, termina_dia_siguiente, segmento)? {
            Some(regla) => Ok(Cotizacion {
                precio_total: regla.precio,
                duracion_min: duracion,
                segmento,
                id_tarifario: Some(regla.tarifario_id),
                id_regla: Some(regla.id),
            }),
            None => Ok(Cotizacion {
                precio_total: precio_base_prorrateado(cancha.precio_base, duracion),
                duracion_min: duracion,
                segmento,
                id_tarifario: None,
                id_regla: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // lunes
    fn fecha_lunes() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn regla_base() -> ReglaTarifa {
        ReglaTarifa {
            id: Uuid::new_v4(),
            tarifario_id: Uuid::new_v4(),
            segmento: Segmento::Publico,
            dia_semana: None,
            hora_inicio: t(8, 0),
            hora_fin: t(22, 0),
            cruza_medianoche: false,
            duracion_min: 60,
            precio: dec("8000"),
            prioridad: 0,
            activa: true,
            vigente_desde: None,
            vigente_hasta: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn segmento_profe_solo_con_rol_profe() {
        assert_eq!(segmento_para(Some(RolClub::Profe)), Segmento::Profesional);
        assert_eq!(segmento_para(Some(RolClub::Admin)), Segmento::Publico);
        assert_eq!(segmento_para(Some(RolClub::Cliente)), Segmento::Publico);
        assert_eq!(segmento_para(None), Segmento::Publico);
    }

    #[test]
    fn rango_invalido_sin_flag_de_dia_siguiente() {
        assert!(duracion_slot(t(23, 0), t(1, 0), false).is_err());
        assert_eq!(duracion_slot(t(23, 0), t(1, 0), true).unwrap(), 120);
        assert_eq!(duracion_slot(t(10, 0), t(11, 30), false).unwrap(), 90);
    }

    #[test]
    fn gana_la_prioridad_mas_alta() {
        let mut barata = regla_base();
        barata.prioridad = 1;
        barata.precio = dec("5000");
        let mut cara = regla_base();
        cara.prioridad = 10;
        cara.precio = dec("9000");

        let reglas = vec![barata, cara.clone()];
        let elegida = elegir_regla(&reglas, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Publico)
            .unwrap()
            .unwrap();
        assert_eq!(elegida.id, cara.id);
    }

    #[test]
    fn empate_de_prioridad_lo_rompe_la_especificidad() {
        let generica = regla_base();
        let mut del_dia = regla_base();
        del_dia.dia_semana = Some(1); // lunes
        del_dia.precio = dec("7000");

        // el orden del vector no importa
        let reglas = vec![generica.clone(), del_dia.clone()];
        let a = elegir_regla(&reglas, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Publico)
            .unwrap()
            .unwrap();
        let reglas_invertidas = vec![del_dia.clone(), generica];
        let b = elegir_regla(&reglas_invertidas, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Publico)
            .unwrap()
            .unwrap();

        assert_eq!(a.id, del_dia.id);
        assert_eq!(b.id, del_dia.id);
    }

    #[test]
    fn profesional_prefiere_su_segmento_pero_cae_a_publico() {
        let publica = regla_base();
        let mut profe = regla_base();
        profe.segmento = Segmento::Profesional;
        profe.precio = dec("4000");

        let reglas = vec![publica.clone(), profe.clone()];
        let para_profe =
            elegir_regla(&reglas, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Profesional)
                .unwrap()
                .unwrap();
        assert_eq!(para_profe.id, profe.id);

        // el público nunca ve la regla profesional
        let para_publico =
            elegir_regla(&reglas, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Publico)
                .unwrap()
                .unwrap();
        assert_eq!(para_publico.id, publica.id);

        // sin regla profesional, el profe usa la pública
        let solo_publica = vec![publica.clone()];
        let fallback =
            elegir_regla(&solo_publica, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Profesional)
                .unwrap()
                .unwrap();
        assert_eq!(fallback.id, publica.id);
    }

    #[test]
    fn ventana_nocturna_cruza_medianoche() {
        let mut nocturna = regla_base();
        nocturna.hora_inicio = t(22, 0);
        nocturna.hora_fin = t(2, 0);
        nocturna.cruza_medianoche = true;

        let reglas = vec![nocturna.clone()];

        // slot que también cruza
        let elegida = elegir_regla(&reglas, fecha_lunes(), t(23, 0), t(0, 30), true, Segmento::Publico)
            .unwrap();
        assert_eq!(elegida.map(|r| r.id), Some(nocturna.id));

        // slot de madrugada dentro del tramo desenrollado
        let madrugada = elegir_regla(&reglas, fecha_lunes(), t(0, 30), t(1, 30), false, Segmento::Publico)
            .unwrap();
        assert_eq!(madrugada.map(|r| r.id), Some(nocturna.id));

        // fuera de la ventana
        let fuera = elegir_regla(&reglas, fecha_lunes(), t(3, 0), t(4, 0), false, Segmento::Publico)
            .unwrap();
        assert!(fuera.is_none());
    }

    #[test]
    fn vigencia_y_dia_filtran() {
        let mut vencida = regla_base();
        vencida.vigente_hasta = Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        let mut de_martes = regla_base();
        de_martes.dia_semana = Some(2);
        let mut inactiva = regla_base();
        inactiva.activa = false;

        let reglas = vec![vencida, de_martes, inactiva];
        let elegida = elegir_regla(&reglas, fecha_lunes(), t(10, 0), t(11, 0), false, Segmento::Publico)
            .unwrap();
        assert!(elegida.is_none());
    }

    #[test]
    fn duracion_exacta_gana_a_la_cercana() {
        let mut de_60 = regla_base();
        de_60.duracion_min = 60;
        let mut de_90 = regla_base();
        de_90.duracion_min = 90;
        de_90.precio = dec("11000");

        let reglas = vec![de_60, de_90.clone()];
        let elegida = elegir_regla(&reglas, fecha_lunes(), t(10, 0), t(11, 30), false, Segmento::Publico)
            .unwrap()
            .unwrap();
        assert_eq!(elegida.id, de_90.id);
    }

    #[test]
    fn fallback_prorratea_el_precio_base() {
        // cancha a $10.000/hora, slot de 90 minutos => $15.000
        let precio = precio_base_prorrateado(dec("10000"), 90);
        assert_eq!(precio, dec("15000"));
    }
}
