// src/services/documents.rs

use genpdf::{Element, elements, style};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CanchaRepository, ReservaRepository},
    models::{club::Club, reserva::EstadoReserva},
};

/// Solo una reserva confirmada tiene comprobante; cualquier otro
/// estado es un conflicto, no un "todavía no".
fn comprobante_permitido(estado: EstadoReserva) -> Result<(), AppError> {
    if estado != EstadoReserva::Confirmada {
        return Err(AppError::Conflict(
            "Solo una reserva confirmada tiene comprobante.".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct DocumentService {
    reserva_repo: ReservaRepository,
    cancha_repo: CanchaRepository,
}

impl DocumentService {
    pub fn new(reserva_repo: ReservaRepository, cancha_repo: CanchaRepository) -> Self {
        Self { reserva_repo, cancha_repo }
    }

    /// Comprobante de una reserva CONFIRMADA; el resto de los estados
    /// los rebota `comprobante_permitido` antes de armar nada.
    pub async fn generar_comprobante_pdf(
        &self,
        club: &Club,
        reserva_id: Uuid,
    ) -> Result<Vec<u8>, AppError> {
        // 1. Busca los datos
        let reserva = self
            .reserva_repo
            .find(club.id, reserva_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada.".to_string()))?;

        comprobante_permitido(reserva.estado)?;

        let cancha = self
            .cancha_repo
            .find(club.id, reserva.cancha_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cancha no encontrada.".to_string()))?;

        // 2. Configura el PDF
        // Carga la fuente desde la carpeta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fuente no encontrada en ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Comprobante reserva {}", reserva.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABECERA DEL CLUB ---
        doc.push(
            elements::Paragraph::new(club.nombre.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("COMPROBANTE DE RESERVA")
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("N° {}", reserva.id)));
        doc.push(elements::Break::new(1.5));

        // --- DETALLE ---
        let mut table = elements::TableLayout::new(vec![2, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        let mut fila = |titulo: &str, valor: String| {
            table
                .row()
                .element(elements::Paragraph::new(titulo).styled(style_bold))
                .element(elements::Paragraph::new(valor))
                .push()
                .expect("Table error");
        };

        fila("Cancha", cancha.nombre.clone());
        fila("Fecha", reserva.fecha.format("%d/%m/%Y").to_string());
        fila(
            "Horario",
            format!(
                "{} - {}{}",
                reserva.hora_inicio.format("%H:%M"),
                reserva.hora_fin.format("%H:%M"),
                if reserva.termina_dia_siguiente { " (día siguiente)" } else { "" }
            ),
        );
        fila("Duración", format!("{} min", reserva.duracion_min));
        if let Some(nombre) = &reserva.nombre_contacto {
            fila("Cliente", nombre.clone());
        }
        fila("Total", format!("$ {:.2}", reserva.precio_total));
        fila(
            "Anticipo",
            format!(
                "$ {:.2} ({}%)",
                reserva.monto_anticipo, reserva.porcentaje_anticipo
            ),
        );
        if let Some(confirmed_at) = reserva.confirmed_at {
            fila(
                "Confirmada",
                confirmed_at.format("%d/%m/%Y %H:%M UTC").to_string(),
            );
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- QR DE VERIFICACIÓN ---
        // Codifica el id de la reserva para validarla en mostrador.
        let code = QrCode::new(reserva.id.to_string().as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- PIE ---
        if let Some(texto) = &club.texto_bienvenida {
            doc.push(elements::Break::new(2));
            doc.push(
                elements::Paragraph::new(texto.clone())
                    .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        // 3. Renderiza a memoria
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_la_confirmada_tiene_comprobante() {
        assert!(comprobante_permitido(EstadoReserva::Confirmada).is_ok());
    }

    #[test]
    fn cualquier_otro_estado_es_conflicto() {
        for estado in [
            EstadoReserva::PendientePago,
            EstadoReserva::Rechazada,
            EstadoReserva::Expirada,
            EstadoReserva::Cancelada,
        ] {
            assert!(matches!(
                comprobante_permitido(estado),
                Err(AppError::Conflict(_))
            ));
        }
    }
}
