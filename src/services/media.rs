// src/services/media.rs

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{common::error::AppError, db::ClubRepository, models::club::Club};

/// Tamaño máximo de un archivo subido (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Extensiones aceptadas para branding
const EXTENSIONES_PERMITIDAS: &[&str] = &["png", "jpg", "jpeg", "webp", "svg"];

/// Carpetas que se aprovisionan al crear un club, cada una con su
/// placeholder `.keep` (mismo layout que el bucket original).
const CARPETAS_CLUB: &[&str] = &[
    "branding",
    "canchas",
    "staff",
    "gallery",
    "nosotros",
    "profesores",
    "quinchos",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoBranding {
    Logo,
    Hero,
}

impl TipoBranding {
    pub fn desde_slug(slug: &str) -> Option<Self> {
        match slug {
            "logo" => Some(TipoBranding::Logo),
            "hero" => Some(TipoBranding::Hero),
            _ => None,
        }
    }

    fn nombre_archivo(&self) -> &'static str {
        match self {
            TipoBranding::Logo => "logo",
            TipoBranding::Hero => "hero_home",
        }
    }
}

/// Ruta relativa dentro del storage: `club_{id}/branding/logo.<ext>` o
/// `club_{id}/branding/hero_home.<ext>`.
pub fn ruta_branding(club_id: Uuid, tipo: TipoBranding, ext: &str) -> String {
    format!("club_{}/branding/{}.{}", club_id, tipo.nombre_archivo(), ext)
}

fn extension_de(filename: &str) -> Result<String, AppError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            AppError::InvalidInput(format!("El archivo '{}' no tiene extensión.", filename))
        })?;

    if !EXTENSIONES_PERMITIDAS.contains(&ext.as_str()) {
        return Err(AppError::InvalidInput(format!(
            "Formato '{}' no soportado. Aceptados: {}",
            ext,
            EXTENSIONES_PERMITIDAS.join(", ")
        )));
    }

    Ok(ext)
}

#[derive(Clone)]
pub struct MediaService {
    storage_root: PathBuf,
    club_repo: ClubRepository,
}

impl MediaService {
    pub fn new(storage_root: PathBuf, club_repo: ClubRepository) -> Self {
        Self { storage_root, club_repo }
    }

    /// Crea el árbol de carpetas del club con sus `.keep`. Se llama al
    /// crear el club desde el super-admin.
    pub async fn provisionar_club(&self, club_id: Uuid) -> Result<(), AppError> {
        for carpeta in CARPETAS_CLUB {
            let dir = self.storage_root.join(format!("club_{}", club_id)).join(carpeta);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| anyhow::anyhow!("No se pudo crear {}: {}", dir.display(), e))?;
            tokio::fs::write(dir.join(".keep"), b"")
                .await
                .map_err(|e| anyhow::anyhow!("No se pudo escribir .keep: {}", e))?;
        }

        tracing::info!(club_id = %club_id, "Carpetas de storage aprovisionadas");
        Ok(())
    }

    /// Sube logo o hero del club, pisa el anterior y actualiza la URL
    /// en la fila del club. Devuelve el club actualizado.
    pub async fn subir_branding(
        &self,
        club_id: Uuid,
        tipo: TipoBranding,
        filename: &str,
        data: &[u8],
    ) -> Result<Club, AppError> {
        if data.is_empty() {
            return Err(AppError::InvalidInput("El archivo está vacío.".to_string()));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::InvalidInput(format!(
                "El archivo supera el máximo de {}MB.",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let ext = extension_de(filename)?;
        let ruta_relativa = ruta_branding(club_id, tipo, &ext);
        let destino = self.storage_root.join(&ruta_relativa);

        if let Some(padre) = destino.parent() {
            tokio::fs::create_dir_all(padre)
                .await
                .map_err(|e| anyhow::anyhow!("No se pudo crear la carpeta: {}", e))?;
        }
        tokio::fs::write(&destino, data)
            .await
            .map_err(|e| anyhow::anyhow!("No se pudo guardar el archivo: {}", e))?;

        let url = format!("/media/{}", ruta_relativa);
        let club = self
            .club_repo
            .update_branding_url(club_id, tipo == TipoBranding::Logo, &url)
            .await?;

        tracing::info!(club_id = %club_id, url = %url, "Branding actualizado");
        Ok(club)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rutas_de_branding() {
        let id = Uuid::nil();
        assert_eq!(
            ruta_branding(id, TipoBranding::Logo, "png"),
            format!("club_{}/branding/logo.png", id)
        );
        assert_eq!(
            ruta_branding(id, TipoBranding::Hero, "webp"),
            format!("club_{}/branding/hero_home.webp", id)
        );
    }

    #[test]
    fn extensiones_validadas() {
        assert_eq!(extension_de("logo.PNG").unwrap(), "png");
        assert_eq!(extension_de("foto.jpeg").unwrap(), "jpeg");
        assert!(extension_de("script.exe").is_err());
        assert!(extension_de("sin_extension").is_err());
    }

    #[test]
    fn slugs_de_tipo() {
        assert_eq!(TipoBranding::desde_slug("logo"), Some(TipoBranding::Logo));
        assert_eq!(TipoBranding::desde_slug("hero"), Some(TipoBranding::Hero));
        assert_eq!(TipoBranding::desde_slug("otro"), None);
    }
}
