use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NO_VEHICLE: &str = "Pas de véhicule";

/// Transporteur (solo lectura desde el cliente)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub vehicle: String,
    pub vehicle_suitable: bool,
}

/// Transporteur ocupado que se libera después de la fecha de inicio
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SoonAvailableDriver {
    pub driver: Driver,
    pub available_from: NaiveDate,
}

/// Forma del JSON que devuelve el backend Flask
/// (`/api/transporteurs/liste` y `/api/transporteurs/check-disponibilite`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DriverDto {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default, alias = "vehicle")]
    pub vehicule: Option<String>,
    #[serde(default, alias = "vehicle_suitable")]
    pub vehicule_adapte: bool,
    #[serde(default, alias = "available_from")]
    pub disponible_le: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl DriverDto {
    pub fn display_name(&self) -> String {
        let prenom = self.prenom.as_deref().unwrap_or("").trim();
        let nom = self.nom.as_deref().unwrap_or("").trim();
        let full = format!("{} {}", prenom, nom).trim().to_string();
        if full.is_empty() {
            format!("Transporteur #{}", self.id)
        } else {
            full
        }
    }

    pub fn to_driver(&self) -> Driver {
        let vehicle = self
            .vehicule
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(NO_VEHICLE)
            .to_string();

        Driver {
            id: self.id,
            name: self.display_name(),
            vehicle,
            vehicle_suitable: self.vehicule_adapte,
        }
    }

    /// None si falta la fecha o no se puede interpretar
    pub fn to_soon_available(&self) -> Option<SoonAvailableDriver> {
        let raw = self.disponible_le.as_deref()?;
        match parse_flexible_date(raw) {
            Some(available_from) => Some(SoonAvailableDriver {
                driver: self.to_driver(),
                available_from,
            }),
            None => {
                log::warn!("⚠️ [API] Transporteur {} ignoré : date de disponibilité illisible '{}'", self.id, raw);
                None
            }
        }
    }
}

/// Acepta `YYYY-MM-DD` (inputs HTML) y `DD/MM/YYYY` (formato del backend)
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}
