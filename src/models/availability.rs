use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::WidgetError;
use crate::models::driver::{parse_flexible_date, Driver, DriverDto, SoonAvailableDriver};

/// Valores tal como se leen del formulario (strings sin validar)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFormValues {
    pub start: String,
    pub end: String,
    pub move_type: String,
    pub booking_id: String,
}

impl RawFormValues {
    /// Los tres campos observados tienen valor (prefill del modo edición)
    pub fn is_complete(&self) -> bool {
        !self.start.trim().is_empty()
            && !self.end.trim().is_empty()
            && !self.move_type.trim().is_empty()
    }

    pub fn validate(&self) -> Result<AvailabilityQuery, WidgetError> {
        let start = required_date(&self.start, "Date de début")?;
        let end = required_date(&self.end, "Date de fin")?;

        if start > end {
            return Err(WidgetError::Validation(
                "La date de fin doit être postérieure ou égale à la date de début".to_string(),
            ));
        }

        let move_type_id = required_id(&self.move_type, "Type de déménagement")?;
        // booking_id viene de un campo oculto: si es basura se ignora
        let booking_id = self.booking_id.trim().parse::<i64>().ok();

        Ok(AvailabilityQuery {
            start_date: start,
            end_date: end,
            move_type_id,
            booking_id,
        })
    }
}

fn required_date(raw: &str, label: &str) -> Result<NaiveDate, WidgetError> {
    if raw.trim().is_empty() {
        return Err(WidgetError::Validation(format!("{} requise", label)));
    }
    parse_flexible_date(raw)
        .ok_or_else(|| WidgetError::Validation(format!("{} invalide : '{}'", label, raw.trim())))
}

/// El endpoint responde 400 sin `type_demenagement_id`
fn required_id(raw: &str, label: &str) -> Result<i64, WidgetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WidgetError::Validation(format!("{} requis", label)));
    }
    raw.parse::<i64>()
        .map_err(|_| WidgetError::Validation(format!("{} invalide : '{}'", label, raw)))
}

/// Parámetros de la consulta de disponibilidad
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub move_type_id: i64,
    /// Solo en modo edición: el servidor excluye las asignaciones de esta prestation
    pub booking_id: Option<i64>,
}

impl AvailabilityQuery {
    /// Cuerpo form-encoded esperado por el backend
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("date_debut", self.start_date.format("%Y-%m-%d").to_string()),
            ("date_fin", self.end_date.format("%Y-%m-%d").to_string()),
            ("type_demenagement_id", self.move_type_id.to_string()),
        ];
        if let Some(booking) = self.booking_id {
            pairs.push(("prestation_id", booking.to_string()));
        }
        pairs
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RecommendedVehicle {
    pub nom: String,
    #[serde(default)]
    pub description: String,
}

/// Respuesta cruda de `check-disponibilite`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, alias = "available", alias = "disponibles")]
    pub transporteurs: Vec<DriverDto>,
    #[serde(default, alias = "bientot_disponibles")]
    pub soon_available: Vec<DriverDto>,
    #[serde(default)]
    pub vehicules_recommandes: Vec<RecommendedVehicle>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Respuesta cruda de la lista completa de transporteurs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RosterResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub transporteurs: Vec<DriverDto>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl RosterResponse {
    pub fn into_drivers(self) -> Result<Vec<Driver>, WidgetError> {
        if !self.success {
            return Err(server_refusal(self.message));
        }
        let mut seen = HashSet::new();
        Ok(self
            .transporteurs
            .iter()
            .filter(|dto| seen.insert(dto.id))
            .map(DriverDto::to_driver)
            .collect())
    }
}

fn server_refusal(message: Option<String>) -> WidgetError {
    WidgetError::Http {
        status: 200,
        message: message.unwrap_or_else(|| "Réponse refusée par le serveur".to_string()),
    }
}

/// Resultado normalizado: cada id aparece como mucho en una partición
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AvailabilityResult {
    pub available: Vec<Driver>,
    pub soon_available: Vec<SoonAvailableDriver>,
    pub recommended_vehicles: Vec<RecommendedVehicle>,
}

impl AvailabilityResult {
    pub fn from_response(response: AvailabilityResponse) -> Result<Self, WidgetError> {
        if !response.success {
            return Err(server_refusal(response.message));
        }

        let mut seen = HashSet::new();

        let available: Vec<Driver> = response
            .transporteurs
            .iter()
            .filter(|dto| seen.insert(dto.id))
            .map(DriverDto::to_driver)
            .collect();

        // Un id ya disponible nunca se repite en "bientôt disponibles"
        let soon_available: Vec<SoonAvailableDriver> = response
            .soon_available
            .iter()
            .filter_map(DriverDto::to_soon_available)
            .filter(|soon| seen.insert(soon.driver.id))
            .collect();

        Ok(Self {
            available,
            soon_available,
            recommended_vehicles: response.vehicules_recommandes,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.soon_available.is_empty()
    }

    pub fn driver_ids(&self) -> Vec<i64> {
        self.available
            .iter()
            .map(|d| d.id)
            .chain(self.soon_available.iter().map(|s| s.driver.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(start: &str, end: &str, move_type: &str) -> RawFormValues {
        RawFormValues {
            start: start.to_string(),
            end: end.to_string(),
            move_type: move_type.to_string(),
            booking_id: String::new(),
        }
    }

    #[test]
    fn missing_dates_fail_validation() {
        let err = raw("", "2024-06-03", "3").validate().unwrap_err();
        assert!(matches!(err, WidgetError::Validation(ref m) if m.contains("début")));
        let err = raw("2024-06-01", "  ", "3").validate().unwrap_err();
        assert!(matches!(err, WidgetError::Validation(ref m) if m.contains("fin")));
    }

    #[test]
    fn inverted_range_fails_validation() {
        assert!(matches!(
            raw("2024-06-04", "2024-06-03", "3").validate(),
            Err(WidgetError::Validation(_))
        ));
    }

    #[test]
    fn valid_query_builds_form_body() {
        let mut values = raw("2024-06-01", "2024-06-03", "3");
        values.booking_id = "42".to_string();
        let query = values.validate().expect("valid");
        assert_eq!(
            query.to_form_pairs(),
            vec![
                ("date_debut", "2024-06-01".to_string()),
                ("date_fin", "2024-06-03".to_string()),
                ("type_demenagement_id", "3".to_string()),
                ("prestation_id", "42".to_string()),
            ]
        );
    }

    #[test]
    fn move_type_is_required_and_numeric() {
        let err = raw("2024-06-01", "2024-06-03", "  ").validate().unwrap_err();
        assert_eq!(err, WidgetError::Validation("Type de déménagement requis".to_string()));
        assert!(!err.is_retryable());
        assert!(matches!(
            raw("2024-06-01", "2024-06-03", "abc").validate(),
            Err(WidgetError::Validation(_))
        ));
        assert!(!raw("2024-06-01", "2024-06-03", "").is_complete());
    }

    #[test]
    fn form_body_always_carries_move_type() {
        let query = raw("2024-06-01", "2024-06-03", " 7 ").validate().unwrap();
        assert_eq!(query.move_type_id, 7);
        assert!(query
            .to_form_pairs()
            .contains(&("type_demenagement_id", "7".to_string())));
    }

    #[test]
    fn response_is_partitioned() {
        let json = r#"{
            "success": true,
            "transporteurs": [{"id": 1, "nom": "A"}, {"id": 1, "nom": "A bis"}],
            "soon_available": [
                {"id": 1, "nom": "A", "disponible_le": "05/06/2024"},
                {"id": 2, "nom": "B", "disponible_le": "05/06/2024"}
            ],
            "vehicules_recommandes": [{"nom": "Camion 30m³", "description": "Maisons"}]
        }"#;
        let response: AvailabilityResponse = serde_json::from_str(json).unwrap();
        let result = AvailabilityResult::from_response(response).unwrap();

        assert_eq!(result.available.len(), 1);
        assert_eq!(result.available[0].name, "A");
        assert_eq!(result.soon_available.len(), 1);
        assert_eq!(result.soon_available[0].driver.id, 2);
        assert_eq!(result.driver_ids(), vec![1, 2]);
        assert_eq!(result.recommended_vehicles.len(), 1);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r#"{"disponibles": [{"id": 5, "nom": "E"}], "bientot_disponibles": []}"#;
        let response: AvailabilityResponse = serde_json::from_str(json).unwrap();
        let result = AvailabilityResult::from_response(response).unwrap();
        assert_eq!(result.driver_ids(), vec![5]);
    }

    #[test]
    fn unsuccessful_payload_is_an_error() {
        let json = r#"{"success": false, "message": "Données manquantes"}"#;
        let response: AvailabilityResponse = serde_json::from_str(json).unwrap();
        match AvailabilityResult::from_response(response) {
            Err(WidgetError::Http { message, .. }) => assert_eq!(message, "Données manquantes"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn roster_drops_duplicate_ids() {
        let json = r#"{"success": true, "transporteurs": [{"id": 1, "nom": "A"}, {"id": 1, "nom": "A"}, {"id": 3, "nom": "C"}]}"#;
        let roster: RosterResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = roster.into_drivers().unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
