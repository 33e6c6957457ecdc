use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub request_timeout_ms: u32,
    pub debounce_ms: u32,
    pub language: String,
    pub endpoints: Endpoints,
    pub bindings: FormBindings,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            request_timeout_ms: 10_000,
            debounce_ms: 300,
            language: "FR".to_string(),
            endpoints: Endpoints::default(),
            bindings: FormBindings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub roster: String,
    pub availability: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            roster: "/api/transporteurs/liste".to_string(),
            availability: "/api/transporteurs/check-disponibilite".to_string(),
        }
    }
}

/// Ids y nombres de campos del formulario de prestation (renderizado por el servidor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormBindings {
    pub form_selector: String,
    pub widget_root_id: String,
    pub start_date_id: String,
    pub end_date_id: String,
    pub move_type_id: String,
    pub booking_id_field: String,
    pub selected_ids_field: String,
    pub move_category_field: String,
    pub standard_button_id: String,
    pub groupage_button_id: String,
    pub mode_switch_id: String,
    pub groupage_section_ids: Vec<String>,
    pub departure_stops_id: String,
    pub arrival_stops_id: String,
    pub extra_clients_id: String,
    /// Observaciones adicionales: visibles en ambos modos
    pub extra_observations_id: String,
}

impl Default for FormBindings {
    fn default() -> Self {
        Self {
            form_selector: "form#prestation-form".to_string(),
            widget_root_id: "transporteurs-widget".to_string(),
            start_date_id: "date_debut".to_string(),
            end_date_id: "date_fin".to_string(),
            move_type_id: "type_demenagement_id".to_string(),
            booking_id_field: "prestation_id".to_string(),
            selected_ids_field: "transporteur_ids".to_string(),
            move_category_field: "move_category".to_string(),
            standard_button_id: "btn-standard".to_string(),
            groupage_button_id: "btn-groupage".to_string(),
            mode_switch_id: "prestation-type-switch".to_string(),
            groupage_section_ids: vec![
                "clients-supplementaires".to_string(),
                "ajouter-client".to_string(),
                "ajouter-etape-depart".to_string(),
                "ajouter-etape-arrivee".to_string(),
                "etapes-depart".to_string(),
                "etapes-arrivee".to_string(),
            ],
            departure_stops_id: "etapes-depart".to_string(),
            arrival_stops_id: "etapes-arrivee".to_string(),
            extra_clients_id: "clients-supplementaires".to_string(),
            extra_observations_id: "observations-supplementaires".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or("")
                .trim_end_matches('/')
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            request_timeout_ms: option_env!("REQUEST_TIMEOUT_MS")
                .unwrap_or("10000").parse().unwrap_or(10_000),
            debounce_ms: option_env!("DEBOUNCE_MS")
                .unwrap_or("300").parse().unwrap_or(300),
            language: option_env!("WIDGET_LANGUAGE")
                .unwrap_or("FR").to_uppercase(),
            endpoints: Endpoints {
                roster: option_env!("ROSTER_ENDPOINT")
                    .map(|s| s.to_string())
                    .unwrap_or(defaults.endpoints.roster),
                availability: option_env!("AVAILABILITY_ENDPOINT")
                    .map(|s| s.to_string())
                    .unwrap_or(defaults.endpoints.availability),
            },
            bindings: defaults.bindings,
        }
    }

    /// URL absoluta (o relativa al origen) de un endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    pub fn roster_url(&self) -> String {
        self.url(&self.endpoints.roster)
    }

    pub fn availability_url(&self) -> String {
        self.url(&self.endpoints.availability)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: WidgetConfig = WidgetConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_are_the_canonical_ones() {
        let config = WidgetConfig::default();
        assert_eq!(config.roster_url(), "/api/transporteurs/liste");
        assert_eq!(config.availability_url(), "/api/transporteurs/check-disponibilite");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn base_url_is_prefixed() {
        let config = WidgetConfig {
            api_base_url: "https://backoffice.example".to_string(),
            ..WidgetConfig::default()
        };
        assert_eq!(
            config.availability_url(),
            "https://backoffice.example/api/transporteurs/check-disponibilite"
        );
    }

    #[test]
    fn logging_flag_drives_level() {
        let mut config = WidgetConfig::default();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
    }

    #[test]
    fn observations_stay_visible_in_standard_mode() {
        let bindings = FormBindings::default();
        assert_eq!(bindings.extra_observations_id, "observations-supplementaires");
        assert!(!bindings
            .groupage_section_ids
            .iter()
            .any(|id| id.contains("observation")));
    }
}
