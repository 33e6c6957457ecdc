use serde::{Deserialize, Serialize};

/// Modo de la prestation: un cliente / una ruta, o varios clientes / varias etapas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookingMode {
    #[default]
    Standard,
    Groupage,
}

impl BookingMode {
    /// Valor del campo oculto `move_category`
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingMode::Standard => "Standard",
            BookingMode::Groupage => "Groupage",
        }
    }

    /// Interpreta el valor renderizado por el servidor (campo oculto o `mode_groupage`)
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "groupage" | "true" | "1" => Some(BookingMode::Groupage),
            "standard" | "false" | "0" => Some(BookingMode::Standard),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            BookingMode::Standard => BookingMode::Groupage,
            BookingMode::Groupage => BookingMode::Standard,
        }
    }

    pub fn is_groupage(&self) -> bool {
        matches!(self, BookingMode::Groupage)
    }

    /// Clase CSS aplicada al body
    pub fn body_class(&self) -> &'static str {
        match self {
            BookingMode::Standard => "mode-standard",
            BookingMode::Groupage => "mode-groupage",
        }
    }
}
