// ============================================================================
// ERRORES DEL WIDGET
// ============================================================================
// Todo error termina en un estado renderizado (WidgetStatus), nunca en alert()
// ni en una promesa rechazada sin manejar.
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    /// Campo obligatorio vacío o inválido (no se envía nada al servidor)
    #[error("{0}")]
    Validation(String),

    #[error("Erreur réseau : {0}")]
    Network(String),

    #[error("Le serveur n'a pas répondu dans les {0} ms")]
    Timeout(u32),

    #[error("Erreur HTTP {status} : {message}")]
    Http { status: u16, message: String },

    #[error("Réponse illisible : {0}")]
    Parse(String),

    #[error("Erreur DOM : {0}")]
    Dom(String),
}

/// Taxonomía visible para el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    NetworkError,
}

impl WidgetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WidgetError::Validation(_) => ErrorKind::ValidationError,
            _ => ErrorKind::NetworkError,
        }
    }

    /// Se ofrece el botón "Réessayer" solo para estos
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WidgetError::Network(_)
                | WidgetError::Timeout(_)
                | WidgetError::Http { .. }
                | WidgetError::Parse(_)
        )
    }
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Dom(format!("{:?}", value))
    }
}

impl From<gloo_net::Error> for WidgetError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => WidgetError::Parse(e.to_string()),
            other => WidgetError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_not_retryable() {
        let err = WidgetError::Validation("Date de début requise".to_string());
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Date de début requise");
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let http = WidgetError::Http { status: 500, message: "Internal Server Error".to_string() };
        assert_eq!(http.kind(), ErrorKind::NetworkError);
        assert!(http.is_retryable());
        assert_eq!(http.to_string(), "Erreur HTTP 500 : Internal Server Error");

        assert!(WidgetError::Timeout(10_000).is_retryable());
        assert!(!WidgetError::Dom("x".to_string()).is_retryable());
    }
}
