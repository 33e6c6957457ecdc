// ============================================================================
// WIDGET STATE - Estado único de la instancia del widget
// ============================================================================
// Se modela explícitamente en vez de releer el DOM.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::WidgetError;
use crate::models::{BookingMode, RawFormValues};
use crate::state::{DriverListState, ReactiveState, RequestTracker, SelectionState};

/// Estado visible de la zona de mensajes del widget
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetStatus {
    Idle,
    /// Carga de la lista completa inicial
    LoadingRoster,
    Loading,
    Ready,
    /// No es un error: "aucun transporteur disponible pour cette période"
    Empty,
    Error { message: String, retryable: bool },
    /// Validación local, no se envió nada al servidor
    Invalid { message: String },
}

impl WidgetStatus {
    pub fn from_error(err: &WidgetError) -> Self {
        match err {
            WidgetError::Validation(message) => WidgetStatus::Invalid { message: message.clone() },
            other => WidgetStatus::Error {
                message: other.to_string(),
                retryable: other.is_retryable(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetStatus::Loading | WidgetStatus::LoadingRoster)
    }
}

/// Estado de la instancia (Rc<RefCell> compartido entre closures de eventos)
#[derive(Clone)]
pub struct WidgetState {
    pub selection: Rc<RefCell<SelectionState>>,
    pub list: Rc<RefCell<DriverListState>>,
    pub tracker: Rc<RefCell<RequestTracker>>,
    pub status: Rc<ReactiveState<WidgetStatus>>,
    pub mode: Rc<RefCell<BookingMode>>,
    /// Último intento (para "Réessayer")
    pub last_attempt: Rc<RefCell<Option<RawFormValues>>>,
    pub language: Rc<RefCell<String>>,
    pub panel_open: Rc<RefCell<bool>>,
}

impl WidgetState {
    pub fn new(language: &str) -> Self {
        Self {
            selection: Rc::new(RefCell::new(SelectionState::new())),
            list: Rc::new(RefCell::new(DriverListState::new())),
            tracker: Rc::new(RefCell::new(RequestTracker::new())),
            status: Rc::new(ReactiveState::new(WidgetStatus::Idle)),
            mode: Rc::new(RefCell::new(BookingMode::Standard)),
            last_attempt: Rc::new(RefCell::new(None)),
            language: Rc::new(RefCell::new(language.to_string())),
            panel_open: Rc::new(RefCell::new(true)),
        }
    }

    pub fn lang(&self) -> String {
        self.language.borrow().clone()
    }

    pub fn set_status(&self, status: WidgetStatus) {
        self.status.set(status);
    }

    pub fn status(&self) -> WidgetStatus {
        self.status.get()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_rendered_states() {
        let invalid = WidgetStatus::from_error(&WidgetError::Validation("Date de début requise".into()));
        assert_eq!(invalid, WidgetStatus::Invalid { message: "Date de début requise".into() });

        let http = WidgetStatus::from_error(&WidgetError::Http { status: 500, message: "boom".into() });
        assert!(matches!(http, WidgetStatus::Error { retryable: true, .. }));
    }

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = WidgetState::new("FR");
        assert_eq!(state.status(), WidgetStatus::Idle);
        assert_eq!(state.selected_count(), 0);
        assert_eq!(*state.mode.borrow(), BookingMode::Standard);
    }
}
