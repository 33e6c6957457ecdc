// ============================================================================
// MODE VIEWMODEL - Standard / Groupage
// ============================================================================

use crate::models::BookingMode;
use crate::state::WidgetState;

/// Lo que la vista debe aplicar tras un cambio de modo.
/// Las secciones de groupage se ocultan, nunca se vacían.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeTransition {
    pub mode: BookingMode,
    pub show_groupage_sections: bool,
    pub hidden_value: &'static str,
    pub body_class_on: &'static str,
    pub body_class_off: &'static str,
}

impl ModeTransition {
    pub fn for_mode(mode: BookingMode) -> Self {
        Self {
            mode,
            show_groupage_sections: mode.is_groupage(),
            hidden_value: mode.as_str(),
            body_class_on: mode.body_class(),
            body_class_off: mode.toggled().body_class(),
        }
    }
}

pub struct ModeViewModel {
    state: WidgetState,
}

impl ModeViewModel {
    pub fn new(state: WidgetState) -> Self {
        Self { state }
    }

    pub fn current(&self) -> BookingMode {
        *self.state.mode.borrow()
    }

    /// Estado inicial leído del control renderizado por el servidor
    pub fn initialize(&self, initial: BookingMode) -> ModeTransition {
        *self.state.mode.borrow_mut() = initial;
        log::info!("🔀 [MODE] Mode initial: {}", initial.as_str());
        ModeTransition::for_mode(initial)
    }

    /// None si el modo no cambia
    pub fn switch(&self, mode: BookingMode) -> Option<ModeTransition> {
        if self.current() == mode {
            return None;
        }
        *self.state.mode.borrow_mut() = mode;
        log::info!("🔀 [MODE] {} -> {}", mode.toggled().as_str(), mode.as_str());
        Some(ModeTransition::for_mode(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groupage_reveals_sections_and_sets_hidden_value() {
        let vm = ModeViewModel::new(WidgetState::new("FR"));
        let standard = vm.initialize(BookingMode::Standard);
        assert!(!standard.show_groupage_sections);

        let groupage = vm.switch(BookingMode::Groupage).unwrap();
        assert!(groupage.show_groupage_sections);
        assert_eq!(groupage.hidden_value, "Groupage");
        assert_eq!(groupage.body_class_on, "mode-groupage");
        assert_eq!(groupage.body_class_off, "mode-standard");
    }

    #[test]
    fn round_trip_restores_original_visibility() {
        let vm = ModeViewModel::new(WidgetState::new("FR"));
        let initial = vm.initialize(BookingMode::Standard);
        vm.switch(BookingMode::Groupage).unwrap();
        let back = vm.switch(BookingMode::Standard).unwrap();
        assert_eq!(back, initial);
    }

    #[test]
    fn switching_to_current_mode_is_a_no_op() {
        let vm = ModeViewModel::new(WidgetState::new("FR"));
        vm.initialize(BookingMode::Groupage);
        assert!(vm.switch(BookingMode::Groupage).is_none());
        assert_eq!(vm.current(), BookingMode::Groupage);
    }
}
