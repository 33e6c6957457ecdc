// ============================================================================
// SELECTION VIEWMODEL - toggle + sincronización con el campo oculto
// ============================================================================
// Cada mutación termina en sync_to_form(): quien envía el formulario sin
// tocar nada más envía la lista correcta.
// ============================================================================

use std::rc::Rc;

use crate::state::{SelectionChange, WidgetState};

/// Destino del valor serializado (el input oculto `transporteur_ids`)
pub trait HiddenFieldSink {
    fn write(&self, value: &str);
    fn read(&self) -> String;
}

pub struct SelectionViewModel {
    state: WidgetState,
    sink: Rc<dyn HiddenFieldSink>,
}

impl SelectionViewModel {
    pub fn new(state: WidgetState, sink: Rc<dyn HiddenFieldSink>) -> Self {
        Self { state, sink }
    }

    /// Prefill desde el valor renderizado por el servidor (modo edición)
    pub fn seed_from_form(&self) -> usize {
        let raw = self.sink.read();
        let count = self.state.selection.borrow_mut().seed_from_field(&raw);
        if count > 0 {
            log::info!("📌 [SELECTION] {} transporteur(s) déjà assigné(s)", count);
        }
        self.sync_to_form();
        count
    }

    pub fn toggle(&self, id: i64) -> SelectionChange {
        let change = self.state.selection.borrow_mut().toggle(id);
        match change {
            SelectionChange::Rejected => {
                log::warn!("⚠️ [SELECTION] Transporteur {} inconnu, sélection ignorée", id);
            }
            _ => {
                log::debug!("✅ [SELECTION] {} -> {:?}", id, change);
                self.sync_to_form();
            }
        }
        change
    }

    pub fn get_selected(&self) -> Vec<i64> {
        self.state.selection.borrow().get_selected()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.state.selection.borrow().is_selected(id)
    }

    pub fn count(&self) -> usize {
        self.state.selected_count()
    }

    pub fn sync_to_form(&self) {
        let serialized = self.state.selection.borrow().serialize();
        self.sink.write(&serialized);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryField;
    use super::*;

    fn setup(initial: &str) -> (SelectionViewModel, Rc<MemoryField>) {
        let field = Rc::new(MemoryField::default());
        *field.value.borrow_mut() = initial.to_string();
        let state = WidgetState::new("FR");
        state.selection.borrow_mut().register_known([1, 2, 3]);
        (SelectionViewModel::new(state, field.clone()), field)
    }

    #[test]
    fn every_mutation_is_written_to_the_field() {
        let (vm, field) = setup("");
        vm.toggle(3);
        assert_eq!(*field.value.borrow(), "[3]");
        vm.toggle(1);
        assert_eq!(*field.value.borrow(), "[1,3]");
        vm.toggle(3);
        assert_eq!(*field.value.borrow(), "[1]");
        assert_eq!(*field.writes.borrow(), 3);
    }

    #[test]
    fn field_round_trips_with_selection() {
        let (vm, field) = setup("");
        vm.toggle(2);
        vm.toggle(1);
        let parsed: Vec<i64> = serde_json::from_str(&field.value.borrow()).unwrap();
        assert_eq!(parsed, vm.get_selected());
    }

    #[test]
    fn unknown_driver_is_a_no_op() {
        let (vm, field) = setup("");
        assert_eq!(vm.toggle(42), SelectionChange::Rejected);
        assert_eq!(*field.writes.borrow(), 0);
        assert!(vm.get_selected().is_empty());
    }

    #[test]
    fn edit_mode_prefill_is_normalized() {
        let (vm, field) = setup(r#"["9", 2]"#);
        assert_eq!(vm.seed_from_form(), 2);
        assert_eq!(*field.value.borrow(), "[2,9]");
        assert!(vm.is_selected(9));
        assert_eq!(vm.count(), 2);
    }
}
