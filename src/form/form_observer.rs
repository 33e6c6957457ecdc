// ============================================================================
// FORM OBSERVER - Fechas + tipo de mudanza -> consulta de disponibilidad
// ============================================================================
// Escucha `change` en los tres campos observados. Los cambios rápidos se
// agrupan con un debounce: solo el último dispara la consulta.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{field_value_by_id_or_name, get_element_by_id, on_change, query_within};
use crate::models::RawFormValues;

/// Lectura actual del formulario
pub fn read_values(form: &Element) -> RawFormValues {
    let bindings = &CONFIG.bindings;
    RawFormValues {
        start: field_value_by_id_or_name(form, &bindings.start_date_id),
        end: field_value_by_id_or_name(form, &bindings.end_date_id),
        move_type: field_value_by_id_or_name(form, &bindings.move_type_id),
        booking_id: field_value_by_id_or_name(form, &bindings.booking_id_field),
    }
}

pub struct FormObserver {
    form: Element,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl FormObserver {
    pub fn new(form: Element) -> Self {
        Self {
            form,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn values(&self) -> RawFormValues {
        read_values(&self.form)
    }

    /// Registra los listeners; retorna cuántos campos se encontraron
    pub fn bind(&self, on_values: Rc<dyn Fn(RawFormValues)>) -> Result<usize, JsValue> {
        let bindings = &CONFIG.bindings;
        let mut observed = 0;

        for key in [&bindings.start_date_id, &bindings.end_date_id, &bindings.move_type_id] {
            let field = get_element_by_id(key)
                .or_else(|| query_within(&self.form, &format!("[name=\"{}\"]", key)));
            let Some(field) = field else {
                log::warn!("⚠️ [FORM] Champ '{}' introuvable", key);
                continue;
            };

            let form = self.form.clone();
            let pending = self.pending.clone();
            let on_values = on_values.clone();
            on_change(&field, move |_e| {
                let form = form.clone();
                let on_values = on_values.clone();
                // Reemplazar el Timeout anterior lo cancela (Drop)
                let timeout = Timeout::new(CONFIG.debounce_ms, move || {
                    on_values(read_values(&form));
                });
                *pending.borrow_mut() = Some(timeout);
            })?;
            observed += 1;
        }

        log::info!("👀 [FORM] {} champ(s) observé(s)", observed);
        Ok(observed)
    }

    /// Si el formulario llega precargado (modo edición), consultar ya
    pub fn initial_values(&self) -> Option<RawFormValues> {
        let values = self.values();
        values.is_complete().then_some(values)
    }
}
