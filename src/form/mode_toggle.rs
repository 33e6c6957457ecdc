// ============================================================================
// MODE TOGGLE - Standard / Groupage sobre el formulario de prestation
// ============================================================================
// Soporta los dos controles que puede renderizar el servidor: el par de
// botones (#btn-standard / #btn-groupage) o el checkbox switch.
// Ocultar una sección nunca borra lo que el usuario escribió en ella.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{
    document, get_element_by_id, has_class, is_checked, on_change, on_click, set_checked,
    set_visible, toggle_class,
};
use crate::form::HiddenField;
use crate::models::BookingMode;
use crate::utils::FILTER_ACTIVE_CLASS;
use crate::viewmodels::{ModeTransition, ModeViewModel};

/// Modo inicial según lo renderizado por el servidor.
/// Prioridad: switch > botón activo > campo oculto > Standard.
pub fn initial_mode(
    switch_checked: Option<bool>,
    groupage_active: bool,
    standard_active: bool,
    hidden_value: &str,
) -> BookingMode {
    if let Some(checked) = switch_checked {
        return if checked { BookingMode::Groupage } else { BookingMode::Standard };
    }
    if groupage_active {
        return BookingMode::Groupage;
    }
    if standard_active {
        return BookingMode::Standard;
    }
    BookingMode::from_value(hidden_value).unwrap_or_default()
}

struct ModeControls {
    standard: Option<Element>,
    groupage: Option<Element>,
    switch: Option<Element>,
    hidden: HiddenField,
}

impl ModeControls {
    fn apply(&self, transition: &ModeTransition) -> Result<(), JsValue> {
        for id in &CONFIG.bindings.groupage_section_ids {
            if let Some(section) = get_element_by_id(id) {
                set_visible(&section, transition.show_groupage_sections)?;
            }
        }

        self.hidden.set_value(transition.hidden_value);

        if let Some(body) = document().and_then(|d| d.body()) {
            toggle_class(&body, transition.body_class_on, true)?;
            toggle_class(&body, transition.body_class_off, false)?;
        }

        let groupage = transition.mode.is_groupage();
        if let Some(btn) = &self.standard {
            toggle_class(btn, FILTER_ACTIVE_CLASS, !groupage)?;
        }
        if let Some(btn) = &self.groupage {
            toggle_class(btn, FILTER_ACTIVE_CLASS, groupage)?;
        }
        if let Some(switch) = &self.switch {
            set_checked(switch, groupage);
        }
        Ok(())
    }
}

pub struct ModeToggle;

impl ModeToggle {
    /// Lee el modo inicial, lo aplica y registra los listeners (una sola vez)
    pub fn bind(form: &Element, vm: Rc<ModeViewModel>) -> Result<BookingMode, JsValue> {
        let bindings = &CONFIG.bindings;
        let controls = Rc::new(ModeControls {
            standard: get_element_by_id(&bindings.standard_button_id),
            groupage: get_element_by_id(&bindings.groupage_button_id),
            switch: get_element_by_id(&bindings.mode_switch_id),
            hidden: HiddenField::find_or_create(form, &bindings.move_category_field)?,
        });

        let initial = initial_mode(
            controls.switch.as_ref().map(is_checked),
            controls.groupage.as_ref().map(|b| has_class(b, FILTER_ACTIVE_CLASS)).unwrap_or(false),
            controls.standard.as_ref().map(|b| has_class(b, FILTER_ACTIVE_CLASS)).unwrap_or(false),
            &controls.hidden.value(),
        );
        controls.apply(&vm.initialize(initial))?;

        for (button, mode) in [
            (controls.standard.clone(), BookingMode::Standard),
            (controls.groupage.clone(), BookingMode::Groupage),
        ] {
            let Some(button) = button else { continue };
            let vm = vm.clone();
            let controls = controls.clone();
            on_click(&button, move |e| {
                e.prevent_default();
                switch_to(&vm, &controls, mode);
            })?;
        }

        if let Some(switch) = controls.switch.clone() {
            let vm = vm.clone();
            let controls = controls.clone();
            let switch_el = switch.clone();
            on_change(&switch, move |_e| {
                let mode = if is_checked(&switch_el) { BookingMode::Groupage } else { BookingMode::Standard };
                switch_to(&vm, &controls, mode);
            })?;
        }

        if controls.standard.is_none() && controls.groupage.is_none() && controls.switch.is_none() {
            log::debug!("🔀 [MODE] Aucun sélecteur de mode dans le formulaire");
        }

        Ok(initial)
    }
}

fn switch_to(vm: &ModeViewModel, controls: &ModeControls, mode: BookingMode) {
    if let Some(transition) = vm.switch(mode) {
        if let Err(e) = controls.apply(&transition) {
            log::error!("❌ [MODE] {:?}", e);
        }
    }
}
