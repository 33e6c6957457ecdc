// ============================================================================
// HIDDEN FIELD - Input oculto del formulario (transporteur_ids, move_category)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, field_value, query_within, set_input_value, ElementBuilder};
use crate::viewmodels::HiddenFieldSink;

pub struct HiddenField {
    input: Element,
}

impl HiddenField {
    /// Busca `input[name=...]` dentro del formulario; si no existe lo crea
    pub fn find_or_create(form: &Element, name: &str) -> Result<Self, JsValue> {
        let selector = format!("input[name=\"{}\"]", name);
        if let Some(input) = query_within(form, &selector) {
            return Ok(Self { input });
        }

        log::debug!("📝 [FORM] Champ caché '{}' créé", name);
        let input = ElementBuilder::new("input")?
            .attr("type", "hidden")?
            .attr("name", name)?
            .id(name)?
            .build();
        append_child(form, &input)?;
        Ok(Self { input })
    }

    pub fn value(&self) -> String {
        field_value(&self.input)
    }

    pub fn set_value(&self, value: &str) {
        set_input_value(&self.input, value);
    }
}

impl HiddenFieldSink for HiddenField {
    fn write(&self, value: &str) {
        self.set_value(value);
    }

    fn read(&self) -> String {
        self.value()
    }
}
