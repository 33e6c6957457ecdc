// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos del widget
// ============================================================================
// Sin `html()`: todo el texto (nombres, vehículos, mensajes del servidor)
// entra como text content.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element, set_attribute, set_class_name, set_text_content, toggle_class};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// `<button type="button">`: el widget vive dentro del formulario de la
    /// prestation y un botón sin tipo lo enviaría
    pub fn button() -> Result<Self, JsValue> {
        Self::new("button")?.attr("type", "button")
    }

    /// Reemplaza todas las clases
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    /// Agrega `class` solo si `on`
    pub fn class_if(self, class: &str, on: bool) -> Result<Self, JsValue> {
        toggle_class(&self.element, class, on)?;
        Ok(self)
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Atributo `data-{name}`
    pub fn data(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.attr(&format!("data-{}", name), value)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
