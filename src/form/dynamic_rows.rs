// ============================================================================
// DYNAMIC ROWS - Etapas intermedias, clientes y observaciones adicionales
// ============================================================================
// Los campos usan nombres de array (`etape_depart[]`...) para que el servidor
// reciba todas las filas. El botón "supprimer" solo elimina su propia fila.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, on_click, query_all_within, ElementBuilder};
use crate::utils::t;

/// Campo de una fila: línea de texto o área multilínea
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowField {
    Input,
    TextArea { rows: u8 },
}

impl RowField {
    pub fn tag(&self) -> &'static str {
        match self {
            RowField::Input => "input",
            RowField::TextArea { .. } => "textarea",
        }
    }
}

/// Un tipo de fila repetible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowKind {
    pub add_button_id: &'static str,
    pub input_name: &'static str,
    pub row_class: &'static str,
    pub placeholder_key: &'static str,
    pub field: RowField,
    pub remove_class: &'static str,
}

impl RowKind {
    /// Clases del contenedor de una fila nueva
    pub fn wrapper_class(&self) -> String {
        match self.field {
            RowField::Input => format!("input-group mt-2 {}", self.row_class),
            RowField::TextArea { .. } => format!("mt-2 d-flex gap-2 {}", self.row_class),
        }
    }

    /// Botones de borrado de filas ya presentes en el contenedor
    pub fn remove_selector(&self) -> String {
        format!(".{} .{}", self.row_class, self.remove_class)
    }
}

pub const DEPARTURE_STOP: RowKind = RowKind {
    add_button_id: "ajouter-etape-depart",
    input_name: "etape_depart[]",
    row_class: "etape-depart",
    placeholder_key: "etape_depart",
    field: RowField::Input,
    remove_class: "supprimer-etape",
};

pub const ARRIVAL_STOP: RowKind = RowKind {
    add_button_id: "ajouter-etape-arrivee",
    input_name: "etape_arrivee[]",
    row_class: "etape-arrivee",
    placeholder_key: "etape_arrivee",
    field: RowField::Input,
    remove_class: "supprimer-etape",
};

pub const EXTRA_CLIENT: RowKind = RowKind {
    add_button_id: "ajouter-client",
    input_name: "clients_supplementaires[]",
    row_class: "client-supplementaire",
    placeholder_key: "client_supplementaire",
    field: RowField::Input,
    remove_class: "supprimer-etape",
};

pub const EXTRA_OBSERVATION: RowKind = RowKind {
    add_button_id: "ajouter-observation",
    input_name: "observations_supplementaires[]",
    row_class: "observation-supplementaire",
    placeholder_key: "observation_supplementaire",
    field: RowField::TextArea { rows: 3 },
    remove_class: "btn-remove-observation",
};

pub struct DynamicRows;

impl DynamicRows {
    /// Enlaza los contenedores; un contenedor ausente se ignora
    pub fn bind_all(lang: &str) -> Result<usize, JsValue> {
        let bindings = &CONFIG.bindings;
        let mut bound = 0;
        for (container_id, kind) in [
            (&bindings.departure_stops_id, DEPARTURE_STOP),
            (&bindings.arrival_stops_id, ARRIVAL_STOP),
            (&bindings.extra_clients_id, EXTRA_CLIENT),
            (&bindings.extra_observations_id, EXTRA_OBSERVATION),
        ] {
            if Self::bind(container_id, kind, lang)? {
                bound += 1;
            }
        }
        log::debug!("➕ [FORM] {} conteneur(s) de lignes dynamiques", bound);
        Ok(bound)
    }

    fn bind(container_id: &str, kind: RowKind, lang: &str) -> Result<bool, JsValue> {
        let Some(container) = get_element_by_id(container_id) else {
            return Ok(false);
        };

        // Filas renderizadas por el servidor (modo edición)
        for button in query_all_within(&container, &kind.remove_selector()) {
            if let Some(row) = button.closest(&format!(".{}", kind.row_class))? {
                bind_remove(&button, row)?;
            }
        }

        if let Some(add_button) = get_element_by_id(kind.add_button_id) {
            let lang = lang.to_string();
            on_click(&add_button, move |e| {
                e.prevent_default();
                if let Err(err) = add_row(&container, kind, &lang) {
                    log::error!("❌ [FORM] Ajout de ligne impossible: {:?}", err);
                }
            })?;
        } else {
            log::warn!("⚠️ [FORM] Bouton '{}' introuvable", kind.add_button_id);
        }

        Ok(true)
    }
}

fn add_row(container: &Element, kind: RowKind, lang: &str) -> Result<Element, JsValue> {
    let field = ElementBuilder::new(kind.field.tag())?
        .class("form-control")
        .attr("name", kind.input_name)?
        .attr("placeholder", &t(kind.placeholder_key, lang))?;
    let field = match kind.field {
        RowField::Input => field.attr("type", "text")?,
        RowField::TextArea { rows } => field.attr("rows", &rows.to_string())?,
    };

    let row = ElementBuilder::new("div")?
        .class(&kind.wrapper_class())
        .child(field.build())?
        .build();

    let remove = ElementBuilder::button()?
        .class(&format!("btn btn-outline-danger {}", kind.remove_class))
        .attr("title", &t("supprimer", lang))?
        .text("🗑")
        .build();
    bind_remove(&remove, row.clone())?;
    append_child(&row, &remove)?;

    append_child(container, &row)?;
    Ok(row)
}

fn bind_remove(button: &Element, row: Element) -> Result<(), JsValue> {
    on_click(button, move |e| {
        e.prevent_default();
        row.remove();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_rows_are_textareas() {
        assert_eq!(EXTRA_OBSERVATION.field.tag(), "textarea");
        assert_eq!(EXTRA_OBSERVATION.field, RowField::TextArea { rows: 3 });
        assert_eq!(EXTRA_OBSERVATION.input_name, "observations_supplementaires[]");
        assert_eq!(
            EXTRA_OBSERVATION.remove_selector(),
            ".observation-supplementaire .btn-remove-observation"
        );
        assert!(!EXTRA_OBSERVATION.wrapper_class().contains("input-group"));
    }

    #[test]
    fn address_and_client_rows_are_single_line() {
        for kind in [DEPARTURE_STOP, ARRIVAL_STOP, EXTRA_CLIENT] {
            assert_eq!(kind.field.tag(), "input");
            assert!(kind.wrapper_class().starts_with("input-group mt-2"));
            assert!(kind.input_name.ends_with("[]"));
        }
    }

    #[test]
    fn every_kind_posts_under_its_own_name() {
        let kinds = [DEPARTURE_STOP, ARRIVAL_STOP, EXTRA_CLIENT, EXTRA_OBSERVATION];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.input_name, b.input_name);
                assert_ne!(a.add_button_id, b.add_button_id);
            }
        }
    }

    #[test]
    fn observation_placeholder_is_translated() {
        assert_eq!(
            t(EXTRA_OBSERVATION.placeholder_key, "FR"),
            "Ajoutez une observation supplémentaire ici..."
        );
    }
}
