// ============================================================================
// DRIVER LIST VIEW - Secciones "Disponibles" / "Bientôt disponibles"
// ============================================================================

use std::rc::Rc;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{
    append_child, is_checked, on_change, query_within, set_attribute, set_checked, toggle_class,
    ElementBuilder,
};
use crate::state::{DriverRow, DriverSection, SectionKind, SelectionState};
use crate::utils::{t, ROW_CLASS, ROW_SELECTED_CLASS, STALE_LIST_CLASS};

/// Fecha tal como se muestra en la fila
pub fn format_available_from(date: NaiveDate, lang: &str) -> String {
    match lang.to_uppercase().as_str() {
        "EN" => date.format("%Y-%m-%d").to_string(),
        _ => date.format("%d/%m/%Y").to_string(),
    }
}

/// Nombre mostrado; un id preseleccionado sin datos queda como "Transporteur #id"
pub fn display_name(row: &DriverRow, lang: &str) -> String {
    if row.name.trim().is_empty() {
        format!("{} #{}", t("transporteur_inconnu", lang), row.id)
    } else {
        row.name.clone()
    }
}

/// Renderizar la lista completa a partir de las secciones ya filtradas
pub fn render_driver_list(
    sections: &[DriverSection],
    selection: &SelectionState,
    lang: &str,
    stale: bool,
    on_toggle: Rc<dyn Fn(i64)>,
) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("div")?
        .class("transporteurs-list")
        .class_if(STALE_LIST_CLASS, stale)?
        .build();

    if stale {
        let warning = ElementBuilder::new("div")?
            .class("alert alert-warning transporteurs-stale")
            .text(&t("resultats_obsoletes", lang))
            .build();
        append_child(&list, &warning)?;
    }

    for section in sections {
        let block = ElementBuilder::new("section")?
            .class("transporteurs-group")
            .data("group", section.kind.as_str())?
            .build();

        let title = format!("{} ({})", t(section.kind.title_key(), lang), section.rows.len());
        let heading = ElementBuilder::new("h6")?
            .class("transporteurs-group-title")
            .text(&title)
            .build();
        append_child(&block, &heading)?;

        for row in &section.rows {
            let item = render_driver_row(
                row,
                section.kind,
                selection.is_selected(row.id),
                lang,
                on_toggle.clone(),
            )?;
            append_child(&block, &item)?;
        }

        append_child(&list, &block)?;
    }

    Ok(list)
}

/// Fila de un transporteur. Única forma de seleccionar: el checkbox.
fn render_driver_row(
    row: &DriverRow,
    kind: SectionKind,
    selected: bool,
    lang: &str,
    on_toggle: Rc<dyn Fn(i64)>,
) -> Result<Element, JsValue> {
    let id = row.id.to_string();

    let item = ElementBuilder::new("label")?
        .class(ROW_CLASS)
        .class_if(ROW_SELECTED_CLASS, selected)?
        .data("driver-id", &id)?
        .build();

    let checkbox = ElementBuilder::new("input")?
        .class("transporteur-checkbox")
        .attr("type", "checkbox")?
        .attr("value", &id)?
        .build();
    set_checked(&checkbox, selected);

    {
        let driver_id = row.id;
        on_change(&checkbox, move |_e| on_toggle(driver_id))?;
    }

    let info = ElementBuilder::new("div")?
        .class("transporteur-info")
        .child(
            ElementBuilder::new("div")?
                .class("transporteur-name")
                .text(&display_name(row, lang))
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("transporteur-vehicle")
                .text(&row.vehicle)
                .build(),
        )?
        .build();

    // La adecuación del vehículo solo vale para el resultado actual
    if kind != SectionKind::Assigned {
        let (badge_class, badge_key) = if row.vehicle_suitable {
            ("badge bg-success transporteur-badge", "vehicule_adapte")
        } else {
            ("badge bg-secondary transporteur-badge", "vehicule_non_adapte")
        };
        let badge = ElementBuilder::new("span")?
            .class(badge_class)
            .text(&t(badge_key, lang))
            .build();
        append_child(&info, &badge)?;
    }

    if let Some(date) = row.available_from {
        set_attribute(&item, "data-available-from", &date.format("%Y-%m-%d").to_string())?;
        let label = format!("{} {}", t("disponible_le", lang), format_available_from(date, lang));
        let when = ElementBuilder::new("div")?
            .class("transporteur-available-from")
            .text(&label)
            .build();
        append_child(&info, &when)?;
    }

    append_child(&item, &checkbox)?;
    append_child(&item, &info)?;
    Ok(item)
}

/// Actualiza SOLO la fila afectada (clase + checkbox), sin re-render
pub fn update_driver_row(list_root: &Element, id: i64, selected: bool) -> Result<(), JsValue> {
    let selector = format!(".{}[data-driver-id=\"{}\"]", ROW_CLASS, id);
    if let Some(item) = query_within(list_root, &selector) {
        toggle_class(&item, ROW_SELECTED_CLASS, selected)?;
        if let Some(checkbox) = query_within(&item, "input[type=\"checkbox\"]") {
            if is_checked(&checkbox) != selected {
                set_checked(&checkbox, selected);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_follows_language() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(format_available_from(date, "EN"), "2024-06-05");
        assert_eq!(format_available_from(date, "FR"), "05/06/2024");
    }

    #[test]
    fn unknown_assigned_driver_gets_a_generic_name() {
        let mut row = DriverRow {
            id: 42,
            name: String::new(),
            vehicle: String::new(),
            vehicle_suitable: false,
            available_from: None,
        };
        assert_eq!(display_name(&row, "FR"), "Transporteur #42");
        assert_eq!(display_name(&row, "EN"), "Driver #42");

        row.name = "Marc Durand".to_string();
        assert_eq!(display_name(&row, "FR"), "Marc Durand");
    }
}
