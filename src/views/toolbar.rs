// ============================================================================
// TOOLBAR VIEW - Búsqueda + filtro "Tous / Disponibles seulement" + contador
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    append_child, event_target_element, get_attribute, on_click, on_input, query_all_within,
    set_text_content, toggle_class, ElementBuilder,
};
use crate::state::StatusFilter;
use crate::utils::{count_label, t, COUNTER_ID, FILTER_ACTIVE_CLASS, SEARCH_INPUT_ID};

pub fn render_toolbar(
    lang: &str,
    search: &str,
    filter: StatusFilter,
    selected_count: usize,
    on_search: Rc<dyn Fn(String)>,
    on_filter: Rc<dyn Fn(StatusFilter)>,
) -> Result<Element, JsValue> {
    let toolbar = ElementBuilder::new("div")?
        .class("transporteurs-toolbar")
        .build();

    // Búsqueda
    let input = ElementBuilder::new("input")?
        .id(SEARCH_INPUT_ID)?
        .class("form-control form-control-sm transporteurs-search")
        .attr("type", "search")?
        .attr("placeholder", &t("rechercher", lang))?
        .attr("autocomplete", "off")?
        .build();
    if let Some(el) = input.dyn_ref::<HtmlInputElement>() {
        el.set_value(search);
    }
    on_input(&input, move |e| {
        let value = event_target_element(&e)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default();
        on_search(value);
    })?;
    append_child(&toolbar, &input)?;

    // Filtro
    let group = ElementBuilder::new("div")?
        .class("btn-group btn-group-sm transporteurs-filter")
        .attr("role", "group")?
        .build();
    for (value, key) in [
        (StatusFilter::All, "tous"),
        (StatusFilter::AvailableOnly, "disponibles_seulement"),
    ] {
        let button = ElementBuilder::button()?
            .class("btn btn-outline-primary")
            .class_if(FILTER_ACTIVE_CLASS, value == filter)?
            .data("filter", value.as_str())?
            .text(&t(key, lang))
            .build();

        let on_filter = on_filter.clone();
        on_click(&button, move |e| {
            e.prevent_default();
            on_filter(value);
        })?;
        append_child(&group, &button)?;
    }
    append_child(&toolbar, &group)?;

    let counter = render_counter(selected_count, lang)?;
    append_child(&toolbar, &counter)?;

    Ok(toolbar)
}

/// Marca el botón activo sin reconstruir la toolbar (el input conserva el foco)
pub fn update_filter_buttons(toolbar: &Element, filter: StatusFilter) -> Result<(), JsValue> {
    for button in query_all_within(toolbar, "button[data-filter]") {
        let active = get_attribute(&button, "data-filter")
            .map(|v| StatusFilter::parse(&v) == filter)
            .unwrap_or(false);
        toggle_class(&button, FILTER_ACTIVE_CLASS, active)?;
    }
    Ok(())
}

pub fn render_counter(count: usize, lang: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("span")?
        .id(COUNTER_ID)?
        .class("badge bg-primary transporteurs-counter")
        .attr("aria-live", "polite")?
        .text(&count_label(count, lang))
        .build())
}

/// Contador "N sélectionné(s)"
pub fn update_counter(counter: &Element, count: usize, lang: &str) {
    set_text_content(counter, &count_label(count, lang));
}
