// ============================================================================
// PANEL VIEW - Esqueleto del widget (contenedores vacíos)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::utils::{t, LIST_CONTAINER_ID, PANEL_ID, RECOMMENDED_ID, STATUS_CONTAINER_ID, TOOLBAR_ID};

/// Cada zona se repinta por separado; el panel en sí no se reconstruye nunca
pub fn render_panel(lang: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(PANEL_ID)?
        .class("transporteurs-panel card")
        .child(
            ElementBuilder::new("div")?
                .class("card-header transporteurs-header")
                .text(&t("transporteurs", lang))
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("card-body")
                .child(ElementBuilder::new("div")?.id(TOOLBAR_ID)?.build())?
                .child(
                    ElementBuilder::new("div")?
                        .id(STATUS_CONTAINER_ID)?
                        .attr("aria-live", "polite")?
                        .build(),
                )?
                .child(ElementBuilder::new("div")?.id(LIST_CONTAINER_ID)?.build())?
                .child(ElementBuilder::new("div")?.id(RECOMMENDED_ID)?.build())?
                .build(),
        )?
        .build())
}
