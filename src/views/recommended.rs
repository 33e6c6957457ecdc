// ============================================================================
// RECOMMENDED VEHICLES VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::RecommendedVehicle;
use crate::utils::t;

/// None si el servidor no recomendó ningún vehículo
pub fn render_recommended_vehicles(
    vehicles: &[RecommendedVehicle],
    lang: &str,
) -> Result<Option<Element>, JsValue> {
    if vehicles.is_empty() {
        return Ok(None);
    }

    let block = ElementBuilder::new("div")?
        .class("transporteurs-recommended")
        .child(
            ElementBuilder::new("h6")?
                .text(&format!("🚚 {}", t("vehicules_recommandes", lang)))
                .build(),
        )?
        .build();

    let list = ElementBuilder::new("ul")?.class("list-unstyled mb-0").build();
    for vehicle in vehicles {
        let item = ElementBuilder::new("li")?
            .child(ElementBuilder::new("strong")?.text(&vehicle.nom).build())?
            .build();
        if !vehicle.description.is_empty() {
            let description = ElementBuilder::new("span")?
                .class("text-muted")
                .text(&format!(" {}", vehicle.description))
                .build();
            append_child(&item, &description)?;
        }
        append_child(&list, &item)?;
    }
    append_child(&block, &list)?;

    Ok(Some(block))
}
