// ============================================================================
// STATUS BANNER VIEW - Carga / error en línea / vacío / formulario incompleto
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::WidgetStatus;
use crate::utils::t;

/// Renderizar el banner de estado.
/// Retorna None cuando no hay nada que mostrar (Idle / Ready).
pub fn render_status_banner(
    status: &WidgetStatus,
    lang: &str,
    on_retry: Rc<dyn Fn()>,
    on_dismiss: Rc<dyn Fn()>,
) -> Result<Option<Element>, JsValue> {
    let banner = match status {
        WidgetStatus::Idle | WidgetStatus::Ready => return Ok(None),
        WidgetStatus::LoadingRoster => loading_banner(&t("chargement_liste", lang))?,
        WidgetStatus::Loading => loading_banner(&t("chargement", lang))?,
        WidgetStatus::Empty => ElementBuilder::new("div")?
            .class("alert alert-info transporteurs-status transporteurs-status--empty")
            .text(&t("aucun_transporteur", lang))
            .build(),
        WidgetStatus::Invalid { message } => ElementBuilder::new("div")?
            .class("alert alert-secondary transporteurs-status transporteurs-status--invalid")
            .text(message)
            .build(),
        WidgetStatus::Error { message, retryable } => {
            let banner = ElementBuilder::new("div")?
                .class("alert alert-danger transporteurs-status transporteurs-status--error")
                .attr("role", "alert")?
                .child(
                    ElementBuilder::new("span")?
                        .class("transporteurs-status-message")
                        .text(&format!("❌ {}", message))
                        .build(),
                )?
                .build();

            if *retryable {
                let retry = ElementBuilder::button()?
                    .class("btn btn-sm btn-outline-danger transporteurs-retry")
                    .text(&t("reessayer", lang))
                    .build();
                on_click(&retry, move |e| {
                    e.prevent_default();
                    on_retry();
                })?;
                append_child(&banner, &retry)?;
            }

            let close = ElementBuilder::button()?
                .class("btn-close transporteurs-dismiss")
                .attr("aria-label", &t("fermer", lang))?
                .text("×")
                .build();
            on_click(&close, move |e| {
                e.prevent_default();
                on_dismiss();
            })?;
            append_child(&banner, &close)?;

            banner
        }
    };

    Ok(Some(banner))
}

fn loading_banner(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("transporteurs-status transporteurs-status--loading")
        .attr("aria-busy", "true")?
        .child(
            ElementBuilder::new("span")?
                .class("spinner-border spinner-border-sm")
                .attr("role", "status")?
                .build(),
        )?
        .child(ElementBuilder::new("span")?.text(text).build())?
        .build())
}
