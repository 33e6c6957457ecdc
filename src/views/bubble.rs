// ============================================================================
// BUBBLE VIEW - Burbuja flotante arrastrable que abre/cierra el panel
// ============================================================================
// La posición es solo cosmética: se guarda en localStorage al soltar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::dom::{
    document, on_click, on_event, set_position_px, set_text_content, window, ElementBuilder,
};
use crate::models::BubblePosition;
use crate::utils::storage::{load_from_storage, save_to_storage};
use crate::utils::{t, BUBBLE_ID, BUBBLE_POSITION_KEY};

const BUBBLE_SIZE: f64 = 56.0;
/// Píxeles de movimiento a partir de los cuales no es un click
const DRAG_THRESHOLD: f64 = 4.0;

#[derive(Clone, Copy)]
struct DragState {
    offset_x: f64,
    offset_y: f64,
    start_x: f64,
    start_y: f64,
    moved: bool,
}

fn viewport_limits() -> (f64, f64) {
    let width = window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0);
    let height = window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(768.0);
    (width - BUBBLE_SIZE, height - BUBBLE_SIZE)
}

pub fn render_bubble(selected_count: usize, lang: &str, on_toggle_panel: Rc<dyn Fn()>) -> Result<Element, JsValue> {
    let bubble = ElementBuilder::button()?
        .id(BUBBLE_ID)?
        .class("transporteurs-bubble")
        .attr("title", &t("transporteurs", lang))?
        .text(&format!("🚚 {}", selected_count))
        .build();

    if let Some(saved) = load_from_storage::<BubblePosition>(BUBBLE_POSITION_KEY) {
        let (max_x, max_y) = viewport_limits();
        let pos = saved.clamped(max_x, max_y);
        set_position_px(&bubble, pos.x, pos.y)?;
    }

    let drag: Rc<RefCell<Option<DragState>>> = Rc::new(RefCell::new(None));
    // El click que sigue a un arrastre no debe abrir el panel
    let suppress_click = Rc::new(RefCell::new(false));

    {
        let drag = drag.clone();
        let bubble_el = bubble.clone();
        on_event(&bubble, "mousedown", move |e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else { return };
            let rect = bubble_el.get_bounding_client_rect();
            let x = mouse.client_x() as f64;
            let y = mouse.client_y() as f64;
            *drag.borrow_mut() = Some(DragState {
                offset_x: x - rect.left(),
                offset_y: y - rect.top(),
                start_x: x,
                start_y: y,
                moved: false,
            });
        })?;
    }

    let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;

    {
        let drag = drag.clone();
        let bubble_el = bubble.clone();
        on_event(&doc, "mousemove", move |e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else { return };
            let mut slot = drag.borrow_mut();
            let Some(state) = slot.as_mut() else { return };

            let x = mouse.client_x() as f64;
            let y = mouse.client_y() as f64;
            if !state.moved
                && (x - state.start_x).abs() < DRAG_THRESHOLD
                && (y - state.start_y).abs() < DRAG_THRESHOLD
            {
                return;
            }
            state.moved = true;

            let (max_x, max_y) = viewport_limits();
            let pos = BubblePosition {
                x: x - state.offset_x,
                y: y - state.offset_y,
            }
            .clamped(max_x, max_y);
            let _ = set_position_px(&bubble_el, pos.x, pos.y);
        })?;
    }

    {
        let drag = drag.clone();
        let suppress_click = suppress_click.clone();
        let bubble_el = bubble.clone();
        on_event(&doc, "mouseup", move |_e| {
            let Some(state) = drag.borrow_mut().take() else { return };
            if !state.moved {
                return;
            }
            *suppress_click.borrow_mut() = true;

            let rect = bubble_el.get_bounding_client_rect();
            let pos = BubblePosition { x: rect.left(), y: rect.top() };
            if let Err(e) = save_to_storage(BUBBLE_POSITION_KEY, &pos) {
                log::warn!("⚠️ [WIDGET] {}", e);
            }
        })?;
    }

    on_click(&bubble, move |e| {
        e.prevent_default();
        if suppress_click.replace(false) {
            return;
        }
        on_toggle_panel();
    })?;

    Ok(bubble)
}

/// Contador dentro de la burbuja
pub fn update_bubble(bubble: &Element, selected_count: usize) {
    set_text_content(bubble, &format!("🚚 {}", selected_count));
}
