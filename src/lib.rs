// ============================================================================
// TRANSPORTEURS WIDGET - Disponibilidad de transporteurs (RUST PURO + MVVM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Lógica UI, testeable sin navegador
// - Services: SOLO comunicación API
// - State: State Management con Rc<RefCell>
// - Form: Enlaces con el formulario de prestation del servidor
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod dom;
pub mod views;
pub mod form;
pub mod utils;
pub mod app;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::Widget;
use crate::config::CONFIG;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚚 Transporteurs Widget - Rust Puro + MVVM ({})", CONFIG.environment);
    if !CONFIG.is_production() {
        log::debug!("⚙️ Config: {:?}", *CONFIG);
    }

    Widget::mount()
}

/// Montar manualmente (páginas que insertan el formulario después de la carga)
#[wasm_bindgen]
pub fn mount_transporteurs_widget() -> Result<(), JsValue> {
    Widget::mount()
}

/// Forzar una nueva consulta con los valores actuales del formulario
#[wasm_bindgen]
pub fn recheck_disponibilite() {
    if Widget::with(|widget| widget.recheck()).is_none() {
        log::warn!("⚠️ [WIDGET] recheck_disponibilite: widget non monté");
    }
}

/// Ids seleccionados, en JSON (mismo valor que el campo oculto)
#[wasm_bindgen]
pub fn selected_transporteurs() -> String {
    Widget::with(|widget| widget.selected_json()).unwrap_or_else(|| "[]".to_string())
}
