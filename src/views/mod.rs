// ============================================================================
// VIEWS - Builders DOM puros (sin lógica de negocio)
// ============================================================================

pub mod bubble;
pub mod driver_list;
pub mod panel;
pub mod recommended;
pub mod status_banner;
pub mod toolbar;

pub use bubble::{render_bubble, update_bubble};
pub use driver_list::{render_driver_list, update_driver_row};
pub use panel::render_panel;
pub use recommended::render_recommended_vehicles;
pub use status_banner::render_status_banner;
pub use toolbar::{render_counter, render_toolbar, update_counter, update_filter_buttons};
