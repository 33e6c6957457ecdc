// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod selection_state;
pub mod driver_list_state;
pub mod request_tracker;
pub mod widget_state;

pub use reactivity::*;
pub use selection_state::*;
pub use driver_list_state::*;
pub use request_tracker::*;
pub use widget_state::*;
