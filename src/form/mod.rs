// ============================================================================
// FORM - Enlaces con el formulario de prestation renderizado por el servidor
// ============================================================================

pub mod dynamic_rows;
pub mod form_observer;
pub mod hidden_field;
pub mod mode_toggle;

pub use dynamic_rows::DynamicRows;
pub use form_observer::{read_values, FormObserver};
pub use hidden_field::HiddenField;
pub use mode_toggle::ModeToggle;
