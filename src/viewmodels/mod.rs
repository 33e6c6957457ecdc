pub mod availability_viewmodel;
pub mod selection_viewmodel;
pub mod mode_viewmodel;

pub use availability_viewmodel::{AvailabilityViewModel, CheckOutcome};
pub use selection_viewmodel::{HiddenFieldSink, SelectionViewModel};
pub use mode_viewmodel::{ModeTransition, ModeViewModel};
