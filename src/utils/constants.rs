/// Clave localStorage de la posición de la burbuja flotante
pub const BUBBLE_POSITION_KEY: &str = "transporteurs_bubble_position";

/// Ids internos del widget: solo este crate los toca
pub const LIST_CONTAINER_ID: &str = "tw-driver-list";
pub const STATUS_CONTAINER_ID: &str = "tw-status";
pub const COUNTER_ID: &str = "tw-counter";
pub const TOOLBAR_ID: &str = "tw-toolbar";
pub const SEARCH_INPUT_ID: &str = "tw-search";
pub const RECOMMENDED_ID: &str = "tw-recommended";
pub const BUBBLE_ID: &str = "tw-bubble";
pub const PANEL_ID: &str = "tw-panel";

/// Clases CSS
pub const ROW_CLASS: &str = "transporteur-item";
pub const ROW_SELECTED_CLASS: &str = "selected";
pub const FILTER_ACTIVE_CLASS: &str = "active";
pub const STALE_LIST_CLASS: &str = "is-stale";
