// Utils compartidos

pub mod constants;
pub mod i18n;
pub mod storage;
pub mod text;

pub use constants::*;
pub use i18n::*;
