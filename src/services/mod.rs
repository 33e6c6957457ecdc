pub mod api_client;
pub mod availability_service;

pub use api_client::ApiClient;
pub use availability_service::{AvailabilityService, DriverSource};
