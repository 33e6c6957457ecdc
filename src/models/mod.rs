pub mod driver;
pub mod availability;
pub mod booking_mode;
pub mod bubble;

pub use driver::{Driver, DriverDto, SoonAvailableDriver};
pub use availability::{
    AvailabilityQuery, AvailabilityResponse, AvailabilityResult, RawFormValues,
    RecommendedVehicle, RosterResponse,
};
pub use booking_mode::BookingMode;
pub use bubble::BubblePosition;
