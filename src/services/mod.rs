pub mod trip_day_service;
pub mod trip_service;
pub mod user_service;

pub use trip_day_service::TripDayService;
pub use trip_service::TripService;
pub use user_service::{UserError, UserService};
