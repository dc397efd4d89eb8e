pub mod trip;
pub mod trip_day;
pub mod user;

pub use trip::Trip;
pub use trip_day::TripDay;
pub use user::User;
