pub mod aircraft;
pub mod airports;
pub mod aliases;
pub mod error;

pub use aircraft::AircraftRegistry;
pub use airports::{AirportIndex, haversine_nm};
pub use aliases::{HEADER_ALIASES, aliases_for};
pub use error::StandardsError;
