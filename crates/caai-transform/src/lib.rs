pub mod dates;
pub mod duration;
pub mod error;
pub mod normalize;

pub use dates::parse_date;
pub use duration::{parse_count, parse_distance, parse_duration};
pub use error::NormalizationError;
pub use normalize::{NormalizedRow, normalize};
