pub mod engine;
pub mod lookup;

pub use engine::classify;
pub use lookup::{GroupLookup, StaticLookup};
