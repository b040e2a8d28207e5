pub mod accumulator;
pub mod error;
pub mod form;
pub mod json;
pub mod values;

pub use accumulator::{DeviceStats, FormAccumulator, RoleBuckets, SoloCrossCountry, TypeStats};
pub use error::ReportError;
pub use form::{MAX_TYPE_ROWS, write_form};
pub use json::write_run_report_json;
pub use values::{DeviceRow, FormValues, GrandTotals, TypeRow};
