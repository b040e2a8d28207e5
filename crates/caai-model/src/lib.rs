pub mod aircraft;
pub mod classified;
pub mod fields;
pub mod hours;
pub mod mapping;
pub mod record;
pub mod report;

pub use aircraft::AircraftGroup;
pub use classified::{Advisory, ClassifiedFlight, RoleCategory, RoleCredits};
pub use fields::{CanonicalField, FieldKind};
pub use hours::Hours;
pub use mapping::{ColumnLocator, ColumnMapping, MappingOutcome, MappingSpec};
pub use record::{Durations, FlightRecord};
pub use report::{IssueKind, IssueSeverity, RunIssue, RunReport};
