/*! Record extraction

Finds record fragments in raw dump lines ([record]) and folds them into deduplicated,
year-partitioned collections ([aggregate]).
!*/
pub mod aggregate;
pub mod record;

pub use aggregate::Aggregator;
pub use record::{fragments, parse_record, ParsedRecord, Rejection};
