mod helpers;
mod units;

pub use helpers::{parse_boolean_flag, truncate_for_log};
pub use units::{MajorUnits, MinorUnits, UnitParseError};
