//! SSDL Core - Document Model Types
//!
//! Pure data structures with no parsing logic. The `ssdl-dsl` crate builds
//! these from source text; everything here is immutable once constructed and
//! owned top-down from the [`Ssdl`] root.

use chrono::NaiveDateTime;

pub mod collections;
pub mod entities;
pub mod enums;
pub mod value;

pub use collections::{Mapping, Sequence};
pub use entities::*;
pub use enums::*;
pub use value::{CoordinateError, Geolocation, Value, ValueType};

/// Timestamp type for the Timestamp primitive. SSDL timestamps are naive
/// ISO-8601 date-times without a UTC offset.
pub type Timestamp = NaiveDateTime;

/// Absolute URI type used by sensors and deployment environments.
pub type Uri = url::Url;
