//! Primitive value model
//!
//! [`Value`] is the closed union of the six scalar kinds a sensor format may
//! carry. The tag fully determines the payload's textual grammar; there is no
//! coercion between variants. [`ValueType`] is the payload-free tag used where
//! a schema declares *expected* types rather than values (visualization
//! formats).

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A decoded primitive value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Timestamp(Timestamp),
    Geolocation(Geolocation),
}

impl Value {
    /// The tag describing this value's kind.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::Str,
            Value::Integer(_) => ValueType::Integer,
            Value::Double(_) => ValueType::Double,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::Geolocation(_) => ValueType::Geolocation,
        }
    }
}

/// Type tag for the primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Str,
    Integer,
    Double,
    Boolean,
    Timestamp,
    Geolocation,
}

impl ValueType {
    /// Canonical tag text as it appears in SSDL source.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Str => "String",
            ValueType::Integer => "Integer",
            ValueType::Double => "Double",
            ValueType::Boolean => "Boolean",
            ValueType::Timestamp => "Timestamp",
            ValueType::Geolocation => "Geolocation",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(ValueType::Str),
            "Integer" => Ok(ValueType::Integer),
            "Double" => Ok(ValueType::Double),
            "Boolean" => Ok(ValueType::Boolean),
            "Timestamp" => Ok(ValueType::Timestamp),
            "Geolocation" => Ok(ValueType::Geolocation),
            _ => Err(format!("Invalid value type: {}", s)),
        }
    }
}

/// Error when decoding an ISO-6709 coordinate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// Wrong component count or unparseable component.
    #[error("malformed ISO-6709 coordinate")]
    Malformed,
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("coordinate out of range")]
    OutOfRange,
}

/// A decoded ISO-6709 point: latitude, longitude, optional altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl Geolocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }
}

impl fmt::Display for Geolocation {
    /// Canonical ISO-6709 form: `+48.2082+16.3738/`, altitude appended when
    /// present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}{:+}", self.latitude, self.longitude)?;
        if let Some(alt) = self.altitude {
            write!(f, "{:+}", alt)?;
        }
        write!(f, "/")
    }
}

impl FromStr for Geolocation {
    type Err = CoordinateError;

    /// Accepts `±LAT±LON[±ALT]` with an optional trailing solidus. Every
    /// component must carry an explicit sign.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('/').unwrap_or(s);
        if !s.starts_with('+') && !s.starts_with('-') {
            return Err(CoordinateError::Malformed);
        }

        let mut components = Vec::new();
        let mut start = 0;
        for (i, c) in s.char_indices().skip(1) {
            if c == '+' || c == '-' {
                components.push(&s[start..i]);
                start = i;
            }
        }
        components.push(&s[start..]);

        let decoded: Vec<f64> = components
            .iter()
            .map(|part| part.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| CoordinateError::Malformed)?;

        let (latitude, longitude, altitude) = match decoded.as_slice() {
            [lat, lon] => (*lat, *lon, None),
            [lat, lon, alt] => (*lat, *lon, Some(*alt)),
            _ => return Err(CoordinateError::Malformed),
        };

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::OutOfRange);
        }

        Ok(Geolocation {
            latitude,
            longitude,
            altitude,
        })
    }
}
