//! Visualization registry
//!
//! Each visualization type carries a fixed schema: the set of format fields
//! it renders, the type of each field, and the input type it consumes from a
//! sensor stream. The registry is static data; the parser consults it to
//! validate every `.application` graph at parse time, so an accepted document
//! never contains a graph the frontend cannot render.

use crate::error::ValidationError;
use ssdl_core::{Mapping, ValueType, VisType};

/// Format schema of a visualization type as `(field, type)` pairs.
pub fn format_schema(vis: VisType) -> &'static [(&'static str, ValueType)] {
    match vis {
        VisType::Table => &[("x", ValueType::Str), ("y", ValueType::Str)],
        VisType::Chart => &[("x", ValueType::Double), ("y", ValueType::Double)],
        VisType::Map => &[
            ("location", ValueType::Geolocation),
            ("value", ValueType::Double),
        ],
        VisType::Line => &[("x", ValueType::Timestamp), ("y", ValueType::Double)],
    }
}

/// The value type a visualization consumes from its sensor input.
pub fn input_contract(vis: VisType) -> ValueType {
    match vis {
        VisType::Table => ValueType::Str,
        VisType::Chart => ValueType::Double,
        VisType::Map => ValueType::Geolocation,
        VisType::Line => ValueType::Double,
    }
}

/// Check a declared format against the schema for `vis`.
///
/// Every schema field must be present with the schema's exact type, and no
/// field outside the schema may appear. Missing fields are reported in schema
/// order before extra fields, so the first error is deterministic.
pub fn validate_format(vis: VisType, format: &Mapping<ValueType>) -> Result<(), ValidationError> {
    let schema = format_schema(vis);

    for (field, expected) in schema {
        match format.get(field) {
            Some(found) if found == expected => {}
            Some(found) => {
                return Err(ValidationError::FormatTypeMismatch {
                    field: (*field).to_string(),
                    expected: *expected,
                    found: *found,
                });
            }
            None => {
                return Err(ValidationError::MissingFormatField {
                    field: (*field).to_string(),
                    expected: *expected,
                });
            }
        }
    }

    for key in format.keys() {
        if !schema.iter().any(|(field, _)| *field == key) {
            return Err(ValidationError::UnknownFormatField {
                field: key.to_string(),
                vis: vis.to_string(),
            });
        }
    }

    Ok(())
}
