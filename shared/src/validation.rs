//! Validation utilities for query input

use validator::Validate;

use crate::types::GpsCoordinates;

/// Parse a decimal coordinate as sent in a query string
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate that coordinates fall on the globe
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), String> {
    coordinates.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid {}", field))
                })
            })
            .collect();
        messages.sort();
        messages.join(", ")
    })
}
