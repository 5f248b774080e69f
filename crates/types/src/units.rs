//! Length conversions between physical units, himetric, and device pixels.
//!
//! Himetric (1/100 mm) is the canonical internal length unit. One inch is
//! exactly 2540 himetric, so pixel conversions at a fixed dpi are exact
//! inverses of each other.

/// Himetric units per physical unit, keyed by InkML unit token.
fn himetric_per_unit(unit: &str) -> Option<f64> {
    match unit {
        "m" => Some(100_000.0),
        "cm" => Some(1_000.0),
        "mm" => Some(100.0),
        "in" => Some(2_540.0),
        "pt" => Some(35.277_78),
        "pc" => Some(424.333_3),
        _ => None,
    }
}

/// Converts `value` expressed in `unit` to himetric.
///
/// An unrecognized unit passes the value through unchanged. InkML files in
/// the wild carry device-private unit tokens (`dev`, digitizer counts) and
/// must still load; callers that need strict units have to check the token
/// themselves.
pub fn units_to_himetric(value: f64, unit: &str) -> f64 {
    match himetric_per_unit(unit) {
        Some(factor) => value * factor,
        None => value,
    }
}

/// Converts `value` in himetric to `unit`. Unrecognized units pass the
/// value through unchanged, mirroring [`units_to_himetric`].
pub fn himetric_to_units(value: f64, unit: &str) -> f64 {
    match himetric_per_unit(unit) {
        Some(factor) => value / factor,
        None => value,
    }
}

/// Converts device pixels at `dpi` to himetric.
pub fn pixel_to_himetric(pixel: f64, dpi: f64) -> f64 {
    pixel * 2_540.0 / dpi
}

/// Converts himetric to device pixels at `dpi`.
pub fn himetric_to_pixel(himetric: f64, dpi: f64) -> f64 {
    himetric * dpi / 2_540.0
}
