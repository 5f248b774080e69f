pub mod geometry;
pub mod units;

pub use geometry::{Point, Rect};
pub use units::{himetric_to_pixel, himetric_to_units, pixel_to_himetric, units_to_himetric};
