//! Overpass JSON to GeoJSON conversion, representative points and bounds.
//!
//! Everything here is pure and deterministic: the same `RawResponse` always
//! yields the same feature order, property order and coordinates.

pub mod area;
pub mod bounds;
pub mod features;
pub mod pipeline;
pub mod points;
pub mod rings;

pub use bounds::bounding_box;
pub use features::to_feature_collection;
pub use pipeline::transform;
pub use points::{representative_point, representative_points};

#[cfg(test)]
mod area_test;
#[cfg(test)]
mod points_test;
