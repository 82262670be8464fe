//! Section builders driven by the converter.
//!
//! - [`geospatial`] - reference point, center line, linear referencing
//! - [`construction`] - drilling method, rig and cutting tool
//! - [`measurement`] - time domain, property catalogue and data block

pub mod construction;
pub mod geospatial;
pub mod measurement;

pub use construction::ConstructionBuilder;
pub use geospatial::{Coordinates, GeospatialBuilder, Geometry, DEFAULT_POSITION};
pub use measurement::{EmissionMode, MeasurementBuilder};
