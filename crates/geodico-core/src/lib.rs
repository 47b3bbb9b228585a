//! `geodico-core` is the core library for the `geodico` project: a metadata
//! inventory for spatial databases.
//!
//! This crate includes:
//! - **Reader**: opens a container with GDAL and walks its layers into a [`types::Report`].
//! - **Describers**: field schema, spatial reference and geometry description of a layer.
//! - **Diagnostics**: capture of the last GDAL error message emitted during a read.
//! - **Driver Registry**: the spatial database formats the reader targets.
//!
//! The walk is written against the traits of `geodico-core-common`, so it runs
//! the same over GDAL and over in-memory sources.

pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod fields;
pub mod gdal_source;
pub mod geos;
pub mod labels;
pub mod layer;
pub mod reader;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::{GeoDicoError, Result};
pub use labels::TextLabels;
pub use reader::{read, read_with};
pub use types::{FieldMap, LayerRecord, Report};
