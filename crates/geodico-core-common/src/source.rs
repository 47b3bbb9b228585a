//! Source traits for walking a spatial database.
//!
//! These traits describe the part of a vector data library the metadata reader
//! relies on: opening a container, enumerating its layers, and asking each layer
//! for its schema, spatial reference, extent and features. The GDAL backend in
//! `geodico-core` implements them; tests implement them in memory.
//!
//! Names are handed over as raw bytes where the underlying library does not
//! guarantee UTF-8, so decoding policy stays with the caller.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a source backend.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The container could not be opened.
    #[error("Failed to open '{path}': {message}")]
    Open {
        /// The requested path
        path: PathBuf,
        /// Backend message
        message: String,
    },

    /// A layer handle could not be fetched.
    #[error("Failed to fetch layer {index}: {message}")]
    Layer {
        /// Zero-based layer index
        index: usize,
        /// Backend message
        message: String,
    },
}

/// One attribute field definition, in the backend's own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Type name as reported by the backend (e.g., `"Integer"`, `"String"`)
    pub type_name: String,
    /// Declared width, 0 when unconstrained
    pub width: i32,
    /// Declared precision, 0 when not applicable
    pub precision: i32,
}

impl FieldDefinition {
    /// Creates a field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, width: i32, precision: i32) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            width,
            precision,
        }
    }
}

/// Layer extent, in the order GDAL reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimum X (west)
    pub xmin: f64,
    /// Maximum X (east)
    pub xmax: f64,
    /// Minimum Y (south)
    pub ymin: f64,
    /// Maximum Y (north)
    pub ymax: f64,
}

/// Opens containers. Implemented once per backend.
pub trait SourceOpener {
    /// The opened container type.
    type Source: VectorSource;

    /// Opens `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if the backend cannot open the path as a
    /// vector container.
    fn open(&self, path: &Path) -> Result<Self::Source, SourceError>;
}

/// An opened container holding zero or more layers.
pub trait VectorSource {
    /// Layer handle, possibly borrowing the container.
    type Layer<'a>: SourceLayer
    where
        Self: 'a;

    /// Name of the opened handle. May differ from the requested path.
    fn name(&self) -> String;

    /// Number of layers.
    fn layer_count(&self) -> usize;

    /// Fetches the layer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Layer`] if the handle cannot be fetched.
    fn layer(&self, index: usize) -> Result<Self::Layer<'_>, SourceError>;
}

/// A single layer of a container.
pub trait SourceLayer {
    /// Spatial reference handle.
    type SpatialRef: SpatialReference;

    /// Native layer name, undecoded.
    fn name_bytes(&self) -> Vec<u8>;

    /// Number of features, or `None` when the backend failed to count them.
    fn feature_count(&self) -> Option<u64>;

    /// Attribute schema, in declaration order.
    fn fields(&self) -> Vec<FieldDefinition>;

    /// Spatial reference of the layer, if any.
    fn spatial_ref(&self) -> Option<Self::SpatialRef>;

    /// Layer extent, if the backend can compute one.
    fn extent(&self) -> Option<Extent>;

    /// Reads the next feature from the layer cursor and returns the name of its
    /// geometry type (e.g., `"POINT"`).
    ///
    /// This advances the cursor: a later caller iterating the layer will not
    /// see the feature again. Returns `None` when the cursor is exhausted or the
    /// feature has no geometry.
    fn next_geometry_name(&mut self) -> Option<String>;
}

/// Spatial reference system introspection.
pub trait SpatialReference {
    /// Lets the backend fill in a missing EPSG authority. Returns `true` on success.
    fn auto_identify_epsg(&mut self) -> bool;

    /// Compound (horizontal + vertical) reference.
    fn is_compound(&self) -> bool;
    /// Earth-centered cartesian reference.
    fn is_geocentric(&self) -> bool;
    /// Latitude/longitude reference.
    fn is_geographic(&self) -> bool;
    /// Local, non-georeferenced engineering reference.
    fn is_local(&self) -> bool;
    /// Projected reference.
    fn is_projected(&self) -> bool;
    /// Vertical (height or depth) reference.
    fn is_vertical(&self) -> bool;

    /// Value of child `child` of the WKT node `key`, undecoded.
    fn attribute(&self, key: &str, child: usize) -> Option<Vec<u8>>;
}
