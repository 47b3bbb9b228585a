//! Common types and traits shared across `geodico` crates.
//!
//! This crate provides the abstractions shared between `geodico-core` and its
//! backends: the driver descriptors and the source traits describing how a
//! spatial database is walked. Keeping them here lets the metadata walk be
//! exercised against in-memory sources without linking a backend.

pub mod drivers;
pub mod source;

// Re-export commonly used types
pub use drivers::{Driver, SupportStatus};
pub use source::{
    Extent, FieldDefinition, SourceError, SourceLayer, SourceOpener, SpatialReference,
    VectorSource,
};
