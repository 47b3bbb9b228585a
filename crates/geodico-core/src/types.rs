//! Data types for spatial database reports.
//!
//! This module defines the report produced for one container, the per-layer
//! records it holds, and the ordered field map describing each layer's schema.

use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use geodico_core_common::Extent;

use crate::diagnostics::Diagnostic;
use crate::error::{GeoDicoError, Result};
use crate::utils::round2;

/// Type, width and precision of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescription {
    /// Type name (e.g., `"Integer"`, `"String"`)
    pub type_name: String,
    /// Declared width
    pub width: i32,
    /// Declared precision
    pub precision: i32,
}

/// Field name to description, in schema order.
///
/// Serializes as a map whose keys follow insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, FieldDescription)>,
}

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. A repeated name replaces the earlier description in place.
    pub fn insert(&mut self, name: impl Into<String>, description: FieldDescription) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = description,
            None => self.entries.push((name, description)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescription> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescription)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, description) in &self.entries {
            map.serialize_entry(name, description)?;
        }
        map.end()
    }
}

/// Layer bounding box, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl From<Extent> for BoundingBox {
    fn from(extent: Extent) -> Self {
        Self {
            xmin: round2(extent.xmin),
            xmax: round2(extent.xmax),
            ymin: round2(extent.ymin),
            ymax: round2(extent.ymax),
        }
    }
}

/// Spatial reference and geometry description of a non-empty layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoInfo {
    /// SRS category label
    pub srs_type: String,
    /// SRS display name
    pub srs: String,
    /// EPSG code, or the "none found" label
    #[serde(rename = "EPSG")]
    pub epsg: String,
    /// Geometry kind label, absent when no feature carried a geometry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_geom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

/// Description of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRecord {
    /// Name of the parent container
    pub gdb_name: String,
    /// Zero-based layer index
    pub index: usize,
    /// Decoded layer name
    pub title: String,
    /// Feature count
    pub num_obj: u64,
    /// Soft error marker ("no objects", "unreadable")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Present only for layers with features
    #[serde(flatten)]
    pub geo: Option<GeoInfo>,
    pub num_fields: usize,
    pub fields: FieldMap,
}

impl LayerRecord {
    #[must_use]
    pub fn new(gdb_name: impl Into<String>, index: usize) -> Self {
        Self {
            gdb_name: gdb_name.into(),
            index,
            title: String::new(),
            num_obj: 0,
            error: None,
            geo: None,
            num_fields: 0,
            fields: FieldMap::new(),
        }
    }

    /// Key of the record in its report: `"{index}_{title}"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.index, self.title)
    }
}

fn serialize_layers<S: Serializer>(
    layers: &[LayerRecord],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(layers.len()))?;
    for layer in layers {
        map.serialize_entry(&layer.key(), layer)?;
    }
    map.end()
}

/// Metadata report for one container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Base file name of the container
    pub name: String,
    /// Parent folder
    pub folder: String,
    /// Human-scaled cumulative size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<String>,
    /// Last modification date, `DD/MM/YYYY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_actu: Option<String>,
    /// Creation date, `DD/MM/YYYY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_crea: Option<String>,
    pub layers_count: usize,
    pub layers_names: Vec<String>,
    pub layers_idx: Vec<usize>,
    pub total_fields: usize,
    pub total_objs: u64,
    /// Layer records in index order, serialized as a map keyed by [`LayerRecord::key`]
    #[serde(serialize_with = "serialize_layers")]
    pub layers: Vec<LayerRecord>,
    /// Error marker set when the container could not be opened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Last diagnostic emitted by the library during the read
    pub err_gdal: Diagnostic,
    /// Number of soft problems met during the read
    pub alerts: u32,
}

/// Splits a path into (base name, parent folder) strings.
fn name_and_folder(path: &Path) -> (String, String) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let folder = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    (name, folder)
}

impl Report {
    /// Empty report for the container at `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let (name, folder) = name_and_folder(path);
        Self {
            name,
            folder,
            total_size: None,
            date_actu: None,
            date_crea: None,
            layers_count: 0,
            layers_names: Vec::new(),
            layers_idx: Vec::new(),
            total_fields: 0,
            total_objs: 0,
            layers: Vec::new(),
            error: None,
            err_gdal: Diagnostic::default(),
            alerts: 0,
        }
    }

    /// Error-shaped report for a container that could not be opened.
    #[must_use]
    pub fn corrupt(path: &Path, marker: &str) -> Self {
        Self {
            error: Some(marker.to_string()),
            ..Self::new(path)
        }
    }

    /// Returns `true` when the container could not be opened.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        self.error.is_some()
    }

    /// Looks a layer record up by its `"{index}_{title}"` key.
    #[must_use]
    pub fn layer(&self, key: &str) -> Option<&LayerRecord> {
        self.layers.iter().find(|l| l.key() == key)
    }

    /// Turns an error-shaped report into [`GeoDicoError::Corrupt`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoDicoError::Corrupt`] when the container could not be opened.
    pub fn into_result(self) -> Result<Self> {
        if self.is_corrupt() {
            return Err(GeoDicoError::Corrupt {
                path: PathBuf::from(&self.folder).join(&self.name),
                category: self.err_gdal.category,
                message: self.err_gdal.message,
            });
        }
        Ok(self)
    }
}
