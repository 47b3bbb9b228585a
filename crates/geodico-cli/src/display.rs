//! Display utilities for formatting CLI output.
//!
//! This module provides table row structures and formatting functions
//! for presenting a container report in a human-readable format.

use tabled::{Table, Tabled};

use geodico_core::diagnostics::ErrorCategory;
use geodico_core::types::{LayerRecord, Report};

/// Table row representation for the layers of a container.
#[derive(Tabled)]
pub struct LayerRow {
    /// Position of the layer in the container.
    #[tabled(rename = "#")]
    pub index: usize,
    /// Layer title.
    #[tabled(rename = "Layer")]
    pub title: String,
    /// Feature count.
    #[tabled(rename = "Objects")]
    pub num_obj: u64,
    /// Field count.
    #[tabled(rename = "Fields")]
    pub num_fields: usize,
    /// Geometry kind of the first feature.
    #[tabled(rename = "Geometry")]
    pub geometry: String,
    /// SRS category.
    #[tabled(rename = "SRS Type")]
    pub srs_type: String,
    /// SRS display name.
    #[tabled(rename = "SRS")]
    pub srs: String,
    #[tabled(rename = "EPSG")]
    pub epsg: String,
    /// Layer-level error marker, if any.
    #[tabled(rename = "Error")]
    pub error: String,
}

impl From<&LayerRecord> for LayerRow {
    fn from(record: &LayerRecord) -> Self {
        let geo = record.geo.as_ref();
        Self {
            index: record.index,
            title: record.title.clone(),
            num_obj: record.num_obj,
            num_fields: record.num_fields,
            geometry: geo
                .and_then(|g| g.type_geom.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            srs_type: geo.map_or_else(|| "N/A".to_string(), |g| g.srs_type.clone()),
            srs: geo.map_or_else(|| "N/A".to_string(), |g| g.srs.clone()),
            epsg: geo.map_or_else(|| "N/A".to_string(), |g| g.epsg.clone()),
            error: record.error.clone().unwrap_or_default(),
        }
    }
}

/// Table row representation for displaying field information.
#[derive(Tabled)]
pub struct FieldRow {
    /// Name of the field.
    #[tabled(rename = "Field")]
    pub name: String,
    /// OGR type name of the field.
    #[tabled(rename = "Type")]
    pub type_name: String,
    #[tabled(rename = "Width")]
    pub width: i32,
    #[tabled(rename = "Precision")]
    pub precision: i32,
}

/// Table row representation for displaying driver information.
#[derive(Tabled)]
pub struct DriverRow {
    /// Short identifier for the driver (e.g., `GPKG`, `SQLite`).
    #[tabled(rename = "Short Name")]
    pub short_name: String,
    /// Full descriptive name of the driver format.
    #[tabled(rename = "Long Name")]
    pub long_name: String,
    /// File extensions the driver is tried for.
    #[tabled(rename = "Extensions")]
    pub extensions: String,
    /// Support status of the metadata report.
    #[tabled(rename = "Info")]
    pub info: String,
    /// Whether the linked GDAL build ships the driver.
    #[tabled(rename = "Installed")]
    pub installed: String,
}

/// Formats an optional value, falling back to `N/A`.
fn or_na(value: Option<&String>) -> &str {
    value.map_or("N/A", String::as_str)
}

/// Display a container report as text and tables.
///
/// # Arguments
///
/// * `report` - The report to display
pub fn display_report(report: &Report) {
    println!("\nContainer: {}", report.name);
    println!("Folder: {}", report.folder);

    if let Some(error) = &report.error {
        println!("Status: {error}");
    } else {
        println!("Size: {}", or_na(report.total_size.as_ref()));
        println!("Modified: {}", or_na(report.date_actu.as_ref()));
        println!("Created: {}", or_na(report.date_crea.as_ref()));
        println!(
            "Layers: {}  Fields: {}  Objects: {}",
            report.layers_count, report.total_fields, report.total_objs
        );
    }
    println!("Alerts: {}", report.alerts);

    if report.err_gdal.category != ErrorCategory::None {
        println!(
            "Last GDAL message ({}): {}",
            report.err_gdal.category.as_str(),
            report.err_gdal.message
        );
    }

    if !report.layers.is_empty() {
        println!("\n=== Layers ===");
        let rows: Vec<LayerRow> = report.layers.iter().map(LayerRow::from).collect();
        println!("{}", Table::new(rows));
    }

    for layer in report.layers.iter().filter(|l| !l.fields.is_empty()) {
        println!("\n=== Fields of {} ===", layer.key());
        let rows: Vec<FieldRow> = layer
            .fields
            .iter()
            .map(|(name, field)| FieldRow {
                name: name.to_string(),
                type_name: field.type_name.clone(),
                width: field.width,
                precision: field.precision,
            })
            .collect();
        println!("{}", Table::new(rows));
    }
}
