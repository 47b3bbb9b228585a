//! Driver registry for spatial database formats.
//!
//! This module lists the GDAL vector drivers behind the containers the reader
//! targets, with the file extensions each is expected to open and whether the
//! metadata report supports it. The registry decides which drivers GDAL tries
//! first for a given path, so a `.gpkg` is opened by the GeoPackage driver
//! rather than the SQLite one.
//!
//! # Examples
//!
//! ```
//! use geodico_core::drivers::{drivers_for_path, find_driver};
//! use std::path::Path;
//!
//! let gpkg = find_driver("gpkg").expect("GeoPackage driver should exist");
//! assert!(gpkg.info.is_supported());
//!
//! let candidates = drivers_for_path(Path::new("data/cadastre.gdb"));
//! assert!(candidates.iter().any(|d| d.short_name == "OpenFileGDB"));
//! ```

use std::path::Path;

pub use geodico_core_common::drivers::{Driver, SupportStatus};

/// Returns the complete registry, regardless of support status.
#[must_use]
pub fn get_drivers() -> Vec<Driver> {
    use SupportStatus::{NotSupported, Planned, Supported};

    vec![
        Driver::new(
            "SQLite",
            "SQLite / Spatialite",
            &["sqlite", "spatialite", "db", "sqlite3"],
            Supported,
        ),
        Driver::new("GPKG", "GeoPackage vector", &["gpkg"], Supported),
        Driver::new(
            "OpenFileGDB",
            "ESRI File Geodatabase vector (OpenFileGDB)",
            &["gdb"],
            Supported,
        ),
        Driver::new(
            "FileGDB",
            "ESRI File Geodatabase (FileGDB)",
            &["gdb"],
            Supported,
        ),
        Driver::new("PGeo", "ESRI Personal Geodatabase", &["mdb"], Planned),
        Driver::new("MSSQLSpatial", "Microsoft SQL Server Spatial", &[], Planned),
        Driver::new("PostgreSQL", "PostgreSQL/PostGIS", &[], NotSupported),
        Driver::new("MySQL", "MySQL", &[], NotSupported),
        Driver::new("OCI", "Oracle Spatial", &[], NotSupported),
    ]
}

/// Returns the drivers whose metadata report is supported.
#[must_use]
pub fn get_available_drivers() -> Vec<Driver> {
    get_drivers()
        .into_iter()
        .filter(|d| d.info.is_supported())
        .collect()
}

/// Finds a driver by its short name (case-insensitive).
#[must_use]
pub fn find_driver(name: &str) -> Option<Driver> {
    get_drivers()
        .into_iter()
        .find(|d| d.short_name.eq_ignore_ascii_case(name))
}

/// Returns the supported drivers registered for the extension of `path`.
///
/// An empty list means the extension is unknown and any vector driver may be tried.
#[must_use]
pub fn drivers_for_path(path: &Path) -> Vec<Driver> {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return Vec::new();
    };
    get_available_drivers()
        .into_iter()
        .filter(|d| d.matches_extension(extension))
        .collect()
}
