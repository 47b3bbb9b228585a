//! Driver descriptors for spatial database formats.
//!
//! A driver names a GDAL vector driver together with the file extensions it is
//! expected to open and whether the metadata reader targets it.

/// Support status for the metadata report of a driver.
///
/// Indicates whether the reader produces reports for containers of this format,
/// plans to, or does not target it at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportStatus {
    /// Reports are produced and tested for this format.
    Supported,
    /// The format is not targeted by the reader.
    NotSupported,
    /// The format is planned for future support.
    Planned,
}

impl SupportStatus {
    /// Returns `true` if the format is fully supported.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, SupportStatus::Supported)
    }

    /// Returns the string representation of this support status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SupportStatus::Supported => "Supported",
            SupportStatus::NotSupported => "Not Supported",
            SupportStatus::Planned => "Planned",
        }
    }
}

/// Spatial database format driver definition.
///
/// `short_name` is the GDAL driver name, which is also what the backend passes
/// as allowed driver when opening a path whose extension matches `extensions`.
#[derive(Debug, Clone)]
pub struct Driver {
    /// GDAL short name (e.g., `"GPKG"`).
    pub short_name: &'static str,
    /// Long descriptive name for display purposes.
    pub long_name: &'static str,
    /// Lower-case file extensions, without the leading dot.
    pub extensions: &'static [&'static str],
    /// Support status of the metadata report.
    pub info: SupportStatus,
}

impl Driver {
    /// Creates a new driver definition.
    #[must_use]
    pub const fn new(
        short_name: &'static str,
        long_name: &'static str,
        extensions: &'static [&'static str],
        info: SupportStatus,
    ) -> Self {
        Self {
            short_name,
            long_name,
            extensions,
            info,
        }
    }

    /// Returns `true` if `extension` (any case, no leading dot) belongs to this driver.
    #[must_use]
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}
