//! Formatting and decoding helpers used while building reports.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{IoError, Result};

/// Renders a byte count with one decimal and a unit label.
///
/// The value is divided by 1024 while it stays at or above 1024, walking the
/// first four labels of `units`. Past the fourth the fifth label is used, so
/// anything from 1024 GB upward is expressed in that last unit.
///
/// # Examples
///
/// ```
/// use geodico_core::labels::TextLabels;
/// use geodico_core::utils::sizeof;
///
/// let labels = TextLabels::english();
/// assert_eq!(sizeof(1536, &labels.size_units), "1.5 KB");
/// assert_eq!(sizeof(0, &TextLabels::french().size_units), "0.0 octets");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sizeof(bytes: u64, units: &[String; 5]) -> String {
    let mut size = bytes as f64;
    for unit in &units[..4] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} {}", units[4])
}

/// Text decoded from native bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Best-effort text
    pub text: String,
    /// `true` when the bytes were not valid UTF-8 and Latin-1 was used instead
    pub fallback: bool,
}

/// Decodes `bytes` as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback never fails.
#[must_use]
pub fn decode_with_fallback(bytes: &[u8]) -> DecodedText {
    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text: text.to_string(),
            fallback: false,
        },
        Err(_) => DecodedText {
            text: bytes.iter().copied().map(char::from).collect(),
            fallback: true,
        },
    }
}

/// Rounds to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a timestamp as `DD/MM/YYYY` in local time.
#[must_use]
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%d/%m/%Y").to_string()
}

/// Size and dates of a container on disk.
#[derive(Debug, Clone, Copy)]
pub struct FileStats {
    /// Cumulative size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Creation time, or modification time where the platform has none
    pub created: SystemTime,
}

impl FileStats {
    /// Stats `path`. Directories (File Geodatabases) report the cumulated size
    /// of the regular files directly inside them.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Metadata`] if `path` or one of its entries cannot be stat'ed.
    pub fn collect(path: &Path) -> Result<Self> {
        let metadata_error = |source| IoError::Metadata {
            path: path.to_path_buf(),
            source,
        };
        let metadata = fs::metadata(path).map_err(metadata_error)?;

        let size = if metadata.is_dir() {
            let mut total = 0;
            for entry in fs::read_dir(path).map_err(metadata_error)? {
                let entry_metadata = entry
                    .and_then(|e| e.metadata())
                    .map_err(metadata_error)?;
                if entry_metadata.is_file() {
                    total += entry_metadata.len();
                }
            }
            total
        } else {
            metadata.len()
        };

        let modified = metadata.modified().map_err(metadata_error)?;
        let created = metadata.created().unwrap_or(modified);

        Ok(Self {
            size,
            modified,
            created,
        })
    }
}
