//! Reading a spatial database into a [`Report`].
//!
//! [`read`] is the GDAL entry point: it routes GDAL's error handler into a
//! collector for the duration of the call and walks the container.
//! [`read_with`] performs the same walk against any [`SourceOpener`].
//!
//! # Examples
//!
//! ```no_run
//! use geodico_core::labels::TextLabels;
//! use geodico_core::reader::read;
//!
//! let report = read("data/Spatialite_Test.sqlite", &TextLabels::english());
//! println!("{} layers, {} objects", report.layers_count, report.total_objs);
//! ```

use std::path::Path;

use log::{debug, info, warn};

use geodico_core_common::{SourceOpener, VectorSource};

use crate::diagnostics::{DiagnosticSink, ErrorHandlerGuard};
use crate::gdal_source::GdalOpener;
use crate::labels::TextLabels;
use crate::layer::infos_basics;
use crate::types::{LayerRecord, Report};
use crate::utils::{FileStats, format_date, sizeof};

/// Reads the container at `path` with GDAL.
///
/// Never fails: a container that cannot be opened yields a report whose
/// `error` is set and whose `layers_count` is 0. The last GDAL diagnostic
/// emitted during the call is stored in `err_gdal`.
///
/// GDAL's error handler is process-wide, so concurrent calls in one process
/// overwrite each other's handler.
pub fn read(path: impl AsRef<Path>, labels: &TextLabels) -> Report {
    let guard = ErrorHandlerGuard::install();
    read_with(&GdalOpener, path.as_ref(), labels, guard.sink())
}

/// Reads the container at `path` through `opener`, taking the final
/// diagnostic from `sink`.
pub fn read_with<O: SourceOpener>(
    opener: &O,
    path: &Path,
    labels: &TextLabels,
    sink: &DiagnosticSink,
) -> Report {
    info!("Reading {}", path.display());

    let source = match opener.open(path) {
        Ok(source) => source,
        Err(e) => {
            warn!("{e}");
            let mut report = Report::corrupt(path, &labels.err_corrupt);
            report.alerts = 1;
            report.err_gdal = sink.last();
            return report;
        },
    };

    // The handle's name may differ from the requested path
    let handle_name = source.name();
    let mut report = if handle_name.is_empty() {
        Report::new(path)
    } else {
        Report::new(Path::new(&handle_name))
    };
    report.layers_count = source.layer_count();

    match FileStats::collect(path) {
        Ok(stats) => {
            report.total_size = Some(sizeof(stats.size, &labels.size_units));
            report.date_actu = Some(format_date(stats.modified));
            report.date_crea = Some(format_date(stats.created));
        },
        Err(e) => warn!("{}", e.user_message()),
    }

    for index in 0..report.layers_count {
        let mut record = LayerRecord::new(report.name.clone(), index);
        match source.layer(index) {
            Ok(mut layer) => {
                report.alerts += infos_basics(&mut layer, &mut record, labels);
            },
            Err(e) => {
                warn!("{e}");
                record.error = Some(labels.err_unreadable.clone());
                report.alerts += 1;
            },
        }
        debug!(
            "Layer {}: {} objects, {} fields",
            record.key(),
            record.num_obj,
            record.num_fields
        );

        report.layers_names.push(record.title.clone());
        report.layers_idx.push(index);
        report.total_fields = report.total_fields.saturating_add(record.num_fields);
        report.total_objs = report.total_objs.saturating_add(record.num_obj);
        report.layers.push(record);
    }

    report.err_gdal = sink.last();
    info!(
        "{}: {} layers, {} fields, {} objects, {} alerts",
        report.name, report.layers_count, report.total_fields, report.total_objs, report.alerts
    );
    report
}
