//! Per-layer aggregation.

use geodico_core_common::SourceLayer;
use log::{debug, warn};

use crate::fields::infos_fields;
use crate::geos::infos_geos;
use crate::labels::TextLabels;
use crate::types::LayerRecord;
use crate::utils::decode_with_fallback;

/// Fills `record` from `layer` and returns the number of alerts raised.
///
/// Empty layers and layers whose features cannot be counted are flagged and
/// skip the SRS and geometry description; the field map is built in every
/// case. A title that had to be decoded as Latin-1 and an SRS that fits no
/// category each count as one alert.
pub fn infos_basics<L: SourceLayer>(
    layer: &mut L,
    record: &mut LayerRecord,
    labels: &TextLabels,
) -> u32 {
    let mut alerts = 0;

    let title = decode_with_fallback(&layer.name_bytes());
    if title.fallback {
        debug!("Layer {} name is not valid UTF-8, decoded as Latin-1", record.index);
        alerts += 1;
    }
    record.title = title.text;

    match layer.feature_count() {
        None => {
            warn!("Layer '{}' features could not be counted", record.title);
            record.error = Some(labels.err_unreadable.clone());
            alerts += 1;
        },
        Some(0) => {
            warn!("Layer '{}' has no objects", record.title);
            record.error = Some(labels.err_nobjet.clone());
            alerts += 1;
        },
        Some(count) => {
            record.num_obj = count;
            let description = infos_geos(layer, labels);
            if !description.srs_resolved {
                debug!("Layer '{}' SRS fits no known category", record.title);
                alerts += 1;
            }
            record.geo = Some(description.info);
        },
    }

    let fields = layer.fields();
    record.num_fields = fields.len();
    record.fields = infos_fields(&fields);

    alerts
}
