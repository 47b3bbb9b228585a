//! Spatial reference and geometry description of a layer.
//!
//! The SRS category is found by testing six predicates in a fixed order and
//! keeping the last one that holds, so a reference that is both projected and
//! vertical is reported as vertical. The geometry kind is read from the next
//! feature under the layer cursor, which consumes that feature.

use geodico_core_common::{SourceLayer, SpatialReference};
use log::debug;

use crate::labels::TextLabels;
use crate::types::{BoundingBox, GeoInfo};
use crate::utils::decode_with_fallback;

/// `PROJCS` value GDAL uses for projections without a proper name.
const UNNAMED: &[u8] = b"unnamed";
/// Display name of a reference whose name attribute is missing.
const MISSING_NAME: &str = "None";

/// Outcome of [`infos_geos`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDescription {
    pub info: GeoInfo,
    /// `false` when the layer has no SRS or no category predicate held
    pub srs_resolved: bool,
}

/// Returns the label of the last SRS category whose predicate holds, testing
/// compound, geocentric, geographic, local, projected then vertical.
pub fn classify_srs<'l, R: SpatialReference>(srs: &R, labels: &'l TextLabels) -> Option<&'l str> {
    let checks = [
        (srs.is_compound(), &labels.srs_comp),
        (srs.is_geocentric(), &labels.srs_geoc),
        (srs.is_geographic(), &labels.srs_geog),
        (srs.is_local(), &labels.srs_loca),
        (srs.is_projected(), &labels.srs_proj),
        (srs.is_vertical(), &labels.srs_vert),
    ];
    checks
        .into_iter()
        .filter(|(holds, _)| *holds)
        .map(|(_, label)| label.as_str())
        .last()
}

/// Display name of the reference: `PROJCS`, or `PROJECTION` when the former
/// is `unnamed`, with underscores turned into spaces.
pub fn srs_display_name<R: SpatialReference>(srs: &R) -> String {
    let projcs = srs.attribute("PROJCS", 0);
    let chosen = if projcs.as_deref() == Some(UNNAMED) {
        srs.attribute("PROJECTION", 0)
    } else {
        projcs
    };
    match chosen {
        Some(bytes) => {
            let decoded = decode_with_fallback(&bytes);
            if decoded.fallback {
                debug!("SRS name is not valid UTF-8, decoded as Latin-1");
            }
            decoded.text.replace('_', " ")
        },
        None => MISSING_NAME.to_string(),
    }
}

/// Maps a geometry type name onto a label: exact `POINT`, or names containing
/// `LINESTRING` or `POLYGON`. Other names pass through unchanged.
#[must_use]
pub fn classify_geometry(name: &str, labels: &TextLabels) -> String {
    if name == "POINT" {
        labels.geom_point.clone()
    } else if name.contains("LINESTRING") {
        labels.geom_ligne.clone()
    } else if name.contains("POLYGON") {
        labels.geom_polyg.clone()
    } else {
        name.to_string()
    }
}

/// Describes the SRS, geometry kind and bounding box of a non-empty layer.
///
/// Reads up to two features from the layer cursor to find a geometry.
pub fn infos_geos<L: SourceLayer>(layer: &mut L, labels: &TextLabels) -> GeoDescription {
    let (srs_type, srs, epsg) = match layer.spatial_ref() {
        Some(mut reference) => {
            if !reference.auto_identify_epsg() {
                debug!("EPSG code could not be identified");
            }
            let srs_type = classify_srs(&reference, labels).map(str::to_string);
            let mut srs = srs_display_name(&reference);
            let epsg = reference
                .attribute("AUTHORITY", 1)
                .map_or_else(|| labels.epsg_none.clone(), |code| {
                    decode_with_fallback(&code).text
                });
            if epsg == "4326" && srs == MISSING_NAME {
                srs = "WGS 84".to_string();
            }
            (srs_type, srs, epsg)
        },
        None => (None, MISSING_NAME.to_string(), labels.epsg_none.clone()),
    };

    let type_geom = layer
        .next_geometry_name()
        .or_else(|| layer.next_geometry_name())
        .map(|name| classify_geometry(&name, labels));

    let info = GeoInfo {
        srs_type: srs_type
            .clone()
            .unwrap_or_else(|| labels.srs_nr.clone()),
        srs,
        epsg,
        type_geom,
        bbox: layer.extent().map(BoundingBox::from),
    };

    GeoDescription {
        info,
        srs_resolved: srs_type.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeLayer, FakeSrs};

    fn labels() -> TextLabels {
        TextLabels::english()
    }

    #[test]
    fn test_last_matching_category_wins() {
        let srs = FakeSrs {
            projected: true,
            vertical: true,
            ..FakeSrs::default()
        };
        assert_eq!(classify_srs(&srs, &labels()), Some("Vertical"));

        let srs = FakeSrs {
            compound: true,
            geographic: true,
            ..FakeSrs::default()
        };
        assert_eq!(classify_srs(&srs, &labels()), Some("Geographic"));
    }

    #[test]
    fn test_no_category_matches() {
        assert_eq!(classify_srs(&FakeSrs::default(), &labels()), None);
    }

    #[test]
    fn test_display_name_replaces_underscores() {
        let srs = FakeSrs::projected("RGF93_Lambert_93", "2154");
        assert_eq!(srs_display_name(&srs), "RGF93 Lambert 93");
    }

    #[test]
    fn test_unnamed_projcs_falls_back_to_projection() {
        let srs = FakeSrs::default()
            .with_attribute("PROJCS", 0, b"unnamed")
            .with_attribute("PROJECTION", 0, b"Transverse_Mercator");
        assert_eq!(srs_display_name(&srs), "Transverse Mercator");
    }

    #[test]
    fn test_latin1_display_name() {
        // "Réseau_national" in Latin-1
        let srs = FakeSrs::default().with_attribute("PROJCS", 0, b"R\xe9seau_national");
        assert_eq!(srs_display_name(&srs), "Réseau national");
    }

    #[test]
    fn test_missing_name_renders_none() {
        assert_eq!(srs_display_name(&FakeSrs::default()), "None");
    }

    #[test]
    fn test_wgs84_name_normalization() {
        let mut layer = FakeLayer::named("towns")
            .with_features("POINT", 2)
            .with_srs(FakeSrs::wgs84());

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.srs, "WGS 84");
        assert_eq!(description.info.epsg, "4326");
        assert_eq!(description.info.srs_type, "Geographic");
        assert!(description.srs_resolved);
    }

    #[test]
    fn test_other_geographic_keeps_none_name() {
        let srs = FakeSrs {
            geographic: true,
            ..FakeSrs::default()
        }
        .with_attribute("AUTHORITY", 1, b"4269");
        let mut layer = FakeLayer::named("nad83").with_features("POINT", 1).with_srs(srs);

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.srs, "None");
        assert_eq!(description.info.epsg, "4269");
    }

    #[test]
    fn test_auto_identified_epsg_is_used() {
        let srs = FakeSrs {
            projected: true,
            identifiable_as: Some("2154".to_string()),
            ..FakeSrs::default()
        }
        .with_attribute("PROJCS", 0, b"RGF93_Lambert_93");
        let mut layer = FakeLayer::named("parcels").with_features("POLYGON", 1).with_srs(srs);

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.epsg, "2154");
        assert_eq!(description.info.srs_type, "Projected");
    }

    #[test]
    fn test_missing_authority() {
        let srs = FakeSrs {
            local: true,
            ..FakeSrs::default()
        }
        .with_attribute("PROJCS", 0, b"site_grid");
        let mut layer = FakeLayer::named("site").with_features("POINT", 1).with_srs(srs);

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.epsg, "none found");
        assert_eq!(description.info.srs, "site grid");
        assert_eq!(description.info.srs_type, "Local");
    }

    #[test]
    fn test_unrecognized_srs() {
        let mut layer = FakeLayer::named("odd")
            .with_features("POINT", 1)
            .with_srs(FakeSrs::default().with_attribute("PROJCS", 0, b"custom"));

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.srs_type, "not recognized");
        assert!(!description.srs_resolved);
    }

    #[test]
    fn test_layer_without_srs() {
        let mut layer = FakeLayer::named("table").with_features("POINT", 1);

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.srs_type, "not recognized");
        assert_eq!(description.info.srs, "None");
        assert_eq!(description.info.epsg, "none found");
        assert!(!description.srs_resolved);
    }

    #[test]
    fn test_geometry_labels() {
        let labels = labels();
        assert_eq!(classify_geometry("POINT", &labels), "Point");
        assert_eq!(classify_geometry("LINESTRING", &labels), "Line");
        assert_eq!(classify_geometry("MULTILINESTRING", &labels), "Line");
        assert_eq!(classify_geometry("MULTIPOLYGON", &labels), "Polygon");
        assert_eq!(classify_geometry("MULTIPOINT", &labels), "MULTIPOINT");
        assert_eq!(classify_geometry("GEOMETRYCOLLECTION", &labels), "GEOMETRYCOLLECTION");
    }

    #[test]
    fn test_geometry_read_consumes_first_feature() {
        let mut layer = FakeLayer::named("roads")
            .with_features("LINESTRING", 3)
            .with_srs(FakeSrs::wgs84());

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.type_geom.as_deref(), Some("Line"));
        assert_eq!(layer.geometries.len(), 2);
    }

    #[test]
    fn test_second_feature_used_when_first_has_no_geometry() {
        let mut layer = FakeLayer::named("mixed").with_srs(FakeSrs::wgs84());
        layer.feature_count = 2;
        layer.geometries = vec![None, Some("POLYGON".to_string())].into();

        let description = infos_geos(&mut layer, &labels());
        assert_eq!(description.info.type_geom.as_deref(), Some("Polygon"));
        assert!(layer.geometries.is_empty());
    }

    #[test]
    fn test_bounding_box_is_rounded() {
        let mut layer = FakeLayer::named("towns")
            .with_features("POINT", 1)
            .with_srs(FakeSrs::projected("RGF93_Lambert_93", "2154"))
            .with_extent(651_234.567, 700_000.001, 6_600_000.119, 6_700_000.0);

        let bbox = infos_geos(&mut layer, &labels()).info.bbox.unwrap();
        assert!((bbox.xmin - 651_234.57).abs() < 1e-6);
        assert!((bbox.xmax - 700_000.0).abs() < 1e-6);
        assert!((bbox.ymin - 6_600_000.12).abs() < 1e-6);
        assert!((bbox.ymax - 6_700_000.0).abs() < 1e-6);
    }
}
