//! GDAL implementation of the source traits.
//!
//! Layer names and SRS attributes are read through `gdal-sys` so the raw bytes
//! reach the caller undecoded; the safe `gdal` API would already have replaced
//! invalid UTF-8.

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::Path;

use gdal::spatial_ref::SpatialRef;
use gdal::vector::{Layer, LayerAccess, field_type_to_name};
use gdal::{Dataset, DatasetOptions, DriverManager, GdalOpenFlags, Metadata};
use log::debug;

use geodico_core_common::{
    Extent, FieldDefinition, SourceError, SourceLayer, SourceOpener, SpatialReference,
    VectorSource,
};

use crate::drivers::drivers_for_path;

/// Copies a C string owned by GDAL. Null pointers yield `None`.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string valid for the call.
unsafe fn owned_bytes(ptr: *const c_char) -> Option<Vec<u8>> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_bytes().to_vec())
    }
}

/// Returns `true` if GDAL was built with the driver `short_name`.
#[must_use]
pub fn is_installed(short_name: &str) -> bool {
    DriverManager::get_driver_by_name(short_name).is_ok()
}

/// Opens containers read-only with GDAL's vector drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalOpener;

/// Opens `path` read-only as a vector container, restricted to `allowed`
/// drivers when given.
fn open_vector(path: &Path, allowed: Option<&[&str]>) -> gdal::errors::Result<Dataset> {
    let options = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_VECTOR
            | GdalOpenFlags::GDAL_OF_READONLY
            | GdalOpenFlags::GDAL_OF_VERBOSE_ERROR,
        allowed_drivers: allowed,
        ..DatasetOptions::default()
    };
    Dataset::open_ex(path, options)
}

impl SourceOpener for GdalOpener {
    type Source = GdalSource;

    /// Tries the drivers registered for the extension first, then any vector
    /// driver, so a container with an unexpected extension still opens.
    fn open(&self, path: &Path) -> Result<GdalSource, SourceError> {
        let allowed: Vec<&str> = drivers_for_path(path)
            .iter()
            .map(|d| d.short_name)
            .collect();

        let opened = if allowed.is_empty() {
            open_vector(path, None)
        } else {
            debug!("Opening {} with drivers {allowed:?}", path.display());
            open_vector(path, Some(allowed.as_slice())).or_else(|e| {
                debug!("{e}; retrying {} with any vector driver", path.display());
                open_vector(path, None)
            })
        };

        opened
            .map(|dataset| GdalSource { dataset })
            .map_err(|e| SourceError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

/// An opened GDAL dataset.
pub struct GdalSource {
    dataset: Dataset,
}

impl VectorSource for GdalSource {
    type Layer<'a> = GdalLayer<'a>;

    fn name(&self) -> String {
        self.dataset.description().unwrap_or_default()
    }

    fn layer_count(&self) -> usize {
        self.dataset.layer_count()
    }

    fn layer(&self, index: usize) -> Result<GdalLayer<'_>, SourceError> {
        self.dataset
            .layer(index)
            .map(|layer| GdalLayer { layer })
            .map_err(|e| SourceError::Layer {
                index,
                message: e.to_string(),
            })
    }
}

/// A layer borrowed from a [`GdalSource`].
pub struct GdalLayer<'a> {
    layer: Layer<'a>,
}

impl SourceLayer for GdalLayer<'_> {
    type SpatialRef = GdalSpatialRef;

    fn name_bytes(&self) -> Vec<u8> {
        // SAFETY: the layer handle is alive for `'a` and OGR owns the returned name.
        unsafe { owned_bytes(gdal_sys::OGR_L_GetName(self.layer.c_layer())) }.unwrap_or_default()
    }

    fn feature_count(&self) -> Option<u64> {
        // GDAL returns -1 when the count fails.
        // SAFETY: the layer handle is alive for `'a`.
        let count = unsafe { gdal_sys::OGR_L_GetFeatureCount(self.layer.c_layer(), 1) };
        u64::try_from(count).ok()
    }

    fn fields(&self) -> Vec<FieldDefinition> {
        self.layer
            .defn()
            .fields()
            .map(|field| {
                FieldDefinition::new(
                    field.name(),
                    field_type_to_name(field.field_type()),
                    field.width(),
                    field.precision(),
                )
            })
            .collect()
    }

    fn spatial_ref(&self) -> Option<GdalSpatialRef> {
        self.layer.spatial_ref().map(GdalSpatialRef)
    }

    fn extent(&self) -> Option<Extent> {
        match self.layer.get_extent() {
            Ok(envelope) => Some(Extent {
                xmin: envelope.MinX,
                xmax: envelope.MaxX,
                ymin: envelope.MinY,
                ymax: envelope.MaxY,
            }),
            Err(e) => {
                debug!("No extent: {e}");
                None
            },
        }
    }

    fn next_geometry_name(&mut self) -> Option<String> {
        // OGR_L_GetNextFeature continues from the current cursor, unlike
        // `Layer::features` which rewinds first.
        // SAFETY: the feature handle is owned here and destroyed before return;
        // the geometry and its name are owned by the feature.
        unsafe {
            let feature = gdal_sys::OGR_L_GetNextFeature(self.layer.c_layer());
            if feature.is_null() {
                return None;
            }
            let geometry = gdal_sys::OGR_F_GetGeometryRef(feature);
            let name = if geometry.is_null() {
                None
            } else {
                owned_bytes(gdal_sys::OGR_G_GetGeometryName(geometry))
                    .map(|b| String::from_utf8_lossy(&b).into_owned())
            };
            gdal_sys::OGR_F_Destroy(feature);
            name
        }
    }
}

/// A layer's spatial reference.
pub struct GdalSpatialRef(SpatialRef);

impl SpatialReference for GdalSpatialRef {
    fn auto_identify_epsg(&mut self) -> bool {
        self.0.auto_identify_epsg().is_ok()
    }

    fn is_compound(&self) -> bool {
        self.0.is_compound()
    }

    fn is_geocentric(&self) -> bool {
        self.0.is_geocentric()
    }

    fn is_geographic(&self) -> bool {
        self.0.is_geographic()
    }

    fn is_local(&self) -> bool {
        self.0.is_local()
    }

    fn is_projected(&self) -> bool {
        self.0.is_projected()
    }

    fn is_vertical(&self) -> bool {
        self.0.is_vertical()
    }

    fn attribute(&self, key: &str, child: usize) -> Option<Vec<u8>> {
        let key = CString::new(key).ok()?;
        let child = c_int::try_from(child).ok()?;
        // SAFETY: the SRS handle is owned by `self.0`; OSR owns the returned value.
        unsafe {
            owned_bytes(gdal_sys::OSRGetAttrValue(
                self.0.to_c_hsrs(),
                key.as_ptr(),
                child,
            ))
        }
    }
}
