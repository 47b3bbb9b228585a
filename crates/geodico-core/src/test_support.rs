//! In-memory sources for unit tests.

use std::collections::VecDeque;
use std::path::Path;

use geodico_core_common::{
    Extent, FieldDefinition, SourceError, SourceLayer, SourceOpener, SpatialReference,
    VectorSource,
};

use crate::diagnostics::DiagnosticSink;

#[derive(Debug, Clone, Default)]
pub struct FakeSrs {
    pub compound: bool,
    pub geocentric: bool,
    pub geographic: bool,
    pub local: bool,
    pub projected: bool,
    pub vertical: bool,
    pub attributes: Vec<(String, usize, Vec<u8>)>,
    /// EPSG code added as `AUTHORITY` by `auto_identify_epsg`
    pub identifiable_as: Option<String>,
}

impl FakeSrs {
    pub fn with_attribute(mut self, key: &str, child: usize, value: &[u8]) -> Self {
        self.attributes
            .push((key.to_string(), child, value.to_vec()));
        self
    }

    /// Geographic WGS 84 as GDAL describes it: no `PROJCS` node.
    pub fn wgs84() -> Self {
        Self {
            geographic: true,
            ..Self::default()
        }
        .with_attribute("GEOGCS", 0, b"WGS 84")
        .with_attribute("AUTHORITY", 0, b"EPSG")
        .with_attribute("AUTHORITY", 1, b"4326")
    }

    pub fn projected(name: &str, epsg: &str) -> Self {
        Self {
            projected: true,
            ..Self::default()
        }
        .with_attribute("PROJCS", 0, name.as_bytes())
        .with_attribute("AUTHORITY", 0, b"EPSG")
        .with_attribute("AUTHORITY", 1, epsg.as_bytes())
    }
}

impl SpatialReference for FakeSrs {
    fn auto_identify_epsg(&mut self) -> bool {
        if self.attribute("AUTHORITY", 1).is_some() {
            return true;
        }
        match self.identifiable_as.clone() {
            Some(code) => {
                self.attributes
                    .push(("AUTHORITY".to_string(), 1, code.into_bytes()));
                true
            },
            None => false,
        }
    }

    fn is_compound(&self) -> bool {
        self.compound
    }

    fn is_geocentric(&self) -> bool {
        self.geocentric
    }

    fn is_geographic(&self) -> bool {
        self.geographic
    }

    fn is_local(&self) -> bool {
        self.local
    }

    fn is_projected(&self) -> bool {
        self.projected
    }

    fn is_vertical(&self) -> bool {
        self.vertical
    }

    fn attribute(&self, key: &str, child: usize) -> Option<Vec<u8>> {
        self.attributes
            .iter()
            .find(|(k, c, _)| k == key && *c == child)
            .map(|(_, _, v)| v.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeLayer {
    pub name: Vec<u8>,
    pub feature_count: u64,
    /// Feature counting fails, the way a damaged table makes GDAL return -1
    pub uncountable: bool,
    pub fields: Vec<FieldDefinition>,
    pub srs: Option<FakeSrs>,
    pub extent: Option<Extent>,
    /// Geometry names of the features left under the cursor
    pub geometries: VecDeque<Option<String>>,
}

impl FakeLayer {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    /// Layer holding `count` features of geometry `geometry`.
    pub fn with_features(mut self, geometry: &str, count: u64) -> Self {
        self.feature_count = count;
        self.geometries = (0..count).map(|_| Some(geometry.to_string())).collect();
        self
    }

    pub fn with_fields(mut self, fields: &[(&str, &str)]) -> Self {
        self.fields = fields
            .iter()
            .map(|(name, type_name)| FieldDefinition::new(*name, *type_name, 0, 0))
            .collect();
        self
    }

    pub fn uncountable(mut self) -> Self {
        self.uncountable = true;
        self
    }

    pub fn with_srs(mut self, srs: FakeSrs) -> Self {
        self.srs = Some(srs);
        self
    }

    pub fn with_extent(mut self, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        self.extent = Some(Extent {
            xmin,
            xmax,
            ymin,
            ymax,
        });
        self
    }
}

impl SourceLayer for FakeLayer {
    type SpatialRef = FakeSrs;

    fn name_bytes(&self) -> Vec<u8> {
        self.name.clone()
    }

    fn feature_count(&self) -> Option<u64> {
        (!self.uncountable).then_some(self.feature_count)
    }

    fn fields(&self) -> Vec<FieldDefinition> {
        self.fields.clone()
    }

    fn spatial_ref(&self) -> Option<FakeSrs> {
        self.srs.clone()
    }

    fn extent(&self) -> Option<Extent> {
        self.extent
    }

    fn next_geometry_name(&mut self) -> Option<String> {
        self.geometries.pop_front().flatten()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    pub name: String,
    pub layers: Vec<FakeLayer>,
    /// Indices whose handle cannot be fetched
    pub unreadable: Vec<usize>,
}

impl VectorSource for FakeSource {
    type Layer<'a> = FakeLayer;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, index: usize) -> Result<FakeLayer, SourceError> {
        if self.unreadable.contains(&index) {
            return Err(SourceError::Layer {
                index,
                message: "layer handle unavailable".to_string(),
            });
        }
        self.layers.get(index).cloned().ok_or(SourceError::Layer {
            index,
            message: "index out of range".to_string(),
        })
    }
}

/// Opener returning a fixed source, or failing when none is set. Diagnostics
/// listed in `diagnostics` are pushed into `sink` during the open, the way the
/// library's error handler would.
pub struct FakeOpener {
    pub source: Option<FakeSource>,
    pub diagnostics: Vec<(i32, i32, String)>,
    pub sink: DiagnosticSink,
}

impl FakeOpener {
    pub fn new(source: Option<FakeSource>, sink: &DiagnosticSink) -> Self {
        Self {
            source,
            diagnostics: Vec::new(),
            sink: sink.clone(),
        }
    }

    pub fn with_diagnostic(mut self, severity: i32, code: i32, message: &str) -> Self {
        self.diagnostics
            .push((severity, code, message.to_string()));
        self
    }
}

impl SourceOpener for FakeOpener {
    type Source = FakeSource;

    fn open(&self, path: &Path) -> Result<FakeSource, SourceError> {
        for (severity, code, message) in &self.diagnostics {
            self.sink.record(*severity, *code, message);
        }
        self.source.clone().ok_or_else(|| SourceError::Open {
            path: path.to_path_buf(),
            message: "not recognized as a supported file format".to_string(),
        })
    }
}
