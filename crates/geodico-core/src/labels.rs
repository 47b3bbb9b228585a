//! Text labels used in reports.
//!
//! Reports carry human-readable labels (SRS categories, geometry kinds, error
//! markers, size units) rather than codes. The table is supplied by the caller
//! so the same walk can produce reports in several languages.

/// Label table consulted while building a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabels {
    /// Compound SRS
    pub srs_comp: String,
    /// Geocentric SRS
    pub srs_geoc: String,
    /// Geographic SRS
    pub srs_geog: String,
    /// Local SRS
    pub srs_loca: String,
    /// Projected SRS
    pub srs_proj: String,
    /// Vertical SRS
    pub srs_vert: String,
    /// None of the SRS categories matched
    pub srs_nr: String,
    pub geom_point: String,
    pub geom_ligne: String,
    pub geom_polyg: String,
    /// Marker for a container that could not be opened
    pub err_corrupt: String,
    /// Marker for a layer without features
    pub err_nobjet: String,
    /// Marker for a layer whose handle could not be fetched
    pub err_unreadable: String,
    /// EPSG value when the SRS carries no authority code
    pub epsg_none: String,
    /// Size units from bytes to terabytes
    pub size_units: [String; 5],
}

impl TextLabels {
    /// English labels.
    #[must_use]
    pub fn english() -> Self {
        Self {
            srs_comp: "Compound".to_string(),
            srs_geoc: "Geocentric".to_string(),
            srs_geog: "Geographic".to_string(),
            srs_loca: "Local".to_string(),
            srs_proj: "Projected".to_string(),
            srs_vert: "Vertical".to_string(),
            srs_nr: "not recognized".to_string(),
            geom_point: "Point".to_string(),
            geom_ligne: "Line".to_string(),
            geom_polyg: "Polygon".to_string(),
            err_corrupt: "corrupt".to_string(),
            err_nobjet: "no objects".to_string(),
            err_unreadable: "unreadable".to_string(),
            epsg_none: "none found".to_string(),
            size_units: ["bytes", "KB", "MB", "GB", "TB"].map(String::from),
        }
    }

    /// French labels.
    #[must_use]
    pub fn french() -> Self {
        Self {
            srs_comp: "Composé".to_string(),
            srs_geoc: "Géocentrique".to_string(),
            srs_geog: "Géographique".to_string(),
            srs_loca: "Local".to_string(),
            srs_proj: "Projeté".to_string(),
            srs_vert: "Vertical".to_string(),
            srs_nr: "non reconnu".to_string(),
            geom_point: "Point".to_string(),
            geom_ligne: "Ligne".to_string(),
            geom_polyg: "Polygone".to_string(),
            err_corrupt: "corrompu".to_string(),
            err_nobjet: "aucun objet".to_string(),
            err_unreadable: "illisible".to_string(),
            epsg_none: "aucun trouvé".to_string(),
            size_units: ["octets", "Ko", "Mo", "Go", "To"].map(String::from),
        }
    }
}

impl Default for TextLabels {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(TextLabels::default(), TextLabels::english());
    }

    #[test]
    fn test_french_size_units() {
        assert_eq!(TextLabels::french().size_units[0], "octets");
        assert_eq!(TextLabels::french().size_units[4], "To");
    }
}
