//! Element identifiers and XML namespace bindings.
//!
//! Every `gml:id` in a generated document comes from [`IdRegistry`], and so
//! does every `xlink:href` or `srsName` pointing at one.

use crate::record::Description;

/// DIGGS 2.6 namespace (also the default namespace)
pub const XMLNS_DIGGS: &str = "http://diggsml.org/schemas/2.6";

/// XML Schema instance namespace
pub const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XLink namespace
pub const XMLNS_XLINK: &str = "http://www.w3.org/1999/xlink";

/// GML 3.2 namespace
pub const XMLNS_GML: &str = "http://www.opengis.net/gml/3.2";

/// GML 3.3 linear referencing namespace
pub const XMLNS_GLR: &str = "http://www.opengis.net/gml/3.3/lr";

/// DIGGS schema location hint
pub const SCHEMA_LOCATION: &str =
    "http://diggsml.org/schemas/2.6 https://diggsml.org/schema-dev/Diggs.xsd";

/// Namespace bindings declared on the root element, in declaration order.
///
/// An empty prefix binds the default namespace.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("", XMLNS_DIGGS),
    ("diggs", XMLNS_DIGGS),
    ("xsi", XMLNS_XSI),
    ("xlink", XMLNS_XLINK),
    ("gml", XMLNS_GML),
    ("g3.3", "http://www.opengis.net/gml/3.3/ce"),
    ("glr", XMLNS_GLR),
    ("glrov", "http://www.opengis.net/gml/3.3/lrov"),
    ("diggs_geo", "http://diggsml.org/schemas/2.6/geotechnical"),
    ("witsml", "http://www.witsml.org/schemas/131"),
];

/// Returns the `xmlns` attributes for the root element.
pub fn namespace_attributes() -> impl Iterator<Item = (String, &'static str)> {
    NAMESPACES.iter().map(|(prefix, uri)| {
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        (key, *uri)
    })
}

/// Identifier of the producing software application.
pub const SOFTWARE_ID: &str = "sw_bor2diggs";

/// URN prefix for linear reference system identifiers.
const LRS_URN_PREFIX: &str = "urn:x-diggs:def:fi:DIGGSINC:";

/// Makes a raw reference usable inside an XML identifier.
///
/// Whitespace and any character outside `[A-Za-z0-9_.-]` become `_`.
pub fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns the local link form (`#id`) of an identifier.
pub fn href(id: &str) -> String {
    format!("#{}", id)
}

/// Derives all identifiers of one document from the record references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRegistry {
    file: String,
    project: String,
    borehole: String,
}

impl IdRegistry {
    /// Creates a registry from raw filename, project and borehole references.
    pub fn new(filename: &str, project_ref: &str, borehole_ref: &str) -> Self {
        Self {
            file: sanitize(filename),
            project: sanitize(project_ref),
            borehole: sanitize(borehole_ref),
        }
    }

    /// Creates a registry from a record description.
    pub fn from_description(description: &Description) -> Self {
        Self::new(
            &description.filename,
            &description.project_ref,
            &description.borehole_ref,
        )
    }

    /// Root `Diggs` element.
    pub fn root(&self) -> String {
        format!("diggs_{}", self.file)
    }

    /// `DocumentInformation` element.
    pub fn document_information(&self) -> String {
        format!("di_{}", self.file)
    }

    /// `Project` element.
    pub fn project(&self) -> String {
        format!("pr_{}", self.project)
    }

    /// `Borehole` element.
    pub fn borehole(&self) -> String {
        format!("bh_{}", self.borehole)
    }

    /// Operator `Role` element.
    pub fn role(&self) -> String {
        format!("ro_bh_{}", self.borehole)
    }

    /// Borehole reference point.
    pub fn reference_point(&self) -> String {
        format!("pl_bh_{}", self.borehole)
    }

    /// Borehole center line.
    pub fn center_line(&self) -> String {
        format!("cl_bh_{}", self.borehole)
    }

    /// Linear spatial reference system along the center line.
    pub fn linear_reference(&self) -> String {
        format!("lr_bh_{}", self.borehole)
    }

    /// Linear referencing method of the reference system.
    pub fn linear_reference_method(&self) -> String {
        format!("lrm_bh_{}", self.borehole)
    }

    /// URN identifying the linear reference system.
    pub fn linear_reference_urn(&self) -> String {
        format!("{}{}", LRS_URN_PREFIX, self.linear_reference())
    }

    /// Borehole construction method.
    pub fn construction_method(&self) -> String {
        format!("cm_bh_{}", self.borehole)
    }

    /// Depth interval covered by the construction method.
    pub fn construction_extent(&self) -> String {
        format!("le_{}", self.construction_method())
    }

    /// Drill rig, named after its machine reference.
    pub fn drill_rig(&self, machine_ref: &str) -> String {
        format!("rig_{}", sanitize(machine_ref))
    }

    /// `MeasurementWhileDrilling` element.
    pub fn measurement(&self) -> String {
        format!("mwd_{}", self.file)
    }

    /// `MWDResult` element.
    pub fn result(&self) -> String {
        format!("mwdr_{}", self.file)
    }

    /// Time domain of the result.
    pub fn time_positions(&self) -> String {
        format!("tpl_{}", self.file)
    }

    /// Property parameter block of the result set.
    pub fn parameters(&self) -> String {
        format!("params_{}", self.file)
    }

    /// Property descriptor at a 1-based catalogue index.
    pub fn property(&self, index: usize) -> String {
        format!("prop{}_{}", index, self.file)
    }

    /// `srsName` value pointing at the linear reference system.
    pub fn srs_name(&self) -> String {
        href(&self.linear_reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("BH 01"), "BH_01");
        assert_eq!(sanitize("  North\tPier "), "North_Pier");
        assert_eq!(sanitize("site-4.bor"), "site-4.bor");
        assert_eq!(sanitize("forage/é#2"), "forage___2");
    }

    #[test]
    fn test_ids_are_stable() {
        let a = IdRegistry::new("log 1.bor", "North Pier", "BH 01");
        let b = IdRegistry::new("log 1.bor", "North Pier", "BH 01");
        assert_eq!(a, b);
        assert_eq!(a.project(), "pr_North_Pier");
        assert_eq!(a.borehole(), "bh_BH_01");
        assert_eq!(a.measurement(), "mwd_log_1.bor");
        assert_eq!(a.construction_extent(), "le_cm_bh_BH_01");
        assert_eq!(a.property(3), "prop3_log_1.bor");
    }

    #[test]
    fn test_links_match_definitions() {
        let ids = IdRegistry::new("f", "p", "b");
        assert_eq!(ids.srs_name(), format!("#{}", ids.linear_reference()));
        assert_eq!(href(&ids.center_line()), "#cl_bh_b");
        assert_eq!(
            ids.linear_reference_urn(),
            "urn:x-diggs:def:fi:DIGGSINC:lr_bh_b"
        );
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids = IdRegistry::new("x", "x", "x");
        let all = [
            ids.root(),
            ids.document_information(),
            SOFTWARE_ID.to_string(),
            ids.project(),
            ids.borehole(),
            ids.role(),
            ids.reference_point(),
            ids.center_line(),
            ids.linear_reference(),
            ids.linear_reference_method(),
            ids.construction_method(),
            ids.construction_extent(),
            ids.drill_rig("x"),
            ids.measurement(),
            ids.result(),
            ids.time_positions(),
            ids.parameters(),
            ids.property(1),
        ];
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_namespace_attributes() {
        let attrs: Vec<_> = namespace_attributes().collect();
        assert_eq!(attrs[0], ("xmlns".to_string(), XMLNS_DIGGS));
        assert!(attrs.contains(&("xmlns:glr".to_string(), XMLNS_GLR)));
        assert_eq!(attrs.len(), NAMESPACES.len());
    }
}
