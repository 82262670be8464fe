//! Borehole geometry: reference point, center line and linear referencing.

use tracing::warn;

use crate::error::{Error, Result};
use crate::format::format_coordinates;
use crate::ids::{href, IdRegistry};
use crate::objects::Element;
use crate::record::Position;
use crate::units::UnitConverter;

/// Position text used when the header coordinates do not parse.
pub const DEFAULT_POSITION: &str = "0.000000 0.000000 0.000000";

const SRS_DIMENSION: &str = "3";
const UOM_LABELS: &str = "dega dega m";
const AXIS_LABELS: &str = "latitude longitude height";

/// Collar coordinates in decimal degrees and meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// Altitude
    pub altitude: f64,
}

impl Coordinates {
    /// Parses the header position; `None` if any field is not a finite number.
    pub fn parse(position: &Position) -> Option<Self> {
        let parse = |raw: &str| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        Some(Self {
            latitude: parse(&position.latitude.value)?,
            longitude: parse(&position.longitude.value)?,
            altitude: parse(&position.altitude.value)?,
        })
    }

    /// `gml:pos` text of the collar.
    pub fn surface_text(&self) -> String {
        format_coordinates(&[self.latitude, self.longitude, self.altitude])
    }

    /// `gml:posList` text from the collar down to `depth_m` meters below it.
    pub fn center_line_text(&self, depth_m: f64) -> String {
        format_coordinates(&[
            self.latitude,
            self.longitude,
            self.altitude,
            self.latitude,
            self.longitude,
            self.altitude - depth_m,
        ])
    }
}

/// The three geometry properties of a borehole, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    /// `referencePoint` property
    pub reference_point: Element,
    /// `centerLine` property
    pub center_line: Element,
    /// `linearReferencing` property
    pub linear_referencing: Element,
}

impl Geometry {
    /// The properties in the order they appear in a `Borehole`.
    pub fn into_elements(self) -> [Element; 3] {
        [
            self.reference_point,
            self.center_line,
            self.linear_referencing,
        ]
    }
}

/// Builds the borehole geometry.
pub struct GeospatialBuilder<'a> {
    ids: &'a IdRegistry,
    converter: &'a dyn UnitConverter,
}

impl<'a> GeospatialBuilder<'a> {
    /// Creates a builder.
    pub fn new(ids: &'a IdRegistry, converter: &'a dyn UnitConverter) -> Self {
        Self { ids, converter }
    }

    /// Builds the geometry for a borehole of `total_depth` in `depth_unit`
    /// (meters when `None`).
    ///
    /// The depth unit only matters when the coordinates parse; with the
    /// default position an unknown unit is not an error.
    pub fn build(
        &self,
        position: &Position,
        total_depth: f64,
        depth_unit: Option<&str>,
    ) -> Result<Geometry> {
        let (pos, pos_list) = match Coordinates::parse(position) {
            Some(coords) => {
                let depth_m = self.depth_in_meters(total_depth, depth_unit)?;
                (coords.surface_text(), coords.center_line_text(depth_m))
            }
            None => {
                warn!(
                    latitude = %position.latitude.value,
                    longitude = %position.longitude.value,
                    altitude = %position.altitude.value,
                    "Invalid coordinate data in header, using default position"
                );
                (
                    DEFAULT_POSITION.to_string(),
                    format!("{} {}", DEFAULT_POSITION, DEFAULT_POSITION),
                )
            }
        };

        Ok(Geometry {
            reference_point: self.reference_point(pos),
            center_line: self.center_line(pos_list),
            linear_referencing: self.linear_referencing(),
        })
    }

    fn depth_in_meters(&self, total_depth: f64, depth_unit: Option<&str>) -> Result<f64> {
        let unit = depth_unit.unwrap_or("m");
        self.converter
            .to_meters(total_depth, unit)
            .ok_or_else(|| Error::UnsupportedUnit {
                field: "DEPTH".to_string(),
                unit: unit.to_string(),
            })
    }

    fn positioned(name: &str, text: String) -> Element {
        Element::new(name)
            .with_attr("srsDimension", SRS_DIMENSION)
            .with_attr("uomLabels", UOM_LABELS)
            .with_attr("axisLabels", AXIS_LABELS)
            .with_text(text)
    }

    fn reference_point(&self, pos: String) -> Element {
        Element::wrap(
            "referencePoint",
            Element::new("PointLocation")
                .with_id(self.ids.reference_point())
                .with_child(Self::positioned("gml:pos", pos)),
        )
    }

    fn center_line(&self, pos_list: String) -> Element {
        Element::wrap(
            "centerLine",
            Element::new("LinearExtent")
                .with_id(self.ids.center_line())
                .with_child(Self::positioned("gml:posList", pos_list)),
        )
    }

    fn linear_referencing(&self) -> Element {
        let method = Element::new("glr:LinearReferencingMethod")
            .with_id(self.ids.linear_reference_method())
            .with_child(Element::text_element("glr:name", "chainage"))
            .with_child(Element::text_element("glr:type", "absolute"))
            .with_child(Element::text_element("glr:units", "m"));

        Element::wrap(
            "linearReferencing",
            Element::new("LinearSpatialReferenceSystem")
                .with_id(self.ids.linear_reference())
                .with_child(
                    Element::text_element("gml:identifier", self.ids.linear_reference_urn())
                        .with_attr("codeSpace", "DIGGS"),
                )
                .with_child(
                    Element::new("glr:linearElement")
                        .with_attr("xlink:href", href(&self.ids.center_line())),
                )
                .with_child(Element::wrap("glr:lrm", method)),
        )
    }
}
