//! Record-to-document conversion.
//!
//! [`Converter`] drives the section builders over one record and assembles
//! the root `Diggs` element in schema order:
//! documentInformation, project, samplingFeature, measurement.
//!
//! # Example
//!
//! ```rust
//! use bor2diggs_rs::convert::Converter;
//! use bor2diggs_rs::record::{
//!     BoreholeRecord, Channel, ChannelTable, Description, Drilling, Position,
//! };
//!
//! let description = Description {
//!     filename: "site.bor".to_string(),
//!     project_ref: "P1".to_string(),
//!     borehole_ref: "BH1".to_string(),
//!     creation: "2024-03-05 14:22:10".to_string(),
//!     position: Position::new("45.5", "-93.25", "300"),
//!     drilling: Drilling::with_method("ROTARY"),
//!     ..Default::default()
//! };
//! let record = BoreholeRecord::new(
//!     description,
//!     vec![Channel::with_unit("time", "s"), Channel::with_unit("DEPTH", "m")],
//!     ChannelTable::new(vec![0.0, 1.0], vec![vec![0.0], vec![0.2]]),
//! )
//! .unwrap();
//!
//! let xml = Converter::new().convert_to_string(&record).unwrap();
//! assert!(xml.contains("<MeasurementWhileDrilling"));
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::builders::{ConstructionBuilder, EmissionMode, GeospatialBuilder, MeasurementBuilder};
use crate::codes::CodeTables;
use crate::error::Result;
use crate::format::{format_number, normalize_timestamp};
use crate::ids::{href, namespace_attributes, IdRegistry, SCHEMA_LOCATION, SOFTWARE_ID};
use crate::objects::{DiggsDocument, Element, ROOT_ELEMENT};
use crate::record::{BoreholeRecord, Description};
use crate::units::{LengthUnits, UnitConverter};
use crate::writer::{DiggsWriter, WriterConfig};

/// Name of the producing software.
pub const SOFTWARE_NAME: &str = "bor2diggs";

/// Investigation target of boreholes and measurements.
pub const INVESTIGATION_TARGET: &str = "Natural Ground";

/// Code space of the role dictionary.
pub const ROLE_CODESPACE: &str = "http://diggsml.org/def/codes/DIGGS/0.1/roles.xml";

/// Role performed by the operator.
pub const OPERATOR_ROLE: &str = "Drilling Operator";

/// Conversion settings.
#[derive(Clone)]
pub struct ConvertOptions {
    /// Layout of the time position list
    pub emission_mode: EmissionMode,
    /// Reference dictionaries
    pub code_tables: CodeTables,
    /// Length converter for the total depth
    pub converter: Arc<dyn UnitConverter>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            emission_mode: EmissionMode::default(),
            code_tables: CodeTables::default(),
            converter: Arc::new(LengthUnits),
        }
    }
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("emission_mode", &self.emission_mode)
            .field("code_tables", &self.code_tables)
            .finish_non_exhaustive()
    }
}

impl ConvertOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the emission mode.
    pub fn with_emission_mode(mut self, mode: EmissionMode) -> Self {
        self.emission_mode = mode;
        self
    }

    /// Replaces the reference dictionaries.
    pub fn with_code_tables(mut self, tables: CodeTables) -> Self {
        self.code_tables = tables;
        self
    }

    /// Replaces the length converter.
    pub fn with_converter(mut self, converter: impl UnitConverter + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }
}

/// Converts borehole records to DIGGS documents.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Creates a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with the given options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Builds the document for one record.
    pub fn convert(&self, record: &BoreholeRecord) -> Result<DiggsDocument> {
        record.validate()?;

        let description = &record.description;
        let ids = IdRegistry::from_description(description);
        let codes = &self.options.code_tables;
        let (start_depth, total_depth) = record.depth_range()?;
        let depth_unit = record.depth_channel()?.unit();

        debug!(file = %description.filename, "Building geometry");
        let geometry = GeospatialBuilder::new(&ids, self.options.converter.as_ref()).build(
            &description.position,
            total_depth,
            depth_unit,
        )?;

        debug!(file = %description.filename, "Building construction method");
        let construction = ConstructionBuilder::new(&ids, codes).build(
            &description.drilling,
            start_depth,
            total_depth,
        )?;

        debug!(
            file = %description.filename,
            rows = record.data.len(),
            "Building measurement result"
        );
        let outcome =
            MeasurementBuilder::new(&ids, codes, self.options.emission_mode).build(record);

        let total_depth_element = Element::text_element("totalMeasuredDepth", format_number(total_depth))
            .with_attr("uom", codes.normalize_unit(depth_unit.unwrap_or("m")));

        let borehole = Element::new("Borehole")
            .with_id(ids.borehole())
            .with_child(Element::text_element("gml:name", description.borehole_ref.as_str()))
            .with_child(Element::text_element("investigationTarget", INVESTIGATION_TARGET))
            .with_child(Element::new("projectRef").with_attr("xlink:href", href(&ids.project())))
            .with_optional_child(operator_role(&ids, description))
            .with_children(geometry.into_elements())
            .with_child(total_depth_element)
            .with_child(construction);

        let measurement = Element::new("MeasurementWhileDrilling")
            .with_id(ids.measurement())
            .with_optional_child(description.device_serial().map(|serial| {
                Element::text_element("gml:description", format!("Recorded by device {}", serial))
            }))
            .with_child(Element::text_element(
                "gml:name",
                format!("MWD_{}", description.filename),
            ))
            .with_child(Element::text_element("investigationTarget", INVESTIGATION_TARGET))
            .with_child(Element::new("projectRef").with_attr("xlink:href", href(&ids.project())))
            .with_child(
                Element::new("samplingFeatureRef").with_attr("xlink:href", href(&ids.borehole())),
            )
            .with_child(outcome);

        let root = root_element(&ids)
            .with_child(Element::wrap(
                "documentInformation",
                document_information(&ids, description),
            ))
            .with_child(Element::wrap(
                "project",
                Element::new("Project")
                    .with_id(ids.project())
                    .with_child(Element::text_element("gml:name", description.project_ref.as_str())),
            ))
            .with_child(Element::wrap("samplingFeature", borehole))
            .with_child(Element::wrap("measurement", measurement));

        Ok(DiggsDocument::new(root))
    }

    /// Builds and writes the document for one record with the given writer settings.
    pub fn convert_with_config(&self, record: &BoreholeRecord, config: WriterConfig) -> Result<String> {
        let doc = self.convert(record)?;
        DiggsWriter::with_config(config).write_to_string(&doc)
    }

    /// Builds and writes the document for one record as indented text.
    pub fn convert_to_string(&self, record: &BoreholeRecord) -> Result<String> {
        self.convert_with_config(record, WriterConfig::default())
    }
}

/// Converts a record with default options to indented DIGGS text.
pub fn convert_to_diggs(record: &BoreholeRecord) -> Result<String> {
    Converter::new().convert_to_string(record)
}

fn root_element(ids: &IdRegistry) -> Element {
    namespace_attributes()
        .fold(Element::new(ROOT_ELEMENT), |root, (key, uri)| {
            root.with_attr(key, uri)
        })
        .with_attr("xsi:schemaLocation", SCHEMA_LOCATION)
        .with_id(ids.root())
}

fn document_information(ids: &IdRegistry, description: &Description) -> Element {
    let creation = match normalize_timestamp(&description.creation) {
        Some(ts) => ts,
        None => {
            warn!(creation = %description.creation, "Unrecognized creation timestamp, keeping it as is");
            description.creation.trim().to_string()
        }
    };

    let software = Element::new("SoftwareApplication")
        .with_id(SOFTWARE_ID)
        .with_child(Element::text_element("gml:name", SOFTWARE_NAME))
        .with_child(Element::text_element("version", crate::VERSION));

    Element::new("DocumentInformation")
        .with_id(ids.document_information())
        .with_child(Element::text_element("creationDate", creation))
        .with_child(Element::wrap("sourceSoftware", software))
}

fn operator_role(ids: &IdRegistry, description: &Description) -> Option<Element> {
    let operator = description
        .operator
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())?;

    Some(Element::wrap(
        "role",
        Element::new("Role")
            .with_id(ids.role())
            .with_child(
                Element::text_element("rolePerformed", OPERATOR_ROLE)
                    .with_attr("codeSpace", ROLE_CODESPACE),
            )
            .with_child(Element::text_element("individualName", operator)),
    ))
}
