//! MWD result: time domain, property catalogue and data block.
//!
//! The catalogue, the data block columns and the record metadata share one
//! ordering. Nothing in the data block names its column, so position is the
//! only link between a value and its property.

use tracing::debug;

use crate::codes::{CodeTables, PROPERTY_CLASS_CODESPACE};
use crate::format::{format_data_value, format_number, wrap_values};
use crate::ids::IdRegistry;
use crate::objects::Element;
use crate::record::{BoreholeRecord, Channel, ChannelTable};

/// Declared type of every property value.
pub const PROPERTY_TYPE: &str = "double";

/// Unit of the time domain values.
pub const TIME_UNIT: &str = "second";

/// Layout of the time position list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionMode {
    /// Twelve values per line
    #[default]
    Current,
    /// Five values per line, as older converters wrote it
    Legacy,
}

impl EmissionMode {
    /// Number of time values per line.
    pub fn values_per_line(&self) -> usize {
        match self {
            EmissionMode::Current => 12,
            EmissionMode::Legacy => 5,
        }
    }
}

/// Builds the `outcome` of a `MeasurementWhileDrilling`.
pub struct MeasurementBuilder<'a> {
    ids: &'a IdRegistry,
    codes: &'a CodeTables,
    mode: EmissionMode,
}

impl<'a> MeasurementBuilder<'a> {
    /// Creates a builder.
    pub fn new(ids: &'a IdRegistry, codes: &'a CodeTables, mode: EmissionMode) -> Self {
        Self { ids, codes, mode }
    }

    /// Builds `outcome/MWDResult` for a validated record.
    pub fn build(&self, record: &BoreholeRecord) -> Element {
        let result_set = Element::new("ResultSet")
            .with_child(self.property_catalogue(record.value_channels()))
            .with_child(self.data_block(&record.data));

        let result = Element::new("MWDResult")
            .with_id(self.ids.result())
            .with_child(self.time_domain(&record.data.index))
            .with_child(Element::wrap("results", result_set));

        Element::wrap("outcome", result)
    }

    /// Builds the `timeDomain` property from the index values.
    pub fn time_domain(&self, index: &[f64]) -> Element {
        let values: Vec<String> = index.iter().map(|t| format_number(*t)).collect();
        let lines = wrap_values(&values, self.mode.values_per_line());

        Element::wrap(
            "timeDomain",
            Element::new("TimePositionList")
                .with_id(self.ids.time_positions())
                .with_attr("unit", TIME_UNIT)
                .with_child(Element::new("timePositionList").with_lines(lines)),
        )
    }

    /// Builds the `parameters` property: one `Property` per channel, in order.
    pub fn property_catalogue<'c>(&self, channels: impl Iterator<Item = &'c Channel>) -> Element {
        let properties = channels
            .enumerate()
            .map(|(position, channel)| self.property(position + 1, channel));

        Element::wrap(
            "parameters",
            Element::new("PropertyParameters")
                .with_id(self.ids.parameters())
                .with_child(Element::new("properties").with_children(properties)),
        )
    }

    fn property(&self, index: usize, channel: &Channel) -> Element {
        if !self.codes.is_classified(&channel.name) {
            debug!(channel = %channel.name, "Unclassified channel");
        }

        let unit = channel
            .unit()
            .map(|u| Element::text_element("uom", self.codes.normalize_unit(u)));

        Element::new("Property")
            .with_id(self.ids.property(index))
            .with_attr("index", index.to_string())
            .with_child(Element::text_element("propertyName", channel.name.as_str()))
            .with_child(Element::text_element("typeData", PROPERTY_TYPE))
            .with_child(
                Element::text_element("propertyClass", self.codes.property_class(&channel.name))
                    .with_attr("codeSpace", PROPERTY_CLASS_CODESPACE),
            )
            .with_optional_child(unit)
    }

    /// Builds the `dataValues` block.
    ///
    /// Values are comma separated, rows space separated, without a header.
    /// Missing values are written as `NaN`, so every row keeps its width.
    pub fn data_block(&self, table: &ChannelTable) -> Element {
        let rows: Vec<String> = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| format_data_value(*v))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();

        Element::new("dataValues")
            .with_attr("cs", ",")
            .with_attr("ts", " ")
            .with_attr("decimal", ".")
            .with_text(rows.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Text;
    use crate::record::tests::sample_record;

    fn ids() -> IdRegistry {
        IdRegistry::new("log.bor", "P1", "BH1")
    }

    #[test]
    fn test_time_domain_wrapping() {
        let ids = ids();
        let codes = CodeTables::new();
        let index: Vec<f64> = (0..14).map(|i| i as f64 * 0.5).collect();

        let current = MeasurementBuilder::new(&ids, &codes, EmissionMode::Current).time_domain(&index);
        let list = current.find("TimePositionList/timePositionList").unwrap();
        match list.raw_text() {
            Some(Text::Lines(lines)) => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0], "0 0.5 1 1.5 2 2.5 3 3.5 4 4.5 5 5.5");
                assert_eq!(lines[1], "6 6.5");
            }
            other => panic!("unexpected text: {:?}", other),
        }

        let legacy = MeasurementBuilder::new(&ids, &codes, EmissionMode::Legacy).time_domain(&index);
        let list = legacy.find("TimePositionList/timePositionList").unwrap();
        match list.raw_text() {
            Some(Text::Lines(lines)) => assert_eq!(lines.len(), 3),
            other => panic!("unexpected text: {:?}", other),
        }

        let tpl = current.child("TimePositionList").unwrap();
        assert_eq!(tpl.attr("unit"), Some("second"));
        assert_eq!(tpl.id(), Some("tpl_log.bor"));
    }

    #[test]
    fn test_property_catalogue_order_and_fields() {
        let ids = ids();
        let codes = CodeTables::new();
        let record = sample_record();
        let params = MeasurementBuilder::new(&ids, &codes, EmissionMode::Current)
            .property_catalogue(record.value_channels());

        let properties = params.find("PropertyParameters/properties").unwrap();
        let names: Vec<_> = properties
            .children()
            .iter()
            .filter_map(|p| p.child("propertyName").and_then(|n| n.text()))
            .map(|n| n.into_owned())
            .collect();
        assert_eq!(names, vec!["DEPTH", "AS", "XYZ"]);

        let first = &properties.children()[0];
        assert_eq!(first.attr("index"), Some("1"));
        assert_eq!(first.id(), Some("prop1_log.bor"));
        assert_eq!(
            first.child("propertyClass").and_then(|e| e.text()).as_deref(),
            Some("measured_depth")
        );
        assert_eq!(
            first.child("typeData").and_then(|e| e.text()).as_deref(),
            Some("double")
        );

        let rate = &properties.children()[1];
        assert_eq!(rate.attr("index"), Some("2"));
        assert_eq!(
            rate.child("uom").and_then(|e| e.text()).as_deref(),
            Some("m/hr")
        );

        let unknown = &properties.children()[2];
        assert_eq!(
            unknown.child("propertyClass").and_then(|e| e.text()).as_deref(),
            Some("missing")
        );
        assert!(unknown.child("uom").is_none());
    }

    #[test]
    fn test_data_block() {
        let ids = ids();
        let codes = CodeTables::new();
        let table = ChannelTable::new(
            vec![0.0, 1.0],
            vec![vec![0.0, 12.0, 1.25], vec![0.5, f64::NAN, 2.0]],
        );
        let block = MeasurementBuilder::new(&ids, &codes, EmissionMode::Current).data_block(&table);

        assert_eq!(block.attr("cs"), Some(","));
        assert_eq!(block.attr("ts"), Some(" "));
        assert_eq!(block.attr("decimal"), Some("."));
        assert_eq!(block.text().as_deref(), Some("0,12,1.25 0.5,NaN,2"));
    }

    #[test]
    fn test_build_result() {
        let ids = ids();
        let codes = CodeTables::new();
        let record = sample_record();
        let outcome = MeasurementBuilder::new(&ids, &codes, EmissionMode::Current).build(&record);

        let result = outcome.child("MWDResult").unwrap();
        assert_eq!(result.id(), Some("mwdr_log.bor"));
        let names: Vec<_> = result.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["timeDomain", "results"]);
        assert!(result
            .find("results/ResultSet/parameters/PropertyParameters")
            .is_some());
        assert!(result.find("results/ResultSet/dataValues").is_some());
    }
}
