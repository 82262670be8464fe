//! Static reference data used by the mapping.
//!
//! [`CodeTables`] bundles the four dictionaries the converter consults:
//! drilling methods, drilling tools, property classes and unit tokens.
//!
//! The property class and unit tables are the canonical ones. The drilling
//! method and drilling tool tables are placeholder defaults: the codes a BOR
//! log actually carries come from the log reader's own code lists, which are
//! not bundled here. Callers converting real logs should load those lists
//! with [`CodeTables::with_drilling_method`] and
//! [`CodeTables::with_drilling_tool`]; a code missing from the table fails
//! the conversion with [`Error::UnknownDrillingMethod`] or
//! [`Error::UnknownDrillingTool`].

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Property class given to channels absent from the class table.
pub const MISSING_CLASS: &str = "missing";

/// Code space of the MWD property class dictionary.
pub const PROPERTY_CLASS_CODESPACE: &str =
    "http://diggsml.org/def/codes/DIGGS/0.1/mwd_properties.xml";

/// Placeholder drilling method codes to method names.
pub const DRILLING_METHODS: &[(&str, &str)] = &[
    ("AUGER", "Auger drilling"),
    ("CORE", "Core drilling"),
    ("DESTRUCTIVE", "Destructive drilling"),
    ("DTH", "Down-the-hole hammer drilling"),
    ("PERCUSSION", "Percussion drilling"),
    ("ROTARY", "Rotary drilling"),
    ("ROTOPERC", "Rotary percussive drilling"),
    ("SONIC", "Sonic drilling"),
    ("TOPHAMMER", "Top hammer drilling"),
];

/// Placeholder drilling tool codes to tool names.
pub const DRILLING_TOOLS: &[(&str, &str)] = &[
    ("AUGER", "Continuous flight auger"),
    ("BUTTON", "Button bit"),
    ("CORE_BARREL", "Core barrel"),
    ("CROSS", "Cross bit"),
    ("DRAG", "Drag bit"),
    ("HAMMER", "Down-the-hole hammer bit"),
    ("PDC", "PDC bit"),
    ("TRICONE", "Tricone bit"),
];

/// Channel name to MWD property class.
pub const PROPERTY_CLASSES: &[(&str, &str)] = &[
    ("time", "measured_time"),
    ("DEPTH", "measured_depth"),
    ("AS", "penetration_rate"),
    ("RV", "vibration_acceleration"),
    ("EVR", "event_new_rod"),
    ("TP", "hydraulic_crowd_pressure"),
    ("TPAF", "crowd_downward_thrust"),
    ("TQ", "hydraulic_torque_pressure"),
    ("TQAT", "torque"),
    ("HP", "holdback_pressure"),
    ("SP", "hammering_pressure"),
    ("IP", "fluid_injection_pressure"),
    ("IF", "fluid_injection_volume_rate"),
    ("OF", "fluid_return_volume_rate"),
    ("RSP", "rotation_shaft"),
    ("GEAR", "gear_number"),
];

/// Source unit token to the unit token DIGGS recognizes.
///
/// Tokens not listed here are already valid and pass through unchanged.
pub const UNIT_CODES: &[(&str, &str)] = &[
    ("\"", "in"),
    ("deg", "dega"),
    ("inch", "in"),
    ("l/min", "L/min"),
    ("m/h", "m/hr"),
    ("tr/min", "rpm"),
    ("°", "dega"),
];

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The dictionaries consulted while building a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTables {
    drilling_methods: BTreeMap<String, String>,
    drilling_tools: BTreeMap<String, String>,
    property_classes: BTreeMap<String, String>,
    units: BTreeMap<String, String>,
}

impl Default for CodeTables {
    fn default() -> Self {
        Self {
            drilling_methods: table(DRILLING_METHODS),
            drilling_tools: table(DRILLING_TOOLS),
            property_classes: table(PROPERTY_CLASSES),
            units: table(UNIT_CODES),
        }
    }
}

impl CodeTables {
    /// Creates the canonical tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates tables with no entries at all.
    pub fn empty() -> Self {
        Self {
            drilling_methods: BTreeMap::new(),
            drilling_tools: BTreeMap::new(),
            property_classes: BTreeMap::new(),
            units: BTreeMap::new(),
        }
    }

    /// Adds or replaces a drilling method.
    pub fn with_drilling_method(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.drilling_methods.insert(code.into(), name.into());
        self
    }

    /// Adds or replaces a drilling tool.
    pub fn with_drilling_tool(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.drilling_tools.insert(code.into(), name.into());
        self
    }

    /// Adds or replaces a property class.
    pub fn with_property_class(
        mut self,
        channel: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        self.property_classes.insert(channel.into(), class.into());
        self
    }

    /// Adds or replaces a unit normalization.
    pub fn with_unit(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.units.insert(source.into(), target.into());
        self
    }

    /// Looks up a drilling method name.
    pub fn drilling_method(&self, code: &str) -> Result<&str> {
        self.drilling_methods
            .get(code.trim())
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownDrillingMethod(code.to_string()))
    }

    /// Looks up a drilling tool name.
    pub fn drilling_tool(&self, code: &str) -> Result<&str> {
        self.drilling_tools
            .get(code.trim())
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownDrillingTool(code.to_string()))
    }

    /// Property class of a channel, by exact name, or [`MISSING_CLASS`].
    pub fn property_class(&self, channel: &str) -> &str {
        self.property_classes
            .get(channel)
            .map(String::as_str)
            .unwrap_or(MISSING_CLASS)
    }

    /// Returns true if the channel has an entry in the class table.
    pub fn is_classified(&self, channel: &str) -> bool {
        self.property_classes.contains_key(channel)
    }

    /// Maps a source unit token to its DIGGS token.
    pub fn normalize_unit<'a>(&'a self, unit: &'a str) -> &'a str {
        let unit = unit.trim();
        self.units.get(unit).map(String::as_str).unwrap_or(unit)
    }
}
