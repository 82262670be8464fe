//! Typed borehole record (BOR) as handed over by a log reader.
//!
//! The record has three facets:
//! - [`Description`] - project, borehole, position and drilling metadata
//! - [`Channel`] list - per-channel metadata, in column order
//! - [`ChannelTable`] - the index sequence and one row of values per index
//!
//! A [`BoreholeRecord`] is validated once when it is built; the mapping code
//! downstream relies on the checked shape instead of probing fields.

use crate::error::{Error, Result};

/// Name of the channel holding the measured depth.
pub const DEPTH_CHANNEL: &str = "DEPTH";

/// Name of the channel that indexes the table, when present.
pub const TIME_CHANNEL: &str = "time";

/// Unit placeholder meaning "no unit".
pub const NO_UNIT: &str = "-";

/// A value as written in the log header, with its optional unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    /// Raw value text
    pub value: String,
    /// Unit token as written in the source
    #[cfg_attr(feature = "serde", serde(rename = "@unit", default))]
    pub unit: Option<String>,
}

impl Measure {
    /// Creates a measure without a unit.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: None,
        }
    }

    /// Creates a measure with a unit.
    pub fn with_unit(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: Some(unit.into()),
        }
    }
}

/// Borehole collar position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Latitude in decimal degrees
    pub latitude: Measure,
    /// Longitude in decimal degrees
    pub longitude: Measure,
    /// Altitude in meters
    pub altitude: Measure,
}

impl Position {
    /// Creates a position from raw latitude, longitude and altitude text.
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        altitude: impl Into<String>,
    ) -> Self {
        Self {
            latitude: Measure::new(latitude),
            longitude: Measure::new(longitude),
            altitude: Measure::new(altitude),
        }
    }
}

/// How the borehole was drilled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drilling {
    /// Drilling method code
    pub method: String,
    /// Drill rig reference
    #[cfg_attr(feature = "serde", serde(default))]
    pub machine_ref: Option<String>,
    /// Cutting tool code
    #[cfg_attr(feature = "serde", serde(default))]
    pub tool: Option<String>,
    /// Outer diameter of the cutting tool
    #[cfg_attr(feature = "serde", serde(default))]
    pub tool_diameter: Option<Measure>,
}

impl Drilling {
    /// Creates a drilling description with only a method code.
    pub fn with_method(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }
}

/// Recording device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    /// Device serial number
    #[cfg_attr(feature = "serde", serde(default))]
    pub serial: Option<String>,
}

/// Header metadata of a borehole log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Description {
    /// Source file name
    pub filename: String,
    /// Project reference
    pub project_ref: String,
    /// Borehole reference
    pub borehole_ref: String,
    /// Creation timestamp as written in the log
    pub creation: String,
    /// Collar position
    pub position: Position,
    /// Drilling method, rig and tool
    pub drilling: Drilling,
    /// Recording device
    #[cfg_attr(feature = "serde", serde(default))]
    pub device: Option<Device>,
    /// Drill operator
    #[cfg_attr(feature = "serde", serde(default))]
    pub operator: Option<String>,
}

impl Description {
    /// Serial number of the recording device, if any.
    pub fn device_serial(&self) -> Option<&str> {
        self.device
            .as_ref()
            .and_then(|d| d.serial.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    fn check_required(&self) -> Result<()> {
        let required = [
            ("description.filename", &self.filename),
            ("description.project_ref", &self.project_ref),
            ("description.borehole_ref", &self.borehole_ref),
            ("description.creation", &self.creation),
            ("description.drilling.method", &self.drilling.method),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::MissingField(field.to_string()));
            }
        }
        Ok(())
    }
}

/// Metadata of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    /// Channel name as written in the log
    pub name: String,
    /// Unit token; `None` or `"-"` means the channel is unitless
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: Option<String>,
}

impl Channel {
    /// Creates a unitless channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
        }
    }

    /// Creates a channel with a unit.
    pub fn with_unit(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
        }
    }

    /// Returns the declared unit, treating `"-"` and blanks as absent.
    pub fn unit(&self) -> Option<&str> {
        self.unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty() && *u != NO_UNIT)
    }

    /// Returns true if this channel indexes the table.
    pub fn is_index(&self) -> bool {
        self.name == TIME_CHANNEL
    }
}

/// Channel values: an index sequence and one row per index value.
///
/// Each row holds one value per non-index channel, in metadata order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelTable {
    /// Index values (time in seconds, or depth)
    pub index: Vec<f64>,
    /// Data rows
    pub rows: Vec<Vec<f64>>,
}

impl ChannelTable {
    /// Creates a table from an index and its rows.
    pub fn new(index: Vec<f64>, rows: Vec<Vec<f64>>) -> Self {
        Self { index, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over one column.
    pub fn column(&self, position: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(position).copied())
    }
}

/// A complete, validated borehole record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoreholeRecord {
    /// Header metadata
    pub description: Description,
    /// Channel metadata in column order
    pub metadata: Vec<Channel>,
    /// Channel values
    pub data: ChannelTable,
}

impl BoreholeRecord {
    /// Builds a record and validates its shape.
    pub fn new(description: Description, metadata: Vec<Channel>, data: ChannelTable) -> Result<Self> {
        let record = Self {
            description,
            metadata,
            data,
        };
        record.validate()?;
        Ok(record)
    }

    /// Decodes a record from the JSON dump of a log reader.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Decodes a record from a JSON reader.
    #[cfg(feature = "serde")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let record: Self = serde_json::from_reader(reader)?;
        record.validate()?;
        Ok(record)
    }

    /// Checks required fields and the metadata/table correspondence.
    pub fn validate(&self) -> Result<()> {
        self.description.check_required()?;

        if self.depth_position().is_none() {
            return Err(Error::MissingChannel(DEPTH_CHANNEL.to_string()));
        }

        if self.data.is_empty() {
            return Err(Error::EmptyTable);
        }

        if self.data.index.len() != self.data.rows.len() {
            return Err(Error::RowCountMismatch {
                index: self.data.index.len(),
                rows: self.data.rows.len(),
            });
        }

        if let Some((position, value)) = self
            .data
            .index
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(Error::InvalidValue {
                field: format!("data.index[{}]", position),
                value: value.to_string(),
            });
        }

        let expected = self.value_channels().count();
        if let Some((row, values)) = self
            .data
            .rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != expected)
        {
            return Err(Error::ColumnCountMismatch {
                row,
                expected,
                found: values.len(),
            });
        }

        Ok(())
    }

    /// The channel indexing the table, if declared.
    pub fn index_channel(&self) -> Option<&Channel> {
        self.metadata.iter().find(|c| c.is_index())
    }

    /// Channels carrying values, in column order.
    pub fn value_channels(&self) -> impl Iterator<Item = &Channel> {
        self.metadata.iter().filter(|c| !c.is_index())
    }

    /// Column position of a value channel.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.value_channels().position(|c| c.name == name)
    }

    fn depth_position(&self) -> Option<usize> {
        self.column_position(DEPTH_CHANNEL)
    }

    /// The `DEPTH` channel.
    pub fn depth_channel(&self) -> Result<&Channel> {
        self.value_channels()
            .find(|c| c.name == DEPTH_CHANNEL)
            .ok_or_else(|| Error::MissingChannel(DEPTH_CHANNEL.to_string()))
    }

    /// First and last `DEPTH` values: start depth and total measured depth.
    pub fn depth_range(&self) -> Result<(f64, f64)> {
        let position = self
            .depth_position()
            .ok_or_else(|| Error::MissingChannel(DEPTH_CHANNEL.to_string()))?;
        let mut depths = self.data.column(position);
        let start = depths.next().ok_or(Error::EmptyTable)?;
        let end = depths.last().unwrap_or(start);

        for (label, value) in [("start", start), ("total", end)] {
            if !value.is_finite() {
                return Err(Error::InvalidValue {
                    field: format!("{} {} depth", DEPTH_CHANNEL, label),
                    value: value.to_string(),
                });
            }
        }
        Ok((start, end))
    }
}
