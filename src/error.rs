//! Error types for the bor2diggs library.

use thiserror::Error;

/// Errors that can occur while converting a borehole record to DIGGS.
#[derive(Error, Debug)]
pub enum Error {
    /// XML writing or parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A channel the mapping depends on is not declared in the metadata
    #[error("Missing channel: {0}")]
    MissingChannel(String),

    /// The channel table has no rows
    #[error("Channel table is empty")]
    EmptyTable,

    /// A data row does not hold one value per declared channel
    #[error("Row {row} has {found} values, expected {expected} (one per channel)")]
    ColumnCountMismatch {
        /// Zero-based row position
        row: usize,
        /// Number of non-index channels in the metadata
        expected: usize,
        /// Number of values found in the row
        found: usize,
    },

    /// The index and the row list disagree in length
    #[error("Index has {index} values but table has {rows} rows")]
    RowCountMismatch {
        /// Length of the index sequence
        index: usize,
        /// Number of data rows
        rows: usize,
    },

    /// A value the mapping needs is present but unusable
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Record field carrying the value
        field: String,
        /// The offending value as text
        value: String,
    },

    /// Drilling method code not present in the method table
    #[error("Unknown drilling method code: {0}")]
    UnknownDrillingMethod(String),

    /// Drilling tool code not present in the tool table
    #[error("Unknown drilling tool code: {0}")]
    UnknownDrillingTool(String),

    /// Length unit the unit converter cannot express in meters
    #[error("Unsupported length unit for {field}: {unit}")]
    UnsupportedUnit {
        /// Record field carrying the unit
        field: String,
        /// The unit token as found in the record
        unit: String,
    },

    /// The same identifier is defined twice in one document
    #[error("Duplicate element identifier: {0}")]
    DuplicateId(String),

    /// A reference does not resolve to an identifier defined earlier
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    /// Property, time and data block counts disagree
    #[error("Cardinality mismatch: {0}")]
    CardinalityMismatch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// JSON record decoding error
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for bor2diggs operations.
pub type Result<T> = std::result::Result<T, Error>;
