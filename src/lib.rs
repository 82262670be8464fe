//! Borehole drilling logs to DIGGS for Rust.
//!
//! This crate converts a parsed borehole drilling log (BOR record) into a
//! DIGGS 2.6 "Measurement While Drilling" XML document: borehole geometry and
//! linear referencing, construction method, and the channel time series as a
//! property catalogue plus a bulk data block.
//!
//! # Features
//!
//! - **Typed record**: [`BoreholeRecord`] validated once at ingestion.
//! - **Converter**: deterministic record-to-document mapping with injectable
//!   code tables and unit converter.
//! - **Writer**: indented or compact XML output through `quick-xml`.
//! - **Inspector**: structural self-check of generated documents.
//! - **Serde Support**: JSON record ingestion with the `serde` feature.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bor2diggs_rs::{BoreholeRecord, Converter};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! # #[cfg(feature = "serde")]
//! # fn main() -> bor2diggs_rs::Result<()> {
//! let file = File::open("borehole.json")?;
//! let record = BoreholeRecord::from_json_reader(BufReader::new(file))?;
//!
//! let xml = Converter::new().convert_to_string(&record)?;
//! println!("{}", xml);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
//!
//! # Module Structure
//!
//! - [`record`] - Borehole record types
//! - [`ids`] - Identifiers and namespace bindings
//! - [`codes`] - Reference dictionaries
//! - [`builders`] - Geometry, construction and measurement sections
//! - [`convert`] - Document assembly
//! - [`writer`] - XML serialization
//! - [`inspect`] - Structural inspection of generated text
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization and JSON record ingestion
//! - `cli` - Build the `bor2diggs` command line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod builders;
pub mod codes;
pub mod convert;
pub mod error;
pub mod format;
pub mod ids;
pub mod inspect;
pub mod objects;
pub mod record;
pub mod units;
pub mod writer;

// Re-export commonly used types at the crate root
pub use builders::EmissionMode;
pub use codes::CodeTables;
pub use convert::{convert_to_diggs, ConvertOptions, Converter};
pub use error::{Error, Result};
pub use inspect::{inspect_str, DocumentSummary};
pub use objects::{DiggsDocument, Element};
pub use record::{BoreholeRecord, Channel, ChannelTable, Description};
pub use units::{LengthUnits, UnitConverter};
pub use writer::{DiggsWriter, WriterConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
