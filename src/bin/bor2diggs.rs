//! bor2diggs - Convert a borehole drilling log to a DIGGS MWD document.
//!
//! This tool reads a parsed BOR record (JSON with `description`, `metadata`
//! and `data` sections) and writes the corresponding DIGGS 2.6
//! "Measurement While Drilling" XML document.
//!
//! # Usage
//!
//! ```bash
//! bor2diggs [OPTIONS] <INPUT>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Convert to stdout
//! bor2diggs borehole.json > borehole.diggs.xml
//!
//! # Write to a file and check identifiers and cardinalities
//! bor2diggs --check -o borehole.diggs.xml borehole.json
//!
//! # Five time values per line, as older consumers expect
//! bor2diggs --legacy borehole.json
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;

use bor2diggs_rs::{
    inspect_str, BoreholeRecord, ConvertOptions, Converter, EmissionMode, WriterConfig,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a borehole drilling log to a DIGGS MWD document.
#[derive(Parser, Debug)]
#[command(name = "bor2diggs")]
#[command(version = VERSION)]
#[command(about = "Convert a borehole drilling log to a DIGGS MWD document")]
#[command(long_about = "Reads a parsed BOR record as JSON and writes a DIGGS 2.6 \
    Measurement While Drilling document with borehole geometry, construction \
    method and the recorded channel time series.")]
struct Args {
    /// Parsed BOR record (JSON)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Wrap time values five per line
    #[arg(long)]
    legacy: bool,

    /// Output compact XML (no indentation)
    #[arg(long)]
    compact: bool,

    /// Re-read the output and check identifiers, references and cardinalities
    #[arg(long)]
    check: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    debug!(input = %args.input.display(), "reading record");
    let file = File::open(&args.input)?;
    let record = BoreholeRecord::from_json_reader(BufReader::new(file))?;

    let mode = if args.legacy {
        EmissionMode::Legacy
    } else {
        EmissionMode::Current
    };
    let converter = Converter::with_options(ConvertOptions::new().with_emission_mode(mode));

    let config = if args.compact {
        WriterConfig::compact()
    } else {
        WriterConfig::default()
    };
    let xml = converter.convert_with_config(&record, config)?;

    if args.check {
        let summary = inspect_str(&xml)?;
        summary.check()?;
        debug!(
            ids = summary.ids.len(),
            references = summary.references.len(),
            rows = summary.row_widths.len(),
            "document checked"
        );
    }

    match args.output {
        Some(ref path) => {
            let mut out = BufWriter::new(File::create(path)?);
            out.write_all(xml.as_bytes())?;
            out.flush()?;
            info!(
                output = %path.display(),
                rows = record.data.len(),
                "wrote DIGGS document"
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(xml.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}
