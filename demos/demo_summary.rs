//! demo_summary - Summarize the structure of a DIGGS MWD document.
//!
//! This demo reads a DIGGS file and reports its identifiers, local references,
//! property catalogue and data block dimensions, then runs the structural
//! check used by `bor2diggs --check`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_summary <filename.xml>
//! ```

use std::env;
use std::fs::File;
use std::io::BufReader;

use bor2diggs_rs::inspect::inspect;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <filename.xml>", args[0]);
        std::process::exit(1);
    }

    let file = File::open(&args[1])?;
    let summary = inspect(BufReader::new(file))?;

    println!("{:>12}  {}", "Root", summary.root.as_deref().unwrap_or("(none)"));
    println!("{:>12}  {}", "Identifiers", summary.ids.len());
    println!("{:>12}  {}", "References", summary.references.len());
    println!("{:>12}  {}", "Time values", summary.time_values);
    println!("{:>12}  {}", "Data rows", summary.row_widths.len());
    println!();

    println!("{:>6}  {}", "Index", "Property");
    for (i, name) in summary.property_names.iter().enumerate() {
        println!("{:>6}  {}", i + 1, name);
    }
    println!();

    for reference in summary.unresolved() {
        println!(
            "unresolved: <{} {}=\"#{}\">",
            reference.element, reference.attribute, reference.target
        );
    }

    match summary.check() {
        Ok(()) => println!("check: ok"),
        Err(e) => println!("check: {}", e),
    }

    Ok(())
}
