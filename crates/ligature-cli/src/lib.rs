//! CLI logic for the Ligature layout tool.
//!
//! Reads a TOML graph document, lays it out and writes the layout with its
//! violation list as pretty JSON.

pub mod error_adapter;
pub mod input;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::{info, warn};

use ligature::{LayoutBuilder, LigatureError};

use input::GraphDocument;

/// Run the Ligature CLI application
///
/// # Errors
///
/// Returns `LigatureError` for:
/// - File I/O errors and malformed input documents
/// - Configuration loading errors
/// - Invalid graphs
/// - Layout phase failures
/// - Containment violations when `--strict` is set
pub fn run(args: &Args) -> Result<(), LigatureError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let (graph, names) = GraphDocument::parse(&source)?.into_graph()?;

    let outcome = LayoutBuilder::new(app_config).layout_with_names(&graph, names)?;
    if !outcome.is_compliant() {
        if args.strict {
            let (_, violations) = outcome.into_parts();
            return Err(LigatureError::LayoutNonCompliant { violations });
        }
        warn!(violations = outcome.violations().len(); "Writing non-compliant layout");
    }

    let json = serde_json::to_string_pretty(&outcome).map_err(io::Error::from)?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
