//! CLI logic for the Impress layout tool.
//!
//! Documents are read as JSON trees, run through the directive and layout
//! passes, and written back as JSON into the output directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use impress::{ImpressError, PresentationBuilder, node::Document};

/// Run the Impress CLI application
///
/// Every input is processed in order with one shared build state, so
/// document-wide options registered for a source persist across inputs of
/// the same source until a reset.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ImpressError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Unresolvable positioning functions
/// - Rejected directives in strict mode
pub fn run(args: &Args) -> Result<(), ImpressError> {
    info!(
        inputs = args.inputs.len(),
        output_dir = args.output_dir;
        "Processing documents"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let mut builder = PresentationBuilder::new(app_config);
    let mut state = builder.build_state();
    if args.reset {
        state.signal_mut().request();
    }

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    for input in &args.inputs {
        let source = fs::read_to_string(input)?;
        let mut document: Document =
            serde_json::from_str(&source).map_err(|err| ImpressError::Document(Box::new(err)))?;

        let report = builder.process(&mut state, &mut document)?;
        for diagnostic in report.directives.diagnostics() {
            warn!("{diagnostic}");
        }
        debug!(
            input = input,
            slides = report.layout.slides,
            positioned = report.layout.positioned;
            "Document laid out"
        );

        let output = output_path(output_dir, input);
        let json = serde_json::to_string_pretty(&document)
            .map_err(|err| ImpressError::Document(Box::new(err)))?;
        fs::write(&output, json)?;
        info!(output_file = output.display().to_string(); "Document written");
    }

    if args.relocate_private {
        let moved = builder.finish(output_dir)?;
        info!(count = moved.len(); "Relocated private folders");
    }

    Ok(())
}

/// `<output_dir>/<input stem>.json`
fn output_path(output_dir: &Path, input: &str) -> PathBuf {
    let stem = Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}.json"))
}
