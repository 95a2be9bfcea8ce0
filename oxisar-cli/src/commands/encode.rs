//! Encode command implementation.

use crate::utils::summary;
use oxisar_format::{Document, container};
use std::path::Path;

pub fn cmd_encode(
    input: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(input)?;
    let doc: Document = serde_json::from_str(&json)?;

    let bytes = container::encode(&doc)?;
    std::fs::write(output, &bytes)?;

    if verbose {
        eprintln!("Encoded {}", summary(&doc));
        eprintln!("Wrote {} ({} bytes)", output.display(), bytes.len());
    }

    Ok(())
}
