//! Decode command implementation.

use crate::utils::{summary, write_output};
use oxisar_format::container;
use std::path::Path;

pub fn cmd_decode(
    file: &Path,
    output: Option<&Path>,
    pretty: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    let doc = container::decode(&bytes)?;

    let mut json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    json.push('\n');
    write_output(output, json.as_bytes())?;

    if verbose {
        eprintln!("Decoded {}", summary(&doc));
        if let Some(path) = output {
            eprintln!("Wrote {}", path.display());
        }
    }

    Ok(())
}
