//! Dump command implementation.

use crate::utils::write_output;
use oxisar_format::container;
use std::path::Path;

pub fn cmd_dump(file: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    let (_, payload) = container::decode_payload(&bytes)?;
    write_output(output, &payload)?;
    Ok(())
}
