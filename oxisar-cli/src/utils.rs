//! Utility functions for the CLI.

use oxisar_format::Document;
use std::io::Write;
use std::path::Path;

/// Write `bytes` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        }
    }
}

/// One-line description of a document.
pub fn summary(doc: &Document) -> String {
    format!(
        "\"{}\" by {}: {}x{}, {} layers, sound {}",
        doc.name,
        doc.author_id,
        doc.size.width,
        doc.size.height,
        doc.layer_count(),
        doc.sound
    )
}
