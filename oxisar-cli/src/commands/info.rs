//! Info command implementation.

use oxisar_core::SarError;
use oxisar_format::{Document, SarFlag, container, layout};
use serde::Serialize;
use std::path::Path;

/// JSON output of `info --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoOutput<'a> {
    file: String,
    file_size: usize,
    compressed: bool,
    payload_size: usize,
    author_id: u32,
    name: &'a str,
    width: u8,
    height: u8,
    sound: String,
    layers: usize,
    hidden_layers: usize,
}

pub fn cmd_info(file: &Path, verbose: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    if !container::is_sar(&bytes) {
        let message = format!("{} is not a Symbol Art file", file.display());
        return Err(SarError::format(message).into());
    }

    let (header, payload) = container::decode_payload(&bytes)?;
    let doc = layout::decode(&payload)?;
    let hidden = doc.layers.iter().filter(|layer| !layer.is_visible).count();

    if json {
        let output = InfoOutput {
            file: file.display().to_string(),
            file_size: bytes.len(),
            compressed: header.flag.is_compressed(),
            payload_size: payload.len(),
            author_id: doc.author_id,
            name: &doc.name,
            width: doc.size.width,
            height: doc.size.height,
            sound: doc.sound.to_string(),
            layers: doc.layer_count(),
            hidden_layers: hidden,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Symbol Art Information");
    println!("======================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", bytes.len());
    println!(
        "Storage: {}",
        match header.flag {
            SarFlag::Stored => "stored",
            SarFlag::Compressed => "compressed (PRS)",
        }
    );
    println!("Payload: {} bytes", payload.len());

    println!();
    println!("Document:");
    println!("  Author: {}", doc.author_id);
    println!("  Name: {}", doc.name);
    println!("  Canvas: {}x{}", doc.size.width, doc.size.height);
    println!("  Sound: {}", doc.sound);
    println!("  Layers: {} ({} hidden)", doc.layer_count(), hidden);

    if verbose {
        print_layers(&doc);
    }

    Ok(())
}

fn print_layers(doc: &Document) {
    println!();
    println!(
        "{:>4}  {:>6}  {:>3}  {:>8}  {:>1}  {:>8}  Corners (TL BL TR BR)",
        "#", "Symbol", "Vis", "RGB", "A", "XYZ"
    );
    println!("{}", "-".repeat(72));
    for (index, layer) in doc.layers.iter().enumerate() {
        let p = &layer.position;
        println!(
            "{:>4}  {:>6}  {:>3}  {:>2},{:>2},{:>2}  {:>1}  {:>2},{:>2},{:>2}  ({},{}) ({},{}) ({},{}) ({},{})",
            index,
            layer.symbol,
            if layer.is_visible { "yes" } else { "no" },
            layer.r,
            layer.g,
            layer.b,
            layer.a,
            layer.x,
            layer.y,
            layer.z,
            p.top_left.x,
            p.top_left.y,
            p.bottom_left.x,
            p.bottom_left.y,
            p.top_right.x,
            p.top_right.y,
            p.bottom_right.x,
            p.bottom_right.y,
        );
    }
}
