//! Symbol Art document model.
//!
//! These types are what [`crate::decode`] produces and [`crate::encode`]
//! consumes. They serialize to the camelCase JSON shape used by Symbol
//! Art editors:
//!
//! ```json
//! {
//!   "authorId": 10285603,
//!   "name": "AAAA",
//!   "size": { "height": 128, "width": 193 },
//!   "sound": "Joy",
//!   "layers": [
//!     {
//!       "symbol": 240,
//!       "isVisible": true,
//!       "position": {
//!         "topLeft": { "x": 112, "y": 112 },
//!         "bottomLeft": { "x": 112, "y": 144 },
//!         "topRight": { "x": 144, "y": 112 },
//!         "bottomRight": { "x": 144, "y": 144 }
//!       },
//!       "r": 0, "g": 0, "b": 0, "a": 7, "x": 0, "y": 32, "z": 7
//!     }
//!   ]
//! }
//! ```
//!
//! Field widths are not enforced here. Values wider than their packed
//! width are truncated when the document is encoded.

use crate::sound::SoundEffect;
use serde::{Deserialize, Serialize};

/// A complete Symbol Art.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Account id of the author.
    pub author_id: u32,
    /// Display name.
    pub name: String,
    /// Canvas size.
    pub size: Size,
    /// Sound effect.
    #[serde(default)]
    pub sound: SoundEffect,
    /// Layers, bottom-most first.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Document {
    /// Create an empty document with a zero canvas and no sound.
    pub fn new(author_id: u32, name: impl Into<String>) -> Self {
        Self {
            author_id,
            name: name.into(),
            size: Size::default(),
            sound: SoundEffect::None,
            layers: Vec::new(),
        }
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Height.
    pub height: u8,
    /// Width.
    pub width: u8,
}

/// One corner of a layer quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: u8,
    /// Vertical coordinate.
    pub y: u8,
}

impl Point {
    /// Create a point.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// The four corners of a layer, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Top-left corner.
    pub top_left: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
}

/// A single symbol layer.
///
/// Color channels `r`, `g`, `b` and the extra channels `x`, `y`, `z` are
/// 6 bits wide, `a` is 3 bits and `symbol` is 10 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layer {
    /// Symbol id.
    pub symbol: u16,
    /// Whether the layer is drawn.
    pub is_visible: bool,
    /// Corner positions.
    pub position: Position,
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
    /// Extra channel X.
    pub x: u8,
    /// Extra channel Y.
    pub y: u8,
    /// Extra channel Z.
    pub z: u8,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            symbol: 0,
            is_visible: true,
            position: Position::default(),
            r: 0,
            g: 0,
            b: 0,
            a: 0,
            x: 0,
            y: 0,
            z: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new(42, "test");
        assert_eq!(doc.author_id, 42);
        assert_eq!(doc.name, "test");
        assert_eq!(doc.size, Size::default());
        assert_eq!(doc.sound, SoundEffect::None);
        assert_eq!(doc.layer_count(), 0);
    }

    #[test]
    fn test_default_layer_is_visible() {
        let layer = Layer::default();
        assert!(layer.is_visible);
        assert_eq!(layer.symbol, 0);
        assert_eq!(layer.position.bottom_right, Point::new(0, 0));
    }
}
