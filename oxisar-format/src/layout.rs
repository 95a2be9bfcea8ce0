//! Bit-packed document layout.
//!
//! This is the plaintext that sits inside the cipher (and, for compressed
//! files, inside the PRS stream):
//!
//! ```text
//! Header (8 bytes)
//!   u32le author id | u8 layer count | u8 height | u8 width | u8 sound
//!
//! Layer (16 bytes, repeated `layer count` times)
//!   4 x (u8 x, u8 y)      topLeft, bottomLeft, topRight, bottomRight
//!   u32le word1           [0:6) r  [6:12) g  [12:18) b  [18:21) a
//!                         [21:31) symbol  bit 31 = hidden
//!   u32le word2           [0:6) x  [6:12) y  [12:18) z  rest zero
//!
//! Name
//!   UTF-16LE code units up to the end of the payload
//! ```
//!
//! Decoding walks the header and layers with the schema interpreter. The
//! packed words go through a custom reader.

use crate::document::{Document, Layer, Point, Position, Size};
use crate::schema::{self, Registry, Schema, Value};
use crate::sound::SoundEffect;
use encoding_rs::UTF_16LE;
use log::trace;
use oxisar_core::error::{Result, SarError};
use oxisar_core::{ByteCursor, Endian};

/// Header size in bytes.
pub const HEADER_SIZE: usize = 8;

/// Size of one layer record in bytes.
pub const LAYER_SIZE: usize = 16;

/// Largest layer count the header byte can hold.
pub const MAX_LAYERS: usize = u8::MAX as usize;

const CHANNEL_MASK: u32 = 0x3F;
const ALPHA_MASK: u32 = 0x07;
const SYMBOL_MASK: u32 = 0x3FF;

const G_SHIFT: u32 = 6;
const B_SHIFT: u32 = 12;
const ALPHA_SHIFT: u32 = 18;
const SYMBOL_SHIFT: u32 = 21;
const HIDDEN_SHIFT: u32 = 31;

fn header_schema() -> Schema {
    Schema::group([
        ("authorId", Schema::primitive("u32le")),
        ("layerCount", Schema::primitive("u8")),
        ("height", Schema::primitive("u8")),
        ("width", Schema::primitive("u8")),
        ("sound", Schema::primitive("u8")),
    ])
}

fn layer_schema() -> Schema {
    let point = || Schema::group([("x", Schema::primitive("u8")), ("y", Schema::primitive("u8"))]);
    Schema::group([
        (
            "points",
            Schema::group([
                ("topLeft", point()),
                ("bottomLeft", point()),
                ("topRight", point()),
                ("bottomRight", point()),
            ]),
        ),
        ("props", Schema::custom(read_props)),
    ])
}

/// Unpack the two property words of a layer.
fn read_props(cursor: &mut ByteCursor, registry: &Registry) -> Result<Value> {
    let word = Schema::primitive("u32le");
    let word1 = schema::parse_with(cursor, &word, registry)?.to_u32()?;
    let word2 = schema::parse_with(cursor, &word, registry)?.to_u32()?;

    let channel = |word: u32, shift: u32| Value::U8(((word >> shift) & CHANNEL_MASK) as u8);
    Ok(Value::Group(vec![
        ("visible".into(), Value::Bool(word1 >> HIDDEN_SHIFT == 0)),
        (
            "symbol".into(),
            Value::U16(((word1 >> SYMBOL_SHIFT) & SYMBOL_MASK) as u16),
        ),
        (
            "a".into(),
            Value::U8(((word1 >> ALPHA_SHIFT) & ALPHA_MASK) as u8),
        ),
        ("r".into(), channel(word1, 0)),
        ("g".into(), channel(word1, G_SHIFT)),
        ("b".into(), channel(word1, B_SHIFT)),
        ("x".into(), channel(word2, 0)),
        ("y".into(), channel(word2, G_SHIFT)),
        ("z".into(), channel(word2, B_SHIFT)),
    ]))
}

fn point_from_value(value: &Value) -> Result<Point> {
    Ok(Point::new(
        value.field("x")?.to_u8()?,
        value.field("y")?.to_u8()?,
    ))
}

fn layer_from_value(value: &Value) -> Result<Layer> {
    let points = value.field("points")?;
    let props = value.field("props")?;
    Ok(Layer {
        symbol: props.field("symbol")?.to_u16()?,
        is_visible: props.field("visible")?.to_bool()?,
        position: Position {
            top_left: point_from_value(points.field("topLeft")?)?,
            bottom_left: point_from_value(points.field("bottomLeft")?)?,
            top_right: point_from_value(points.field("topRight")?)?,
            bottom_right: point_from_value(points.field("bottomRight")?)?,
        },
        r: props.field("r")?.to_u8()?,
        g: props.field("g")?.to_u8()?,
        b: props.field("b")?.to_u8()?,
        a: props.field("a")?.to_u8()?,
        x: props.field("x")?.to_u8()?,
        y: props.field("y")?.to_u8()?,
        z: props.field("z")?.to_u8()?,
    })
}

/// Decode a plaintext payload into a document.
pub fn decode(payload: &[u8]) -> Result<Document> {
    let registry = Registry::builtin();
    let mut cursor = ByteCursor::from_vec(payload.to_vec());

    let header = schema::parse_with(&mut cursor, &header_schema(), &registry)?;
    let layer_count = header.field("layerCount")?.to_u8()?;
    trace!("SAR layout: {layer_count} layers in {} byte payload", payload.len());

    let layer_schema = layer_schema();
    let mut layers = Vec::with_capacity(usize::from(layer_count));
    for _ in 0..layer_count {
        let value = schema::parse_with(&mut cursor, &layer_schema, &registry)?;
        layers.push(layer_from_value(&value)?);
    }

    let name = decode_name(&cursor.as_slice()[cursor.position()..]);

    Ok(Document {
        author_id: header.field("authorId")?.to_u32()?,
        name,
        size: Size {
            height: header.field("height")?.to_u8()?,
            width: header.field("width")?.to_u8()?,
        },
        sound: SoundEffect::from_id(header.field("sound")?.to_u8()?),
        layers,
    })
}

/// Decode UTF-16LE name bytes. An odd trailing byte is dropped.
fn decode_name(bytes: &[u8]) -> String {
    let even = bytes.len() & !1;
    let (name, _) = UTF_16LE.decode_without_bom_handling(&bytes[..even]);
    name.into_owned()
}

/// Pack a layer's properties into its two words.
fn pack_words(layer: &Layer) -> (u32, u32) {
    let mut word1 = u32::from(layer.r) & CHANNEL_MASK;
    word1 |= (u32::from(layer.g) & CHANNEL_MASK) << G_SHIFT;
    word1 |= (u32::from(layer.b) & CHANNEL_MASK) << B_SHIFT;
    word1 |= (u32::from(layer.a) & ALPHA_MASK) << ALPHA_SHIFT;
    word1 |= (u32::from(layer.symbol) & SYMBOL_MASK) << SYMBOL_SHIFT;
    if !layer.is_visible {
        word1 |= 1 << HIDDEN_SHIFT;
    }

    let mut word2 = u32::from(layer.x) & CHANNEL_MASK;
    word2 |= (u32::from(layer.y) & CHANNEL_MASK) << G_SHIFT;
    word2 |= (u32::from(layer.z) & CHANNEL_MASK) << B_SHIFT;

    (word1, word2)
}

fn write_point(cursor: &mut ByteCursor, point: Point) -> Result<()> {
    cursor.write_u8(point.x)?;
    cursor.write_u8(point.y)
}

/// Encode a document into a plaintext payload.
///
/// Packed fields are masked to their widths. Fails if the document has
/// more than [`MAX_LAYERS`] layers.
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    let layer_count = u8::try_from(document.layers.len()).map_err(|_| {
        SarError::format(format!(
            "{} layers exceed the maximum of {MAX_LAYERS}",
            document.layers.len()
        ))
    })?;
    let name: Vec<u16> = document.name.encode_utf16().collect();

    let mut cursor = ByteCursor::with_capacity(
        HEADER_SIZE + LAYER_SIZE * document.layers.len() + 2 * name.len(),
    );
    cursor.write_u32(document.author_id, Endian::Little)?;
    cursor.write_u8(layer_count)?;
    cursor.write_u8(document.size.height)?;
    cursor.write_u8(document.size.width)?;
    cursor.write_u8(document.sound.id())?;

    for layer in &document.layers {
        let position = &layer.position;
        write_point(&mut cursor, position.top_left)?;
        write_point(&mut cursor, position.bottom_left)?;
        write_point(&mut cursor, position.top_right)?;
        write_point(&mut cursor, position.bottom_right)?;

        let (word1, word2) = pack_words(layer);
        cursor.write_u32(word1, Endian::Little)?;
        cursor.write_u32(word2, Endian::Little)?;
    }

    for unit in name {
        cursor.write_u16(unit, Endian::Little)?;
    }

    Ok(cursor.into_inner())
}
