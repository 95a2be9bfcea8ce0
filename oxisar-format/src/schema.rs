//! Declarative schema interpreter.
//!
//! A [`Schema`] describes how to pull a structured [`Value`] out of a
//! [`ByteCursor`]. It is one of three things:
//!
//! - a type name, resolved through a [`Registry`];
//! - an ordered group of named fields, read one after another;
//! - a custom reader function that gets the cursor and the registry.
//!
//! Custom readers may call [`parse_with`] again. Those nested parses
//! continue the depth count of the reader that started them, so a reader
//! that resolves back to itself fails like any other alias cycle.
//!
//! The built-in registry knows fourteen primitive names. Multi-byte names
//! without a suffix are big-endian; the `le` suffix selects little-endian.
//!
//! | Name    | Value      | Name     | Value      |
//! |---------|------------|----------|------------|
//! | `u8`    | `U8`       | `i8`     | `I8`       |
//! | `u16`   | `U16`      | `i16`    | `I16`      |
//! | `u32`   | `U32`      | `i32`    | `I32`      |
//! | `u16le` | `U16`      | `i16le`  | `I16`      |
//! | `u32le` | `U32`      | `i32le`  | `I32`      |
//! | `f32`   | `F32`      | `f64`    | `F64`      |
//! | `f32le` | `F32`      | `f64le`  | `F64`      |
//!
//! ## Example
//!
//! ```rust
//! use oxisar_format::schema::{self, Registry, Schema, Value};
//!
//! let point = Schema::group([("x", Schema::primitive("u8")), ("y", Schema::primitive("u8"))]);
//! let value = schema::parse(&[3, 4], &point, &Registry::new()).unwrap();
//! assert_eq!(value.field("y").unwrap(), &Value::U8(4));
//! ```

use oxisar_core::error::{Result, SarError};
use oxisar_core::{ByteCursor, Endian};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;

/// Maximum resolution depth through aliases and custom readers.
const MAX_ALIAS_DEPTH: usize = 32;

thread_local! {
    /// Depth at which the innermost running custom reader was entered.
    static READER_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Restores the outer reader depth when a custom reader returns.
struct DepthGuard(usize);

impl DepthGuard {
    fn enter(depth: usize) -> Self {
        Self(READER_DEPTH.replace(depth))
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        READER_DEPTH.set(self.0);
    }
}

/// A custom reader.
pub type Reader = fn(&mut ByteCursor, &Registry) -> Result<Value>;

/// A schema node.
#[derive(Clone)]
pub enum Schema {
    /// A type name looked up in the active registry.
    Primitive(String),
    /// Named fields parsed in declaration order.
    Group(Vec<(String, Schema)>),
    /// A reader function.
    Custom(Reader),
}

impl Schema {
    /// A type-name node.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// A group node from `(field, schema)` pairs.
    pub fn group<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::Group(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    /// A custom reader node.
    pub fn custom(reader: Reader) -> Self {
        Self::Custom(reader)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.debug_tuple("Primitive").field(name).finish(),
            Self::Group(fields) => f
                .debug_map()
                .entries(fields.iter().map(|(k, v)| (k, v)))
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned 8-bit.
    U8(u8),
    /// Unsigned 16-bit.
    U16(u16),
    /// Unsigned 32-bit.
    U32(u32),
    /// Signed 8-bit.
    I8(i8),
    /// Signed 16-bit.
    I16(i16),
    /// Signed 32-bit.
    I32(i32),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Flag, produced by custom readers.
    Bool(bool),
    /// Fields in schema order.
    Group(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Group(_) => "group",
        }
    }

    /// Look up a field of a group value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Self::Group(fields) => fields
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Like [`Value::get`], but a missing field is an error.
    pub fn field(&self, field: &str) -> Result<&Value> {
        self.get(field)
            .ok_or_else(|| SarError::schema_mismatch(format!("field '{field}'"), self.kind()))
    }

    /// Any unsigned integer, widened.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            _ => None,
        }
    }

    /// Any integer, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            _ => self.as_u64().map(|v| v as i64),
        }
    }

    /// Any number, converted to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v.into()),
            Self::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// The flag value of a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Unsigned value that fits in a `u8`.
    pub fn to_u8(&self) -> Result<u8> {
        self.unsigned("u8")
    }

    /// Unsigned value that fits in a `u16`.
    pub fn to_u16(&self) -> Result<u16> {
        self.unsigned("u16")
    }

    /// Unsigned value that fits in a `u32`.
    pub fn to_u32(&self) -> Result<u32> {
        self.unsigned("u32")
    }

    /// Flag value.
    pub fn to_bool(&self) -> Result<bool> {
        self.as_bool()
            .ok_or_else(|| SarError::schema_mismatch("bool", self.kind()))
    }

    fn unsigned<T: TryFrom<u64>>(&self, expected: &str) -> Result<T> {
        self.as_u64()
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| SarError::schema_mismatch(expected, self.kind()))
    }
}

/// Name to schema table used to resolve [`Schema::Primitive`] nodes.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Schema>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fourteen primitive readers.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, reader) in BUILTIN_READERS {
            registry.insert(*name, Schema::Custom(*reader));
        }
        registry
    }

    /// Add or replace an entry, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.entries.insert(name.into(), schema)
    }

    /// Builder form of [`Registry::insert`].
    pub fn with(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.insert(name, schema);
        self
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.entries.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Combine with `overrides`. Entries in `overrides` win.
    pub fn merged(mut self, overrides: &Registry) -> Self {
        for (name, schema) in &overrides.entries {
            self.entries.insert(name.clone(), schema.clone());
        }
        self
    }
}

macro_rules! endian_readers {
    ($($fn_name:ident => $read:ident, $endian:expr, $variant:ident;)*) => {
        $(
            fn $fn_name(cursor: &mut ByteCursor, _: &Registry) -> Result<Value> {
                cursor.$read($endian).map(Value::$variant)
            }
        )*
    };
}

fn read_u8(cursor: &mut ByteCursor, _: &Registry) -> Result<Value> {
    cursor.read_u8().map(Value::U8)
}

fn read_i8(cursor: &mut ByteCursor, _: &Registry) -> Result<Value> {
    cursor.read_i8().map(Value::I8)
}

endian_readers! {
    read_u16_be => read_u16, Endian::Big, U16;
    read_u32_be => read_u32, Endian::Big, U32;
    read_u16_le => read_u16, Endian::Little, U16;
    read_u32_le => read_u32, Endian::Little, U32;
    read_i16_be => read_i16, Endian::Big, I16;
    read_i32_be => read_i32, Endian::Big, I32;
    read_i16_le => read_i16, Endian::Little, I16;
    read_i32_le => read_i32, Endian::Little, I32;
    read_f32_be => read_f32, Endian::Big, F32;
    read_f64_be => read_f64, Endian::Big, F64;
    read_f32_le => read_f32, Endian::Little, F32;
    read_f64_le => read_f64, Endian::Little, F64;
}

const BUILTIN_READERS: &[(&str, Reader)] = &[
    ("u8", read_u8),
    ("u16", read_u16_be),
    ("u32", read_u32_be),
    ("u16le", read_u16_le),
    ("u32le", read_u32_le),
    ("i8", read_i8),
    ("i16", read_i16_be),
    ("i32", read_i32_be),
    ("i16le", read_i16_le),
    ("i32le", read_i32_le),
    ("f32", read_f32_be),
    ("f64", read_f64_be),
    ("f32le", read_f32_le),
    ("f64le", read_f64_le),
];

/// Parse `bytes` with the built-in registry merged with `overrides`.
pub fn parse(bytes: &[u8], schema: &Schema, overrides: &Registry) -> Result<Value> {
    let registry = Registry::builtin().merged(overrides);
    let mut cursor = ByteCursor::from_vec(bytes.to_vec());
    parse_with(&mut cursor, schema, &registry)
}

/// Parse from the cursor's current position with an explicit registry.
///
/// Called from inside a custom reader, resolution starts at that reader's
/// depth rather than at zero.
pub fn parse_with(cursor: &mut ByteCursor, schema: &Schema, registry: &Registry) -> Result<Value> {
    resolve(cursor, schema, registry, READER_DEPTH.get())
}

fn resolve(
    cursor: &mut ByteCursor,
    schema: &Schema,
    registry: &Registry,
    depth: usize,
) -> Result<Value> {
    match schema {
        Schema::Primitive(name) => {
            if depth >= MAX_ALIAS_DEPTH {
                return Err(SarError::schema_mismatch(
                    "a reader",
                    format!("alias cycle through '{name}'"),
                ));
            }
            let target = registry
                .get(name)
                .ok_or_else(|| SarError::unknown_schema_type(name.as_str()))?;
            resolve(cursor, target, registry, depth + 1)
        }
        Schema::Group(fields) => {
            let mut values = Vec::with_capacity(fields.len());
            for (name, field) in fields {
                values.push((name.clone(), resolve(cursor, field, registry, depth)?));
            }
            Ok(Value::Group(values))
        }
        Schema::Custom(reader) => {
            if depth >= MAX_ALIAS_DEPTH {
                return Err(SarError::schema_mismatch(
                    "a reader",
                    "custom readers nested too deeply",
                ));
            }
            let _guard = DepthGuard::enter(depth + 1);
            reader(cursor, registry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_primitive(name: &str, bytes: &[u8]) -> Value {
        parse(bytes, &Schema::primitive(name), &Registry::new()).unwrap()
    }

    #[test]
    fn test_unsigned_primitives() {
        assert_eq!(parse_primitive("u8", &[4]), Value::U8(4));
        assert_eq!(parse_primitive("u16", &[0, 4]), Value::U16(4));
        assert_eq!(parse_primitive("u32", &[0, 0, 0, 4]), Value::U32(4));
        assert_eq!(parse_primitive("u16le", &[4, 0]), Value::U16(4));
        assert_eq!(parse_primitive("u32le", &[4, 0, 0, 0]), Value::U32(4));
        assert_eq!(parse_primitive("u16", &[0x12, 0x34]), Value::U16(0x1234));
    }

    #[test]
    fn test_signed_primitives() {
        assert_eq!(parse_primitive("i8", &[255]), Value::I8(-1));
        assert_eq!(parse_primitive("i8", &[128]), Value::I8(-128));
        assert_eq!(parse_primitive("i8", &[127]), Value::I8(127));
        assert_eq!(parse_primitive("i16", &[255, 254]), Value::I16(-2));
        assert_eq!(parse_primitive("i32", &[255, 255, 255, 254]), Value::I32(-2));
        assert_eq!(parse_primitive("i16le", &[254, 255]), Value::I16(-2));
        assert_eq!(parse_primitive("i32le", &[254, 255, 255, 255]), Value::I32(-2));
    }

    #[test]
    fn test_float_primitives() {
        let close = |value: Value| (value.as_f64().unwrap() - 4.1).abs() < 1e-6;
        assert!(close(parse_primitive("f32", &[64, 131, 51, 51])));
        assert!(close(parse_primitive("f32le", &[51, 51, 131, 64])));
        assert!(close(parse_primitive("f64", &[64, 16, 102, 102, 102, 102, 102, 102])));
        assert!(close(parse_primitive("f64le", &[102, 102, 102, 102, 102, 102, 16, 64])));
    }

    #[test]
    fn test_builtin_has_fourteen_readers() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 14);
        assert!(registry.contains("f64le"));
        assert!(!registry.contains("u64"));
    }

    #[test]
    fn test_nested_groups() {
        let schema = Schema::group([
            ("val", Schema::group([("val2", Schema::primitive("i8"))])),
            ("val2", Schema::primitive("i8")),
        ]);
        let value = parse(&[4, 255], &schema, &Registry::new()).unwrap();
        assert_eq!(
            value,
            Value::Group(vec![
                (
                    "val".to_string(),
                    Value::Group(vec![("val2".to_string(), Value::I8(4))])
                ),
                ("val2".to_string(), Value::I8(-1)),
            ])
        );
    }

    #[test]
    fn test_group_preserves_declared_order() {
        let schema = Schema::group([
            ("z", Schema::primitive("u8")),
            ("a", Schema::primitive("u8")),
        ]);
        let value = parse(&[1, 2], &schema, &Registry::new()).unwrap();
        match value {
            Value::Group(fields) => {
                let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, ["z", "a"]);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_reader_sees_registry() {
        fn pair(cursor: &mut ByteCursor, registry: &Registry) -> Result<Value> {
            let first = parse_with(cursor, &Schema::primitive("u8"), registry)?;
            let second = parse_with(cursor, &Schema::primitive("u8"), registry)?;
            Ok(Value::U16(u16::from(first.to_u8()?) + u16::from(second.to_u8()?)))
        }
        let value = parse(&[3, 4], &Schema::custom(pair), &Registry::new()).unwrap();
        assert_eq!(value, Value::U16(7));
    }

    #[test]
    fn test_named_alias_and_override() {
        let overrides = Registry::new()
            .with(
                "point",
                Schema::group([("x", Schema::primitive("u8")), ("y", Schema::primitive("u8"))]),
            )
            .with("u16", Schema::primitive("u16le"));
        let schema = Schema::group([
            ("p", Schema::primitive("point")),
            ("n", Schema::primitive("u16")),
        ]);
        let value = parse(&[1, 2, 0x34, 0x12], &schema, &overrides).unwrap();
        assert_eq!(value.field("p").unwrap().field("x").unwrap(), &Value::U8(1));
        assert_eq!(value.field("n").unwrap(), &Value::U16(0x1234));
    }

    #[test]
    fn test_unknown_type() {
        let err = parse(&[0], &Schema::primitive("u24"), &Registry::new()).unwrap_err();
        assert_eq!(err, SarError::unknown_schema_type("u24"));
    }

    #[test]
    fn test_alias_cycle_is_error() {
        let overrides = Registry::new().with("a", Schema::primitive("a"));
        let err = parse(&[0], &Schema::primitive("a"), &overrides).unwrap_err();
        assert!(matches!(err, SarError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_reentrant_reader_cycle_is_error() {
        fn recurse(cursor: &mut ByteCursor, registry: &Registry) -> Result<Value> {
            parse_with(cursor, &Schema::primitive("loop"), registry)
        }
        let overrides = Registry::new().with("loop", Schema::custom(recurse));
        let err = parse(&[0], &Schema::primitive("loop"), &overrides).unwrap_err();
        assert!(matches!(err, SarError::SchemaMismatch { .. }));

        assert_eq!(READER_DEPTH.get(), 0);
        let value = parse(&[5], &Schema::primitive("u8"), &Registry::new()).unwrap();
        assert_eq!(value, Value::U8(5));
    }

    #[test]
    fn test_underrun() {
        assert!(parse(&[], &Schema::primitive("u8"), &Registry::new())
            .unwrap_err()
            .is_out_of_range());
        assert!(parse(&[1], &Schema::primitive("u32"), &Registry::new())
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::U16(200).to_u8().unwrap(), 200);
        assert!(Value::U16(300).to_u8().is_err());
        assert!(Value::I8(1).to_u8().is_err());
        assert!(Value::Bool(true).to_bool().unwrap());
        assert_eq!(Value::I16(-2).as_i64(), Some(-2));
        assert_eq!(
            Value::U8(1).field("x").unwrap_err().to_string(),
            "Schema mismatch: expected field 'x', found u8"
        );
    }
}
