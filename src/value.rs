//! Semantic field types and decoded field values.
//!
//! A [`SemanticType`] names the wire-level type of one component field; a
//! [`FieldValue`] holds one decoded cell. Integer values are stored in the
//! widest lane of their signedness, with the declaring field's semantic
//! type governing range checks during coercion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoercionKind;

/// The semantic type of a component field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    #[serde(rename = "string")]
    Str,
    /// Canonical `true`/`false` literals only.
    Bool,
    /// Repeated values. Layouts may declare list fields for interop with
    /// other tooling, but rows carry scalar cells: a non-empty cell aimed
    /// at a list field fails with an unsupported-type error.
    List,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::I8 => "i8",
            SemanticType::I16 => "i16",
            SemanticType::I32 => "i32",
            SemanticType::I64 => "i64",
            SemanticType::U8 => "u8",
            SemanticType::U16 => "u16",
            SemanticType::U32 => "u32",
            SemanticType::U64 => "u64",
            SemanticType::F32 => "f32",
            SemanticType::F64 => "f64",
            SemanticType::Str => "string",
            SemanticType::Bool => "bool",
            SemanticType::List => "list",
        };
        write!(f, "{}", name)
    }
}

/// Represents one decoded field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bool(bool),
    List(Vec<FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float32(fl) => write!(f, "{}", fl),
            FieldValue::Float64(fl) => write!(f, "{}", fl),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::List(l) => write!(f, "{:?}", l),
        }
    }
}

/// Why a cell could not be coerced into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceFailure {
    /// The text is incompatible with the field's semantic type.
    Coercion(CoercionKind),
    /// The semantic type defines no cell coercion rule.
    UnsupportedType,
}

impl FieldValue {
    /// The zero value for a semantic type. Slots are reset to these
    /// defaults before every row, so an omitted cell never retains a
    /// previous row's value.
    pub fn default_for(ty: SemanticType) -> FieldValue {
        match ty {
            SemanticType::I8 | SemanticType::I16 | SemanticType::I32 | SemanticType::I64 => {
                FieldValue::Int(0)
            }
            SemanticType::U8 | SemanticType::U16 | SemanticType::U32 | SemanticType::U64 => {
                FieldValue::UInt(0)
            }
            SemanticType::F32 => FieldValue::Float32(0.0),
            SemanticType::F64 => FieldValue::Float64(0.0),
            SemanticType::Str => FieldValue::Str(String::new()),
            SemanticType::Bool => FieldValue::Bool(false),
            SemanticType::List => FieldValue::List(Vec::new()),
        }
    }

    /// Coerces non-empty cell text into a value of the given semantic type.
    ///
    /// Integers accept decimal literals only; the parsed magnitude must fit
    /// the declared bit width. Floats use the Rust float literal grammar.
    /// Strings are taken verbatim, without trimming. Booleans accept the
    /// canonical `true`/`false` literals.
    pub fn coerce(ty: SemanticType, cell: &str) -> Result<FieldValue, CoerceFailure> {
        let value = match ty {
            SemanticType::I8 => {
                FieldValue::Int(parse_signed(cell, i8::MIN as i128, i8::MAX as i128)?)
            }
            SemanticType::I16 => {
                FieldValue::Int(parse_signed(cell, i16::MIN as i128, i16::MAX as i128)?)
            }
            SemanticType::I32 => {
                FieldValue::Int(parse_signed(cell, i32::MIN as i128, i32::MAX as i128)?)
            }
            SemanticType::I64 => {
                FieldValue::Int(parse_signed(cell, i64::MIN as i128, i64::MAX as i128)?)
            }
            SemanticType::U8 => FieldValue::UInt(parse_unsigned(cell, u8::MAX as u128)?),
            SemanticType::U16 => FieldValue::UInt(parse_unsigned(cell, u16::MAX as u128)?),
            SemanticType::U32 => FieldValue::UInt(parse_unsigned(cell, u32::MAX as u128)?),
            SemanticType::U64 => FieldValue::UInt(parse_unsigned(cell, u64::MAX as u128)?),
            SemanticType::F32 => cell
                .parse::<f32>()
                .map(FieldValue::Float32)
                .map_err(|_| CoerceFailure::Coercion(CoercionKind::NotNumeric))?,
            SemanticType::F64 => cell
                .parse::<f64>()
                .map(FieldValue::Float64)
                .map_err(|_| CoerceFailure::Coercion(CoercionKind::NotNumeric))?,
            SemanticType::Str => FieldValue::Str(cell.to_string()),
            SemanticType::Bool => cell
                .parse::<bool>()
                .map(FieldValue::Bool)
                .map_err(|_| CoerceFailure::Coercion(CoercionKind::NotBoolean))?,
            SemanticType::List => return Err(CoerceFailure::UnsupportedType),
        };
        Ok(value)
    }
}

fn parse_signed(cell: &str, min: i128, max: i128) -> Result<i64, CoerceFailure> {
    match cell.parse::<i128>() {
        Ok(v) if v >= min && v <= max => Ok(v as i64),
        Ok(_) => Err(CoerceFailure::Coercion(CoercionKind::Overflow)),
        // An integer-shaped literal that i128 itself rejects is out of range.
        Err(_) if is_integer_literal(cell) => Err(CoerceFailure::Coercion(CoercionKind::Overflow)),
        Err(_) => Err(CoerceFailure::Coercion(CoercionKind::NotNumeric)),
    }
}

fn parse_unsigned(cell: &str, max: u128) -> Result<u64, CoerceFailure> {
    match cell.parse::<u128>() {
        Ok(v) if v <= max => Ok(v as u64),
        Ok(_) => Err(CoerceFailure::Coercion(CoercionKind::Overflow)),
        // Negative or beyond-u128 literals are out of range, not malformed.
        Err(_) if is_integer_literal(cell) => Err(CoerceFailure::Coercion(CoercionKind::Overflow)),
        Err(_) => Err(CoerceFailure::Coercion(CoercionKind::NotNumeric)),
    }
}

/// Whether the text matches the decimal integer literal grammar: an
/// optional sign followed by one or more ASCII digits.
fn is_integer_literal(cell: &str) -> bool {
    let digits = cell.strip_prefix(['+', '-']).unwrap_or(cell);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
