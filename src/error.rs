//! Error types for the decoding session.
//!
//! Every error produced while reading a header or data row latches the
//! session permanently; the same error is returned on every subsequent
//! read until the session is cleared.

use std::fmt;

/// Why a data cell's text was incompatible with its field's semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionKind {
    /// Parsed magnitude exceeds the field's bit width.
    Overflow,
    /// Text is not a numeric literal.
    NotNumeric,
    /// Text is not a boolean literal.
    NotBoolean,
}

impl fmt::Display for CoercionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionKind::Overflow => write!(f, "overflow"),
            CoercionKind::NotNumeric => write!(f, "not numeric"),
            CoercionKind::NotBoolean => write!(f, "not boolean"),
        }
    }
}

/// Error type for header resolution and row decoding
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Header cell does not conform to the qualified-name grammar.
    MalformedHeaderName {
        cell: String,
    },
    /// Header references a component absent from the registry.
    UnknownComponent {
        component: String,
    },
    /// Header references a field absent from the component's layout.
    UnknownField {
        component: String,
        field: String,
    },
    /// Stream ended before any header row was read.
    MissingHeader,
    /// A data cell's text is incompatible with its field's semantic type.
    Coercion {
        component: String,
        field: String,
        kind: CoercionKind,
        cell: String,
    },
    /// The field's semantic type has no cell coercion rule.
    UnsupportedFieldType {
        component: String,
        field: String,
    },
    /// Error reported by the underlying row source, propagated unchanged.
    Source(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedHeaderName { cell } => {
                write!(
                    f,
                    "expected qualified name, e.g. 'MyComponent.MyField'; got {:?}",
                    cell
                )
            }
            DecodeError::UnknownComponent { component } => {
                write!(f, "schema does not have a component {:?}", component)
            }
            DecodeError::UnknownField { component, field } => {
                write!(f, "component {:?} does not have a field {:?}", component, field)
            }
            DecodeError::MissingHeader => {
                write!(f, "failed to read header: stream ended before a header row")
            }
            DecodeError::Coercion {
                component,
                field,
                kind,
                cell,
            } => {
                write!(
                    f,
                    "cannot decode {:?} into {}.{}: {}",
                    cell, component, field, kind
                )
            }
            DecodeError::UnsupportedFieldType { component, field } => {
                write!(f, "field {}.{} has no cell coercion rule", component, field)
            }
            DecodeError::Source(msg) => write!(f, "row source error: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}
