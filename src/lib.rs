//! # Rowdemux: Component Decoding for Delimited Tables
//!
//! Rowdemux decodes delimited tabular text into multiple typed "component"
//! records per row. A single header row declares, per column, which
//! component type and which field of that type the column feeds, so one
//! flat table can interleave several logically distinct record types
//! column-wise.
//!
//! ## Features
//!
//! - **Qualified headers**: `Component.Field` column names scatter a
//!   component's fields across the table; bare `Component` marker columns
//!   declare a component with no field drilldown
//! - **Schema registry**: component layouts registered from an explicit
//!   list, an aggregate layout, or a YAML declaration
//! - **Typed coercion**: integer widths with overflow checking, floats,
//!   strings, booleans; empty cells default, they never error
//! - **Multi-table streams**: clearing a session resumes parsing at the
//!   next embedded header row
//!
//! ## Example
//!
//! ```
//! use rowdemux::{
//!     ComponentLayout, ComponentReader, CsvRowSource, SchemaRegistry, SemanticType,
//! };
//!
//! let data = "\
//! Character.Name,Character.Class,Attributes.HP,Attributes.Damage
//! Alex,Fighter,100,10
//! Jayden,Wizard,90,20
//! ";
//!
//! let registry = SchemaRegistry::from_components(vec![
//!     ComponentLayout::new("Character")
//!         .with_field("Name", SemanticType::Str)
//!         .with_field("Class", SemanticType::Str),
//!     ComponentLayout::new("Attributes")
//!         .with_field("HP", SemanticType::I32)
//!         .with_field("Damage", SemanticType::I32),
//! ])
//! .unwrap();
//!
//! let mut reader = ComponentReader::new(CsvRowSource::new(data.as_bytes()), &registry);
//!
//! while let Some(components) = reader.read().unwrap() {
//!     println!("{} {}", components[0].to_json().unwrap(), components[1].to_json().unwrap());
//! }
//! ```

// Core modules
pub mod component;
pub mod error;
pub mod reader;
pub mod schema;
pub mod source;
pub mod value;

// Internal decoding engine
mod descriptor;
mod header;

// Re-export key types
pub use component::ComponentValue;
pub use error::{CoercionKind, DecodeError};
pub use reader::ComponentReader;
pub use schema::{AggregateLayout, ComponentLayout, FieldLayout, SchemaError, SchemaRegistry};
pub use source::{CsvRowSource, RowSource, VecRowSource};
pub use value::{CoerceFailure, FieldValue, SemanticType};
