//! Component layouts and the schema registry.
//!
//! A [`ComponentLayout`] describes one component type: its name and an
//! ordered set of typed fields. A [`SchemaRegistry`] binds component names
//! to layouts so header columns can be resolved against them. Registries
//! can be built from an explicit list of layouts, from a single aggregate
//! layout whose fields enumerate the components, or from a YAML
//! declaration.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::value::SemanticType;

/// Error type for registry construction
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Two registered components derived the same name.
    DuplicateComponent(String),
    /// A schema declaration could not be read or parsed.
    InvalidDeclaration(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateComponent(name) => {
                write!(f, "duplicate component {:?}", name)
            }
            SchemaError::InvalidDeclaration(msg) => {
                write!(f, "invalid schema declaration: {}", msg)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// One field of a component layout: a name and a semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SemanticType,
}

impl FieldLayout {
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The layout of one component type: a name and an ordered field set.
///
/// Immutable once registered for a decoding session. Field lookup is
/// exact-text and case-sensitive, matching the header wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLayout {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldLayout>,
}

impl ComponentLayout {
    /// Create a layout with no fields (a marker component).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, ty: SemanticType) -> Self {
        self.fields.push(FieldLayout::new(name, ty));
        self
    }

    /// Find a field by exact name, returning its index and layout.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldLayout)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name == name)
    }
}

/// A single structural description whose visible fields enumerate the
/// registered components: each entry's name denotes a component name and
/// its field set denotes that component's layout.
#[derive(Debug, Clone, Default)]
pub struct AggregateLayout {
    entries: Vec<(String, Vec<FieldLayout>)>,
}

impl AggregateLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one component entry, builder style.
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        fields: Vec<FieldLayout>,
    ) -> Self {
        self.entries.push((name.into(), fields));
        self
    }
}

/// Registry binding component names to field layouts.
///
/// Iteration order is registration order. Layouts are immutable once
/// registered; a decoding session borrows the registry for its lifetime.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    components: IndexMap<String, Arc<ComponentLayout>>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component layout.
    ///
    /// # Errors
    /// Returns `DuplicateComponent` if a layout with the same name is
    /// already registered; collisions are never resolved by overwriting.
    pub fn register(&mut self, layout: ComponentLayout) -> Result<(), SchemaError> {
        if self.components.contains_key(&layout.name) {
            return Err(SchemaError::DuplicateComponent(layout.name));
        }
        self.components
            .insert(layout.name.clone(), Arc::new(layout));
        Ok(())
    }

    /// Build a registry from an explicit list of component layouts.
    pub fn from_components(
        layouts: impl IntoIterator<Item = ComponentLayout>,
    ) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for layout in layouts {
            registry.register(layout)?;
        }
        Ok(registry)
    }

    /// Build a registry by flattening an aggregate layout's visible fields
    /// into the same name-to-layout index as [`Self::from_components`].
    pub fn from_aggregate(aggregate: AggregateLayout) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for (name, fields) in aggregate.entries {
            registry.register(ComponentLayout { name, fields })?;
        }
        Ok(registry)
    }

    /// Parse a YAML schema declaration.
    ///
    /// The declaration is a `components` list, each entry a component name
    /// with its typed fields:
    ///
    /// ```yaml
    /// components:
    ///   - name: Character
    ///     fields:
    ///       - name: Name
    ///         type: string
    ///       - name: Level
    ///         type: i32
    /// ```
    pub fn from_yaml_str(declaration: &str) -> Result<Self, SchemaError> {
        let decl: SchemaDecl = serde_yaml::from_str(declaration)
            .map_err(|e| SchemaError::InvalidDeclaration(format!("failed to parse YAML: {}", e)))?;
        Self::from_components(decl.components)
    }

    /// Load a YAML schema declaration from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SchemaError::InvalidDeclaration(format!(
                "failed to read schema file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Get a component layout by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ComponentLayout>> {
        self.components.get(name)
    }

    /// Check if a component is registered.
    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All registered component names, in registration order.
    pub fn component_names(&self) -> Vec<&String> {
        self.components.keys().collect()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Resolve a parsed header name against the registry.
    ///
    /// Returns the component's layout and, when a field name is given, the
    /// field's index and semantic type.
    ///
    /// # Errors
    /// * `UnknownComponent` - the component is not registered
    /// * `UnknownField` - the field is not in the component's layout
    pub fn resolve(
        &self,
        component: &str,
        field: Option<&str>,
    ) -> Result<(&Arc<ComponentLayout>, Option<(usize, SemanticType)>), DecodeError> {
        let layout = self
            .components
            .get(component)
            .ok_or_else(|| DecodeError::UnknownComponent {
                component: component.to_string(),
            })?;

        let resolved_field = match field {
            Some(name) => {
                let (index, field_layout) =
                    layout
                        .field(name)
                        .ok_or_else(|| DecodeError::UnknownField {
                            component: component.to_string(),
                            field: name.to_string(),
                        })?;
                Some((index, field_layout.ty))
            }
            None => None,
        };

        Ok((layout, resolved_field))
    }
}

/// Wrapper for the YAML declaration structure.
#[derive(Debug, Deserialize)]
struct SchemaDecl {
    components: Vec<ComponentLayout>,
}
