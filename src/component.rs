//! Decoded component instances.
//!
//! A [`ComponentValue`] is one decoded instance of a component type: its
//! layout plus one [`FieldValue`] per layout field. Inside a session it is
//! the reused decode target for a result slot; the values handed back to
//! callers are deep-copied snapshots of these, safe to retain across
//! subsequent reads.

use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::ComponentLayout;
use crate::value::FieldValue;

/// One decoded instance of a component type.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentValue {
    layout: Arc<ComponentLayout>,
    fields: Vec<FieldValue>,
}

impl ComponentValue {
    /// Creates an instance with every field at its type's default value.
    pub(crate) fn new(layout: Arc<ComponentLayout>) -> Self {
        let fields = layout
            .fields
            .iter()
            .map(|field| FieldValue::default_for(field.ty))
            .collect();
        Self { layout, fields }
    }

    /// The component type's name.
    pub fn name(&self) -> &str {
        &self.layout.name
    }

    /// The component type's layout.
    pub fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    /// Get a field value by exact field name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.layout
            .field(field)
            .map(|(index, _)| &self.fields[index])
    }

    /// Get a field value by its position in the layout.
    pub fn field_at(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index)
    }

    pub(crate) fn set_at(&mut self, index: usize, value: FieldValue) {
        self.fields[index] = value;
    }

    /// Return every field to its type's default value.
    pub(crate) fn reset(&mut self) {
        for (field, layout) in self.fields.iter_mut().zip(&self.layout.fields) {
            *field = FieldValue::default_for(layout.ty);
        }
    }

    /// Convert to a dictionary representation
    pub fn to_dict(&self) -> HashMap<String, FieldValue> {
        self.layout
            .fields
            .iter()
            .zip(&self.fields)
            .map(|(layout, value)| (layout.name.clone(), value.clone()))
            .collect()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Convert to pretty-printed JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Serializes as a field-name to field-value map, in layout order.
impl Serialize for ComponentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (layout, value) in self.layout.fields.iter().zip(&self.fields) {
            map.serialize_entry(&layout.name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SemanticType;

    fn attributes() -> Arc<ComponentLayout> {
        Arc::new(
            ComponentLayout::new("Attributes")
                .with_field("HP", SemanticType::I32)
                .with_field("Damage", SemanticType::I32)
                .with_field("Label", SemanticType::Str),
        )
    }

    #[test]
    fn test_new_instance_has_defaults() {
        let value = ComponentValue::new(attributes());

        assert_eq!(value.name(), "Attributes");
        assert_eq!(value.get("HP"), Some(&FieldValue::Int(0)));
        assert_eq!(value.get("Label"), Some(&FieldValue::Str(String::new())));
        assert_eq!(value.get("Missing"), None);
    }

    #[test]
    fn test_set_and_reset() {
        let mut value = ComponentValue::new(attributes());

        value.set_at(0, FieldValue::Int(100));
        value.set_at(2, FieldValue::Str("boss".to_string()));
        assert_eq!(value.get("HP"), Some(&FieldValue::Int(100)));

        value.reset();
        assert_eq!(value.get("HP"), Some(&FieldValue::Int(0)));
        assert_eq!(value.get("Label"), Some(&FieldValue::Str(String::new())));
    }

    #[test]
    fn test_field_at() {
        let mut value = ComponentValue::new(attributes());
        value.set_at(1, FieldValue::Int(10));

        assert_eq!(value.field_at(1), Some(&FieldValue::Int(10)));
        assert_eq!(value.field_at(3), None);
    }

    #[test]
    fn test_to_dict() {
        let mut value = ComponentValue::new(attributes());
        value.set_at(0, FieldValue::Int(100));

        let dict = value.to_dict();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get("HP"), Some(&FieldValue::Int(100)));
        assert_eq!(dict.get("Damage"), Some(&FieldValue::Int(0)));
    }

    #[test]
    fn test_to_json() {
        let mut value = ComponentValue::new(attributes());
        value.set_at(0, FieldValue::Int(100));
        value.set_at(2, FieldValue::Str("boss".to_string()));

        let json = value.to_json().unwrap();
        assert_eq!(json, r#"{"HP":100,"Damage":0,"Label":"boss"}"#);
    }
}
