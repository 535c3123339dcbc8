//! Header resolution: column descriptors and result slots.
//!
//! Built once per header row and dropped on clear. Field names are
//! resolved against the registry here, so row decoding works from
//! pre-resolved (slot, field index, semantic type) triples and never
//! looks a name up per row.

use tracing::debug;

use crate::component::ComponentValue;
use crate::error::DecodeError;
use crate::header::QualifiedName;
use crate::schema::SchemaRegistry;
use crate::value::SemanticType;

/// The resolved mapping for one header column that names a field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnDescriptor {
    /// Position of the column in the header row.
    pub column: usize,
    /// Index of the result slot the column feeds.
    pub slot: usize,
    /// Index of the field within the slot's layout.
    pub field_index: usize,
    pub ty: SemanticType,
}

/// Descriptors plus result slots for one header-to-clear cycle.
///
/// Slots hold one mutable instance per distinct component type seen in the
/// header, in first-seen order. The instances are reused between rows.
#[derive(Debug)]
pub(crate) struct DescriptorSet {
    pub columns: Vec<ColumnDescriptor>,
    pub slots: Vec<ComponentValue>,
}

impl DescriptorSet {
    /// Builds descriptors and slots from the header row.
    ///
    /// Columns sharing a component converge on one slot, keyed by the
    /// component's layout; the first occurrence fixes the slot's position
    /// in the output ordering. A bare component name is a marker column:
    /// it allocates the slot so the component appears in the output, but
    /// records no descriptor, so its data cells are ignored.
    pub fn from_header(
        registry: &SchemaRegistry,
        header: &[String],
    ) -> Result<Self, DecodeError> {
        if header.is_empty() {
            return Err(DecodeError::MalformedHeaderName { cell: String::new() });
        }

        let mut columns = Vec::with_capacity(header.len());
        let mut slots: Vec<ComponentValue> = Vec::new();

        for (column, cell) in header.iter().enumerate() {
            let name = QualifiedName::parse(cell)?;
            let (layout, field) = registry.resolve(&name.component, name.field.as_deref())?;

            let slot = match slots.iter().position(|s| s.layout() == layout.as_ref()) {
                Some(index) => index,
                None => {
                    slots.push(ComponentValue::new(layout.clone()));
                    slots.len() - 1
                }
            };

            if let Some((field_index, ty)) = field {
                columns.push(ColumnDescriptor {
                    column,
                    slot,
                    field_index,
                    ty,
                });
            }
        }

        debug!(
            columns = header.len(),
            components = slots.len(),
            "built column descriptors"
        );

        Ok(Self { columns, slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ComponentLayout;
    use crate::value::FieldValue;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::from_components(vec![
            ComponentLayout::new("Character")
                .with_field("Name", SemanticType::Str)
                .with_field("Class", SemanticType::Str),
            ComponentLayout::new("Attributes")
                .with_field("HP", SemanticType::I32)
                .with_field("Damage", SemanticType::I32),
            ComponentLayout::new("Monster"),
        ])
        .unwrap()
    }

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_slots_in_first_seen_order() {
        let set = DescriptorSet::from_header(
            &registry(),
            &header(&[
                "Attributes.HP",
                "Character.Name",
                "Attributes.Damage",
                "Character.Class",
            ]),
        )
        .unwrap();

        assert_eq!(set.slots.len(), 2);
        assert_eq!(set.slots[0].name(), "Attributes");
        assert_eq!(set.slots[1].name(), "Character");
    }

    #[test]
    fn test_scattered_columns_share_one_slot() {
        let set = DescriptorSet::from_header(
            &registry(),
            &header(&["Character.Name", "Attributes.HP", "Character.Class"]),
        )
        .unwrap();

        assert_eq!(set.columns.len(), 3);
        assert_eq!(set.columns[0].slot, 0);
        assert_eq!(set.columns[1].slot, 1);
        assert_eq!(set.columns[2].slot, 0);
        assert_eq!(set.columns[2].field_index, 1);
        assert_eq!(set.columns[2].ty, SemanticType::Str);
    }

    #[test]
    fn test_marker_column_allocates_slot_without_descriptor() {
        let set =
            DescriptorSet::from_header(&registry(), &header(&["Character.Name", "Monster"]))
                .unwrap();

        assert_eq!(set.columns.len(), 1);
        assert_eq!(set.slots.len(), 2);
        assert_eq!(set.slots[1].name(), "Monster");
    }

    #[test]
    fn test_slots_start_at_defaults() {
        let set = DescriptorSet::from_header(&registry(), &header(&["Attributes.HP"])).unwrap();

        assert_eq!(set.slots[0].get("HP"), Some(&FieldValue::Int(0)));
        assert_eq!(set.slots[0].get("Damage"), Some(&FieldValue::Int(0)));
    }

    #[test]
    fn test_unknown_component_aborts_build() {
        let result =
            DescriptorSet::from_header(&registry(), &header(&["Character.Name", "Unknown.Field"]));

        assert_eq!(
            result.unwrap_err(),
            DecodeError::UnknownComponent {
                component: "Unknown".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_field_aborts_build() {
        let result = DescriptorSet::from_header(&registry(), &header(&["Character.Hp"]));

        assert_eq!(
            result.unwrap_err(),
            DecodeError::UnknownField {
                component: "Character".to_string(),
                field: "Hp".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_header_cell_aborts_build() {
        let result = DescriptorSet::from_header(&registry(), &header(&["Character.Name", ""]));

        assert!(matches!(
            result,
            Err(DecodeError::MalformedHeaderName { .. })
        ));
    }

    #[test]
    fn test_empty_header_is_malformed() {
        let result = DescriptorSet::from_header(&registry(), &[]);

        assert!(matches!(
            result,
            Err(DecodeError::MalformedHeaderName { .. })
        ));
    }
}
