//! Qualified column name parsing.
//!
//! A header cell is either `MyComponent.MyField`, feeding one field of a
//! component, or a bare `MyComponent`, a marker column that declares the
//! component with no field drilldown. Everything after the first separator
//! belongs to the field name, so field names may themselves contain
//! separators. Comparison downstream is exact-text and case-sensitive.

use crate::error::DecodeError;

/// The separator between the component and field portions of a header cell.
pub(crate) const SEPARATOR: char = '.';

/// A parsed header cell: component name plus optional field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QualifiedName {
    pub component: String,
    pub field: Option<String>,
}

impl QualifiedName {
    /// Parses a qualified name, e.g. 'MyComponent.MyField', into its
    /// parts. A cell without a separator is a bare component name.
    ///
    /// # Errors
    /// `MalformedHeaderName` when the cell is empty, the component portion
    /// is empty, or a separator is present with an empty field portion.
    pub fn parse(cell: &str) -> Result<Self, DecodeError> {
        let malformed = || DecodeError::MalformedHeaderName {
            cell: cell.to_string(),
        };

        match cell.split_once(SEPARATOR) {
            None => {
                if cell.is_empty() {
                    return Err(malformed());
                }
                Ok(Self {
                    component: cell.to_string(),
                    field: None,
                })
            }
            Some((component, field)) => {
                if component.is_empty() || field.is_empty() {
                    return Err(malformed());
                }
                Ok(Self {
                    component: component.to_string(),
                    field: Some(field.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_and_field() {
        let name = QualifiedName::parse("Character.Name").unwrap();

        assert_eq!(name.component, "Character");
        assert_eq!(name.field.as_deref(), Some("Name"));
    }

    #[test]
    fn test_parse_bare_component() {
        let name = QualifiedName::parse("Monster").unwrap();

        assert_eq!(name.component, "Monster");
        assert_eq!(name.field, None);
    }

    #[test]
    fn test_parse_field_keeps_further_separators() {
        let name = QualifiedName::parse("Stats.Speed.Max").unwrap();

        assert_eq!(name.component, "Stats");
        assert_eq!(name.field.as_deref(), Some("Speed.Max"));
    }

    #[test]
    fn test_parse_is_not_trimmed() {
        let name = QualifiedName::parse(" Character . Name ").unwrap();

        assert_eq!(name.component, " Character ");
        assert_eq!(name.field.as_deref(), Some(" Name "));
    }

    #[test]
    fn test_parse_malformed() {
        for cell in ["", ".Name", "Character.", "."] {
            assert_eq!(
                QualifiedName::parse(cell),
                Err(DecodeError::MalformedHeaderName {
                    cell: cell.to_string()
                }),
                "cell {:?}",
                cell
            );
        }
    }
}
