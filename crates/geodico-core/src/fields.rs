//! Attribute schema description.

use geodico_core_common::FieldDefinition;

use crate::types::{FieldDescription, FieldMap};

/// Builds the field map of a layer, keeping the schema's declaration order.
#[must_use]
pub fn infos_fields(definitions: &[FieldDefinition]) -> FieldMap {
    let mut fields = FieldMap::new();
    for definition in definitions {
        fields.insert(
            definition.name.clone(),
            FieldDescription {
                type_name: definition.type_name.clone(),
                width: definition.width,
                precision: definition.precision,
            },
        );
    }
    fields
}
