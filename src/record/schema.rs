use std::collections::BTreeMap;
use std::sync::Arc;

use super::FieldKind;

/// The declared type of a single record field.
#[derive(Debug, Clone)]
pub enum FieldType {
    Scalar(FieldKind),
    Nested(Arc<Schema>),
}

impl FieldType {
    #[must_use]
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            Self::Nested(_) => None,
        }
    }
}

/// Type descriptor for a record type: field names mapped to their declared
/// types. The name must be unique per record type; it keys the accessor
/// memoization registry.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: BTreeMap<String, FieldType>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder { name: name.into(), fields: BTreeMap::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }
}

pub struct SchemaBuilder {
    name: String,
    fields: BTreeMap<String, FieldType>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), FieldType::Scalar(kind));
        self
    }

    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, schema: Arc<Schema>) -> Self {
        self.fields.insert(name.into(), FieldType::Nested(schema));
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema { name: self.name, fields: self.fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_registers_scalar_and_nested_fields() {
        let inner = Schema::builder("inner").field("x", FieldKind::Integer).build();
        let outer = Schema::builder("outer")
            .field("name", FieldKind::Text)
            .nested("inner", inner)
            .build();
        assert_eq!(outer.field("name").and_then(FieldType::kind), Some(FieldKind::Text));
        assert!(matches!(outer.field("inner"), Some(FieldType::Nested(_))));
        assert!(outer.field("missing").is_none());
    }
}
