use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::types::MAX_PATH_DEPTH;
use crate::errors::QueryError;
use crate::record::{Field, FieldKind, FieldType, FieldValue, Record, Schema};

/// A resolved field path: pre-split segments plus the scalar kind the path
/// reaches. Extraction walks the record without re-validating.
#[derive(Debug)]
pub struct Accessor {
    segments: Vec<String>,
    kind: FieldKind,
}

impl Accessor {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Pull the value this path names out of a record. A field that is
    /// absent or mis-shaped at runtime yields `Null`; path validity was
    /// already established against the schema.
    #[must_use]
    pub fn extract(&self, record: &dyn Record) -> FieldValue {
        let (last, nested) = match self.segments.split_last() {
            Some(parts) => parts,
            None => return FieldValue::Null,
        };
        let mut current = record;
        for segment in nested {
            match current.field(segment) {
                Some(Field::Nested(inner)) => current = inner,
                _ => return FieldValue::Null,
            }
        }
        match current.field(last) {
            Some(Field::Value(value)) => value,
            _ => FieldValue::Null,
        }
    }
}

// Resolution cache keyed by (schema name, path). Schemas are built once per
// record type behind a Lazy, so the name is a stable identity.
static REGISTRY: Lazy<RwLock<HashMap<(String, String), Arc<Accessor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Resolve a dot-separated field path against a schema.
///
/// Every non-final segment must name a nested field and the final segment a
/// scalar field, traversing left to right.
///
/// # Errors
/// `FieldResolution` if any segment is absent, reaches through a scalar, or
/// the path is empty or deeper than the depth cap.
pub fn resolve(schema: &Schema, path: &str) -> Result<Arc<Accessor>, QueryError> {
    let key = (schema.name().to_string(), path.to_string());
    if let Some(accessor) = REGISTRY.read().get(&key) {
        return Ok(accessor.clone());
    }
    let accessor = Arc::new(resolve_uncached(schema, path)?);
    REGISTRY.write().insert(key, accessor.clone());
    Ok(accessor)
}

fn resolve_uncached(schema: &Schema, path: &str) -> Result<Accessor, QueryError> {
    let unresolvable = |segment: &str| QueryError::FieldResolution {
        path: path.to_string(),
        segment: segment.to_string(),
    };
    let segments: Vec<String> = path.split('.').map(str::to_string).collect();
    if path.is_empty() || segments.len() > MAX_PATH_DEPTH {
        return Err(unresolvable(path));
    }
    let kind = {
        let (last, nested) = segments.split_last().ok_or_else(|| unresolvable(path))?;
        let mut current = schema;
        for segment in nested {
            match current.field(segment) {
                Some(FieldType::Nested(inner)) => current = inner,
                // absent, or a scalar mid-path
                _ => return Err(unresolvable(segment)),
            }
        }
        match current.field(last) {
            Some(FieldType::Scalar(kind)) => *kind,
            // absent, or a path stopping on a nested record
            _ => return Err(unresolvable(last)),
        }
    };
    Ok(Accessor { segments, kind })
}

/// Resolve a path for a concrete record type.
///
/// # Errors
/// See [`resolve`].
pub fn resolve_for<T: Record>(path: &str) -> Result<Arc<Accessor>, QueryError> {
    resolve(&T::schema(), path)
}
