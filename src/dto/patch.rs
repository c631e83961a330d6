use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Partial update body. Each top-level key replaces the stored field as a
/// whole; nested objects are not merged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldPatch {
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}
