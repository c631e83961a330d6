use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::StoreResult;

/// Store-assigned fields a patch may not touch.
const PROTECTED_FIELDS: [&str; 2] = ["id", "createdAt"];

/// Top-level merge of `patch` over `existing`. Each key present in the patch
/// replaces the prior value wholesale, nested objects included.
pub(super) fn shallow_merge<T>(existing: &T, patch: Map<String, Value>) -> StoreResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(existing)?;
    if let Value::Object(fields) = &mut value {
        for (key, v) in patch {
            if PROTECTED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            fields.insert(key, v);
        }
    }
    Ok(serde_json::from_value(value)?)
}
