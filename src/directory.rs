use std::sync::Arc;

use anyhow::Context;
use once_cell::sync::Lazy;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::INVITATION_CACHE;
use crate::error::{Error, Result, json_type_name};
use crate::invitations::filter::require_partner_fields;

static PARTNER_DIRECTORY: Lazy<RwLock<Arc<Value>>> =
    Lazy::new(|| RwLock::new(Arc::new(Value::Array(Vec::new()))));

/// Snapshot of the current partner directory.
pub async fn current() -> Arc<Value> {
    PARTNER_DIRECTORY.read().await.clone()
}

/// Replaces the directory after schema-checking every record with the same
/// rules the filter applies. On the first rejected record the previous
/// directory stays in place.
pub async fn replace(partners: Value) -> Result<usize> {
    let Some(records) = partners.as_array() else {
        return Err(Error::TypeValidation {
            field: "partners",
            expected: "an array",
            found: json_type_name(&partners),
        });
    };
    for record in records {
        require_partner_fields(record)?;
    }

    let count = records.len();
    *PARTNER_DIRECTORY.write().await = Arc::new(partners);
    INVITATION_CACHE.invalidate_all();
    Ok(count)
}

pub async fn load_from_file(path: &str) -> anyhow::Result<usize> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read partner file {path}"))?;
    let partners: Value = serde_json::from_str(&text)
        .with_context(|| format!("partner file {path} is not valid JSON"))?;
    let count = replace(partners).await?;
    Ok(count)
}
