use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::directory;
use crate::error::Result;

pub async fn get_partner_directory() -> Arc<Value> {
    directory::current().await
}

pub async fn replace_partner_directory(partners: Value) -> Result<usize> {
    let count = directory::replace(partners).await?;
    info!("partner directory replaced with {} records", count);
    Ok(count)
}
