use moka::future::Cache;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::models::invitation::MatchedOrganization;

pub static INVITATION_CACHE: Lazy<Arc<Cache<String, Arc<Vec<MatchedOrganization>>>>> =
    Lazy::new(|| {
        Arc::new(Cache::new(256)) // directory-backed queries only
    });
