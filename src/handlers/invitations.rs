use std::sync::Arc;

use crate::cache::INVITATION_CACHE;
use crate::directory;
use crate::error::Result;
use crate::invitations::filter::filter_partners_by_distance;
use crate::models::invitation::{InvitationQuery, MatchedOrganization};

/// Runs an invitation query. Inline partner lists are filtered directly,
/// directory-backed queries go through the cache.
pub async fn find_invitations(query: InvitationQuery) -> Result<Arc<Vec<MatchedOrganization>>> {
    if let Some(partners) = &query.partners {
        return filter_partners_by_distance(&query.origin, &query.max_distance_km, partners)
            .map(Arc::new);
    }

    let key = format!("{}|{}", query.origin, query.max_distance_km);
    if let Some(hit) = INVITATION_CACHE.get(&key).await {
        return Ok(hit);
    }

    let partners = directory::current().await;
    let matches = Arc::new(filter_partners_by_distance(
        &query.origin,
        &query.max_distance_km,
        &partners,
    )?);
    INVITATION_CACHE.insert(key, Arc::clone(&matches)).await;
    Ok(matches)
}
