use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One office that matched a proximity query, with its computed
/// great-circle distance from the origin in kilometers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchedAddress {
    pub address: String,
    pub distance: f64,
}

/// A partner organization with at least one office in range. Addresses
/// keep the order the offices were listed in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchedOrganization {
    pub organization: String,
    pub addresses: Vec<MatchedAddress>,
}

/// Body of `POST /invitations`. When `partners` is present the inline list
/// is filtered, otherwise the loaded partner directory is used.
#[derive(Debug, Deserialize)]
pub struct InvitationQuery {
    pub origin: Value,
    pub max_distance_km: Value,
    #[serde(default)]
    pub partners: Option<Value>,
}
