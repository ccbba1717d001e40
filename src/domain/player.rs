//! Inbound player requests.

use serde::{Deserialize, Serialize};

/// One player to rate.
///
/// `id` is an opaque correlation key chosen by the caller and echoed back in
/// the matching [`Rating`](super::Rating). `realm` selects the upstream API
/// cluster and `account_id` is the account on that cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRequest {
    pub id: u64,
    pub realm: String,
    pub account_id: u64,
}

impl PlayerRequest {
    #[must_use]
    pub fn new(id: u64, realm: impl Into<String>, account_id: u64) -> Self {
        Self {
            id,
            realm: realm.into(),
            account_id,
        }
    }
}

/// A batch of requests as carried by one request frame.
pub type RequestBatch = Vec<PlayerRequest>;
