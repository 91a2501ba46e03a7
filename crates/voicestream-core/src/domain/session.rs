//! Session activity record.

use serde::{Deserialize, Serialize};

/// Per-user activity record refreshed by periodic pings.
///
/// One record per owner is maintained by lookup-before-insert; storage
/// does not enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub owner: Option<String>,
    pub is_active: bool,
    /// Epoch milliseconds of the latest ping.
    pub last_activity: i64,
}
