// ── Device domain types ──

use serde_json::Value;

/// The controller's current view of an access point.
///
/// A fresh snapshot is fetched for every row; nothing is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    /// Canonical MAC address as reported by the controller.
    pub identifier: String,
    /// Location before the update; empty when unset.
    pub current_location: String,
    pub display_name: String,
    pub group_name: String,
    /// LLDP neighbour switch details, carried verbatim.
    pub switch_topology: Value,
    /// RF profile id, when one is assigned.
    pub profile_id: Option<Value>,
    /// Geo-coordinates, when set.
    pub geo_location: Option<Value>,
}

/// Everything the edit call needs to change one device's location
/// without disturbing its other server-managed associations.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePayload {
    pub identifier: String,
    pub new_location: String,
    pub group_name: String,
    pub display_name: String,
    pub switch_topology: Value,
    pub profile_id: Option<Value>,
    pub geo_location: Option<Value>,
}

/// The controller's verdict on a single submitted update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub success: bool,
}
