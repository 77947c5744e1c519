// ── API-to-domain type conversions ──
//
// Bridges raw `aploc_api` response types into canonical domain types,
// and domain payloads back into request bodies.

use aploc_api::models::{AccessPoint, EditApRequest, EditApResult, is_blank};
use serde_json::Value;
use tracing::warn;

use crate::model::{DeviceRecord, UpdatePayload, UpdateResult};

// ── Access point → DeviceRecord ──────────────────────────────────────

impl From<AccessPoint> for DeviceRecord {
    fn from(ap: AccessPoint) -> Self {
        // The edit call wants the profile's id, not the profile object.
        let profile_id = ap
            .profile
            .filter(|p| !is_blank(p))
            .and_then(|p| p.get("id").cloned())
            .filter(|id| !is_blank(id));

        DeviceRecord {
            identifier: ap.mac_address,
            current_location: ap.location.unwrap_or_default(),
            display_name: ap.ap_name,
            group_name: ap.ap_groups.group_name,
            switch_topology: ap.lldp_switch,
            profile_id,
            geo_location: ap.geo_location.filter(|g| !is_blank(g)),
        }
    }
}

// ── UpdatePayload → edit request ─────────────────────────────────────

impl From<&UpdatePayload> for EditApRequest {
    fn from(p: &UpdatePayload) -> Self {
        EditApRequest {
            ap_mac: p.identifier.clone(),
            ap_location: p.new_location.clone(),
            group_name: p.group_name.clone(),
            ap_name: p.display_name.clone(),
            lldp_switch: p.switch_topology.clone(),
            profile_id: p.profile_id.clone(),
            geo_location: p.geo_location.clone(),
        }
    }
}

// ── Edit response → UpdateResult ─────────────────────────────────────

/// Interpret the per-item result list of an edit call.
///
/// One device goes out per call, so the first item decides. An empty
/// list is treated as a rejection rather than a fault: the controller
/// answered, it just did not confirm the change.
pub fn update_result(identifier: &str, items: &[EditApResult]) -> UpdateResult {
    match items.first() {
        Some(item) => {
            if items.len() > 1 {
                warn!(
                    identifier,
                    items = items.len(),
                    "edit response carried more than one item, using the first"
                );
            }
            UpdateResult {
                success: item.success,
            }
        }
        None => {
            warn!(identifier, "edit response carried no result items");
            UpdateResult { success: false }
        }
    }
}

/// The value of `message` on a failed edit item, when the controller
/// sent one.
pub(crate) fn failure_message(items: &[EditApResult]) -> Option<&str> {
    items
        .first()
        .and_then(|item| item.extra.get("message"))
        .and_then(Value::as_str)
}
