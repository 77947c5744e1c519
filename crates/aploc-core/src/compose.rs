// ── Update composition ──
//
// The one piece of business logic in the workflow: merge a new location
// into a fetched record without clobbering optional associations the
// input file knows nothing about.

use aploc_api::models::is_blank;
use serde_json::Value;

use crate::model::{DeviceRecord, UpdatePayload};

/// Build the edit payload for `record` with its location set to
/// `new_location`.
///
/// Identifier, group, display name and switch topology are copied
/// verbatim. `profile_id` and `geo_location` are carried only when the
/// record has a non-empty value; sending an empty one would reset the
/// server-side association.
pub fn compose(record: &DeviceRecord, new_location: &str) -> UpdatePayload {
    UpdatePayload {
        identifier: record.identifier.clone(),
        new_location: new_location.to_owned(),
        group_name: record.group_name.clone(),
        display_name: record.display_name.clone(),
        switch_topology: record.switch_topology.clone(),
        profile_id: present(record.profile_id.as_ref()),
        geo_location: present(record.geo_location.as_ref()),
    }
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !is_blank(v)).cloned()
}
