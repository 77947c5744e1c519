// OmniVista API request/response types
//
// Wire models for the login and access-point endpoints. Inventory
// responses are wrapped in a `{ "data": ... }` envelope whose payload may
// be `null` when nothing matched. Fields the updater does not interpret
// are carried as raw `serde_json::Value` so they round-trip verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Envelope ─────────────────────────────────────────────────────────

/// Standard `{ "data": ... }` response envelope.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Error body returned by the controller on failed requests.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ── Login ────────────────────────────────────────────────────────────

/// `POST /rest-api/login` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

/// Successful login response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

// ── Access point ─────────────────────────────────────────────────────

/// Access point record from `getAPByAPMac`.
///
/// The controller returns dozens of fields; the ones the location update
/// needs are modelled explicitly and everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub mac_address: String,
    pub ap_name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub ap_groups: ApGroups,
    /// LLDP neighbour switch details; opaque to us, echoed back on update.
    #[serde(default)]
    pub lldp_switch: Value,
    /// Assigned RF profile (`{ "id": ..., ... }`), `null` when unset.
    #[serde(default)]
    pub profile: Option<Value>,
    #[serde(default)]
    pub geo_location: Option<Value>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Group membership nested inside `AccessPoint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApGroups {
    pub group_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Edit ─────────────────────────────────────────────────────────────

/// `POST /api/wma/accessPoint/editAP` request body.
///
/// Optional associations are omitted entirely when unset so the
/// controller keeps its server-side defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditApRequest {
    pub ap_mac: String,
    pub ap_location: String,
    pub group_name: String,
    pub ap_name: String,
    pub lldp_switch: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<Value>,
}

/// Per-item result in the `editAP` response list.
#[derive(Debug, Clone, Deserialize)]
pub struct EditApResult {
    #[serde(default)]
    pub success: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// `true` for JSON values that carry no information: `null`, `""`, `[]`
/// and `{}`.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
