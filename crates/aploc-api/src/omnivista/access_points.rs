// OmniVista access-point endpoints
//
// Single-device lookup by MAC (`getAPByAPMac`) and the device edit call
// (`editAP`) used to change an AP's location.

use serde_json::Value;
use tracing::debug;

use crate::auth::Session;
use crate::error::Error;
use crate::omnivista::client::OmniVistaClient;
use crate::omnivista::models::{AccessPoint, DataEnvelope, EditApRequest, EditApResult, is_blank};

impl OmniVistaClient {
    /// Get a single access point by MAC address.
    ///
    /// `GET /api/wma/accessPoint/getAPByAPMac?apMac={mac}`. Returns `None`
    /// when the controller answers with an empty `data` member.
    pub async fn get_ap_by_mac(
        &self,
        session: &Session,
        mac: &str,
    ) -> Result<Option<AccessPoint>, Error> {
        let url = self.url("/api/wma/accessPoint/getAPByAPMac")?;
        debug!(mac, "looking up access point");

        let envelope: DataEnvelope<Value> = self
            .get_with_params(session, url, &[("apMac", mac)])
            .await?;

        match envelope.data {
            Some(data) if !is_blank(&data) => match serde_json::from_value(data.clone()) {
                Ok(ap) => Ok(Some(ap)),
                Err(e) => Err(Error::Deserialization {
                    message: format!("unexpected access point record: {e}"),
                    body: data.to_string(),
                }),
            },
            _ => Ok(None),
        }
    }

    /// Submit an access-point edit.
    ///
    /// `POST /api/wma/accessPoint/editAP`. Returns the per-item result list;
    /// a missing or `null` `data` member yields an empty list.
    pub async fn edit_ap(
        &self,
        session: &Session,
        request: &EditApRequest,
    ) -> Result<Vec<EditApResult>, Error> {
        let url = self.url("/api/wma/accessPoint/editAP")?;
        debug!(mac = %request.ap_mac, "editing access point");

        let envelope: DataEnvelope<Vec<EditApResult>> = self.post(session, url, request).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}
