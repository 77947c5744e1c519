// ── Controller abstraction ──
//
// The four remote operations the batch needs, behind one trait so the
// row workflow can run against the real OmniVista client or an in-memory
// stand-in. Everything that crosses this seam is already a domain type.

use std::future::Future;

use aploc_api::models::EditApRequest;
use aploc_api::transport::{TlsMode, TransportConfig};
use aploc_api::{OmniVistaClient, Session};
use tracing::debug;

use crate::config::{ControllerConfig, Credential, TlsPolicy};
use crate::convert::{failure_message, update_result};
use crate::error::CoreError;
use crate::model::{DeviceRecord, UpdatePayload, UpdateResult};

/// Remote operations against a device-management controller.
///
/// Every error returned here is batch-fatal. A device that does not
/// exist is `Ok(None)`, and a rejected update is
/// `Ok(UpdateResult { success: false })`.
pub trait ControllerApi {
    /// Exchange a credential for a session.
    fn login(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    /// Terminate a session.
    fn logout(&self, session: &Session) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Fetch the current record for `identifier`, if the controller has one.
    fn resolve_device(
        &self,
        session: &Session,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<DeviceRecord>, CoreError>> + Send;

    /// Submit a single update and report whether the controller took it.
    fn submit_update(
        &self,
        session: &Session,
        payload: &UpdatePayload,
    ) -> impl Future<Output = Result<UpdateResult, CoreError>> + Send;
}

impl ControllerApi for OmniVistaClient {
    async fn login(&self, credential: &Credential) -> Result<Session, CoreError> {
        let Credential { username, password } = credential;
        Ok(OmniVistaClient::login(self, username, password).await?)
    }

    async fn logout(&self, session: &Session) -> Result<(), CoreError> {
        Ok(OmniVistaClient::logout(self, session).await?)
    }

    async fn resolve_device(
        &self,
        session: &Session,
        identifier: &str,
    ) -> Result<Option<DeviceRecord>, CoreError> {
        let ap = self.get_ap_by_mac(session, identifier).await?;
        Ok(ap.map(DeviceRecord::from))
    }

    async fn submit_update(
        &self,
        session: &Session,
        payload: &UpdatePayload,
    ) -> Result<UpdateResult, CoreError> {
        let request = EditApRequest::from(payload);
        let items = self.edit_ap(session, &request).await?;

        let result = update_result(&payload.identifier, &items);
        let rejection = failure_message(&items).filter(|_| !result.success);
        if let Some(message) = rejection {
            debug!(identifier = %payload.identifier, message, "controller rejected update");
        }
        Ok(result)
    }
}

/// Build an OmniVista client for `config`. No request is sent.
pub fn connect(config: &ControllerConfig) -> Result<OmniVistaClient, CoreError> {
    let transport = TransportConfig {
        tls: match config.tls {
            TlsPolicy::Validate => TlsMode::System,
            TlsPolicy::Insecure => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    };

    let base_url = config.base_url()?;
    debug!(url = %base_url, tls = ?config.tls, "building controller client");

    Ok(OmniVistaClient::new(base_url, &transport)?)
}
