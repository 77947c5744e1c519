// ── Session lifecycle ──
//
// A session is opened once per run and closed once at the end, whatever
// happened in between. Closing never fails the run.

use aploc_api::Session;
use tracing::{debug, info, warn};

use crate::config::Credential;
use crate::controller::ControllerApi;
use crate::error::CoreError;

/// Log in with `credential`.
pub async fn open_session<A: ControllerApi>(
    api: &A,
    credential: &Credential,
) -> Result<Session, CoreError> {
    debug!(username = %credential.username, "opening session");
    let session = api.login(credential).await?;
    info!(username = %credential.username, "authenticated");
    Ok(session)
}

/// Best-effort logout. A failure is logged and dropped.
pub async fn close_session<A: ControllerApi>(api: &A, session: &Session) {
    match api.logout(session).await {
        Ok(()) => debug!("session closed"),
        Err(e) => warn!(error = %e, "logout failed (non-fatal)"),
    }
}
