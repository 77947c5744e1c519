// In-memory controller for exercising the row workflow without HTTP.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use aploc_api::Session;
use secrecy::SecretString;

use crate::config::Credential;
use crate::controller::ControllerApi;
use crate::error::CoreError;
use crate::model::{DeviceRecord, UpdatePayload, UpdateResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Login(String),
    Logout,
    Resolve(String),
    Submit(String),
}

#[derive(Debug, Default)]
pub(crate) struct FakeController {
    devices: HashMap<String, DeviceRecord>,
    rejected: HashSet<String>,
    broken: HashSet<String>,
    deny_login: bool,
    deny_logout: bool,
    calls: Mutex<Vec<Call>>,
    submitted: Mutex<Vec<UpdatePayload>>,
}

impl FakeController {
    /// Answer lookups for `key` with `record`.
    pub(crate) fn with_device(mut self, key: &str, record: DeviceRecord) -> Self {
        self.devices.insert(key.to_owned(), record);
        self
    }

    /// Reject updates whose payload identifier is `identifier`.
    pub(crate) fn rejecting(mut self, identifier: &str) -> Self {
        self.rejected.insert(identifier.to_owned());
        self
    }

    /// Fail lookups for `key` with a connection error.
    pub(crate) fn failing_on(mut self, key: &str) -> Self {
        self.broken.insert(key.to_owned());
        self
    }

    pub(crate) fn denying_login(mut self) -> Self {
        self.deny_login = true;
        self
    }

    pub(crate) fn denying_logout(mut self) -> Self {
        self.deny_logout = true;
        self
    }

    pub(crate) fn session(&self) -> Session {
        Session::new(SecretString::from("fake-token".to_owned()))
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn submitted(&self) -> Vec<UpdatePayload> {
        self.submitted.lock().unwrap().clone()
    }

    fn log(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ControllerApi for FakeController {
    async fn login(&self, credential: &Credential) -> Result<Session, CoreError> {
        self.log(Call::Login(credential.username.clone()));
        if self.deny_login {
            return Err(CoreError::AuthenticationFailed {
                message: "Invalid credentials".into(),
            });
        }
        Ok(self.session())
    }

    async fn logout(&self, _session: &Session) -> Result<(), CoreError> {
        self.log(Call::Logout);
        if self.deny_logout {
            return Err(CoreError::Api {
                message: "logout refused".into(),
                status: Some(500),
            });
        }
        Ok(())
    }

    async fn resolve_device(
        &self,
        _session: &Session,
        identifier: &str,
    ) -> Result<Option<DeviceRecord>, CoreError> {
        self.log(Call::Resolve(identifier.to_owned()));
        if self.broken.contains(identifier) {
            return Err(CoreError::ConnectionFailed {
                url: "https://fake".into(),
                reason: "connection reset".into(),
            });
        }
        Ok(self.devices.get(identifier).cloned())
    }

    async fn submit_update(
        &self,
        _session: &Session,
        payload: &UpdatePayload,
    ) -> Result<UpdateResult, CoreError> {
        self.log(Call::Submit(payload.identifier.clone()));
        self.submitted.lock().unwrap().push(payload.clone());
        Ok(UpdateResult {
            success: !self.rejected.contains(&payload.identifier),
        })
    }
}
