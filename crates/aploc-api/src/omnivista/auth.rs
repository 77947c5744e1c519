// OmniVista session authentication
//
// Username/password login that yields a bearer token, and the matching
// logout. The token is returned to the caller as an immutable `Session`
// rather than stored on the client.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::Session;
use crate::error::Error;
use crate::omnivista::client::{OmniVistaClient, error_message};
use crate::omnivista::models::{LoginRequest, LoginResponse};

impl OmniVistaClient {
    /// Authenticate with the controller using username/password.
    ///
    /// `POST /rest-api/login` with `{"userName", "password"}`. On success
    /// the returned [`Session`] carries the `accessToken` and must be
    /// passed to every later call. Any non-success status is an
    /// `Error::Authentication` carrying the controller's `message`.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Session, Error> {
        let url = self.url("/rest-api/login")?;

        debug!("logging in at {}", url);

        let body = LoginRequest {
            user_name: username,
            password: password.expose_secret(),
        };

        let resp = self.http().post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: error_message(&body),
            });
        }

        let login: LoginResponse = Self::parse_response(resp).await?;

        debug!("login successful");
        Ok(Session::new(SecretString::from(login.access_token)))
    }

    /// End the session.
    ///
    /// `GET /rest-api/logout`. The response body is ignored; only the
    /// status is checked.
    pub async fn logout(&self, session: &Session) -> Result<(), Error> {
        let url = self.url("/rest-api/logout")?;

        debug!("logging out at {}", url);

        let resp = self
            .http()
            .get(url)
            .header(reqwest::header::AUTHORIZATION, session.authorization()?)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        debug!("logout complete");
        Ok(())
    }
}
