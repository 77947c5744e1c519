// OmniVista HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, bearer-token
// attachment and status/body decoding. Endpoint groups (auth, access
// points) are implemented as inherent methods in sibling files to keep
// this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Session;
use crate::error::Error;
use crate::omnivista::models::ErrorBody;
use crate::transport::TransportConfig;

/// Raw HTTP client for the OmniVista REST API.
///
/// Holds no session state: every authorized call takes the [`Session`]
/// returned by [`login`](Self::login) as an explicit argument.
pub struct OmniVistaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OmniVistaClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// The `base_url` is the controller root (e.g. `https://10.0.0.5`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute controller path (`/rest-api/login`).
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authorized GET with query parameters and decode the body.
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        session: &Session,
        url: Url,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, session.authorization()?)
            .query(params)
            .send()
            .await?;

        Self::parse_response(resp).await
    }

    /// Send an authorized POST with a JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        session: &Session,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, session.authorization()?)
            .json(body)
            .send()
            .await?;

        Self::parse_response(resp).await
    }

    /// Check the status, then decode the body as `T`.
    ///
    /// A 401 maps to `Error::Authentication`; any other non-success status
    /// becomes `Error::Api` carrying the controller's `message` when the
    /// body has one.
    pub(crate) async fn parse_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or access token rejected".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = resp.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}

/// Pull the controller's `message` out of an error body, falling back to
/// a truncated copy of the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| preview(body).to_owned())
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> OmniVistaClient {
        OmniVistaClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn url_joins_without_double_slash() {
        let c = client("https://10.0.0.5/");
        assert_eq!(
            c.url("/rest-api/login").unwrap().as_str(),
            "https://10.0.0.5/rest-api/login"
        );
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(error_message(r#"{"message":"bad user"}"#), "bad user");
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        assert_eq!(preview(&long).chars().count(), 200);
    }
}
