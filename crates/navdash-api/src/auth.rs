// Session endpoints
//
// `POST /login` hands the token back in the `Authorization` response
// header rather than the body; `GET /validate` is the cheapest
// authenticated call the server offers.

use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use crate::client::{ApiClient, RequestOptions};
use crate::error::Error;
use crate::models::LoginCredentials;

impl ApiClient {
    /// Authenticate and return the session token.
    ///
    /// `POST /login`
    ///
    /// The token is read from the `Authorization` response header. It is
    /// returned to the caller rather than stored, so the caller decides
    /// when the session begins.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String, Error> {
        debug!(username = %credentials.username, "logging in");

        let body = json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });

        let resp = self
            .request::<serde_json::Value>("/login", RequestOptions::post(body))
            .await?;

        let token = resp
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(Error::NoTokenReceived)?;

        debug!("login successful");
        Ok(token.to_owned())
    }

    /// Check that the current token is accepted.
    ///
    /// `GET /validate`
    pub async fn validate_token(&self) -> Result<(), Error> {
        let _ = self
            .request::<serde_json::Value>("/validate", RequestOptions::get())
            .await?;
        Ok(())
    }
}
