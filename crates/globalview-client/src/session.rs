//! Login against the `GlobalView` auth endpoint.

use reqwest::Method;

use crate::auth::{LoginRequest, LoginResponse};
use crate::client::{GlobalviewClient, RequestOptions};
use crate::error::ClientError;
use crate::query::QueryParams;

impl GlobalviewClient {
    /// Exchanges credentials for a bearer token. Needs no existing token.
    ///
    /// The caller stores the returned token (see
    /// [`crate::auth::AuthCookies::store_token`]); this client keeps using
    /// whatever token it was built with.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Status`] when the credentials are rejected.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response carries no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let url = self.build_url(&["globalview", "auth", "login"], &QueryParams::new())?;
        let body = serde_json::to_value(LoginRequest { email, password }).map_err(|e| {
            ClientError::Deserialize {
                context: "login request".to_string(),
                source: e,
            }
        })?;
        let response: LoginResponse = self
            .request(Method::POST, url, Some(&body), &RequestOptions::anonymous())
            .await?;
        tracing::info!(user = ?response.user.email, "login succeeded");
        Ok(response)
    }
}
