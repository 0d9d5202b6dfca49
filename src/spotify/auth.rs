use chrono::Utc;

use super::SpotifyClient;
use crate::{
    error::{ApiError, ApiResult},
    types::{Token, TokenErrorResponse, TokenResponse},
};

impl SpotifyClient {
    /// Exchanges an authorization code at the token endpoint.
    ///
    /// The client authenticates with HTTP basic auth (client id and secret),
    /// and `redirect_uri` must match the one used to build the authorize URL.
    pub(super) async fn exchange_code_for_token(&self, code: &str) -> ApiResult<Token> {
        let credentials = &self.config.credentials;
        self.request_token(
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", credentials.redirect_uri.as_str()),
            ],
            None,
        )
        .await
    }

    pub(super) async fn refresh_access_token(&self, refresh_token: &str) -> ApiResult<Token> {
        self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
            Some(refresh_token),
        )
        .await
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh: Option<&str>,
    ) -> ApiResult<Token> {
        let credentials = &self.config.credentials;
        let res = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("token endpoint returned {}", status),
            };
            return Err(ApiError::Authorization(message));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token.into_token(Utc::now().timestamp(), previous_refresh))
    }
}
