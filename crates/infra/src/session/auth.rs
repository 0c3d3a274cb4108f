//! OAuth password-grant protocol and the validity gate
//!
//! Token endpoint calls use Basic authorization built from the application
//! key and secret. All of them run under the session's token lock, which
//! makes implicit refreshes single-flight: callers that reach the gate while
//! a refresh is running wait for it and then re-check the credential instead
//! of issuing their own refresh.

use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use restsdk_common::auth::{CredentialState, TokenResponse};
use restsdk_domain::constants::{REVOKE_ENDPOINT, TOKEN_ENDPOINT};
use restsdk_domain::ApiResponse;
use tracing::{debug, info, instrument, warn};

use super::Session;
use crate::errors::SessionError;

impl Session {
    /// Log in with the password grant, replacing any previous credential
    ///
    /// `remember_me` selects the long refresh-token lifetime class for this
    /// login and every refresh that follows it. Pass the password as typed;
    /// form encoding escapes it.
    ///
    /// # Errors
    /// - `AuthenticationFailed` if the token endpoint answers non-2xx
    /// - `MalformedTokenResponse` if the success payload is unusable
    /// - `Transport` on connection failure or timeout
    #[instrument(skip(self, username, password, extension))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        extension: Option<&str>,
        remember_me: bool,
    ) -> Result<ApiResponse, SessionError> {
        let ttl = self.config.token_ttl;

        let mut form = vec![
            ("grant_type", "password".to_string()),
            ("username", username.to_string()),
            ("password", password.to_string()),
        ];
        if let Some(extension) = extension.filter(|e| !e.is_empty()) {
            form.push(("extension", extension.to_string()));
        }
        form.push(("access_token_ttl", ttl.access_token_ttl.to_string()));
        form.push(("refresh_token_ttl", ttl.refresh_ttl_for(remember_me).to_string()));

        let _guard = self.token_lock.lock().await;

        let response = self.token_request(TOKEN_ENDPOINT, &form).await?;
        if !response.is_success() {
            warn!(status = response.status(), "Token endpoint rejected login");
            return Err(SessionError::AuthenticationFailed {
                status: response.status(),
                body: response.into_body(),
            });
        }

        let tokens = TokenResponse::from_body(response.body())?;
        self.credential.write().await.apply(tokens, remember_me, self.clock.now())?;

        info!("Authenticated");
        Ok(response)
    }

    /// Exchange the refresh token for a new token pair
    ///
    /// # Errors
    /// - `RefreshTokenExpired` if no live refresh token is held; the caller
    ///   must authenticate again
    /// - `AuthenticationFailed`, `MalformedTokenResponse`, `Transport` as for
    ///   [`Session::authenticate`]
    pub async fn refresh(&self) -> Result<ApiResponse, SessionError> {
        let _guard = self.token_lock.lock().await;
        self.refresh_locked().await
    }

    /// Revoke the access token and clear the credential
    ///
    /// The credential is cleared before the revoke call is sent, so the
    /// session is logged out even if the call fails. The revoke response is
    /// returned whatever its status.
    ///
    /// # Errors
    /// `Transport` if the revoke call cannot be completed.
    #[instrument(skip(self))]
    pub async fn revoke(&self) -> Result<ApiResponse, SessionError> {
        let _guard = self.token_lock.lock().await;

        let token = {
            let mut credential = self.credential.write().await;
            let token = credential.access_token().unwrap_or_default().to_string();
            credential.reset();
            token
        };
        info!("Credential cleared, revoking access token");

        let response = self.token_request(REVOKE_ENDPOINT, &[("token", token)]).await?;
        if !response.is_success() {
            warn!(status = response.status(), "Revoke endpoint returned non-success status");
        }

        Ok(response)
    }

    /// Validity gate run before every resource call
    ///
    /// - Valid: returns immediately, no network activity
    /// - Refreshable: refreshes once, shared with concurrent callers
    /// - Expired: fails with `SessionExpired`, no network activity
    ///
    /// # Errors
    /// `SessionExpired`, or the refresh error when a refresh was attempted.
    pub async fn ensure_access_valid(&self) -> Result<(), SessionError> {
        match self.state().await {
            CredentialState::Valid => return Ok(()),
            CredentialState::Expired => return Err(SessionError::SessionExpired),
            CredentialState::Refreshable => {}
        }

        let _guard = self.token_lock.lock().await;

        // Another caller may have refreshed (or revoked) while we waited
        match self.state().await {
            CredentialState::Valid => {
                debug!("Access token refreshed by a concurrent caller");
                Ok(())
            }
            CredentialState::Expired => Err(SessionError::SessionExpired),
            CredentialState::Refreshable => {
                debug!("Access token expired, refreshing");
                self.refresh_locked().await.map(|_| ())
            }
        }
    }

    /// Refresh protocol; caller holds the token lock.
    #[instrument(skip(self))]
    async fn refresh_locked(&self) -> Result<ApiResponse, SessionError> {
        let (refresh_token, remember_me) = {
            let credential = self.credential.read().await;
            if !credential.is_refresh_token_valid(self.clock.now()) {
                return Err(SessionError::RefreshTokenExpired);
            }
            let token = credential.refresh_token().map(str::to_owned);
            (token.ok_or(SessionError::RefreshTokenExpired)?, credential.remember_me())
        };

        let ttl = self.config.token_ttl;
        let form = [
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token),
            ("access_token_ttl", ttl.access_token_ttl.to_string()),
            ("refresh_token_ttl", ttl.refresh_ttl_for(remember_me).to_string()),
        ];

        let response = self.token_request(TOKEN_ENDPOINT, &form).await?;
        if !response.is_success() {
            warn!(status = response.status(), "Token endpoint rejected refresh");
            return Err(SessionError::AuthenticationFailed {
                status: response.status(),
                body: response.into_body(),
            });
        }

        let tokens = TokenResponse::from_body(response.body())?;
        self.credential.write().await.apply(tokens, remember_me, self.clock.now())?;

        info!("Access token refreshed");
        Ok(response)
    }

    /// Form-encoded POST to a token endpoint with Basic authorization
    async fn token_request(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<ApiResponse, SessionError> {
        let builder = self
            .http
            .request(Method::POST, self.endpoint_url(endpoint))
            .header(AUTHORIZATION, self.basic_authorization())
            .form(form);

        Ok(self.http.send(builder).await?)
    }
}
