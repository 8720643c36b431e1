//! Reqwest-backed identity adapter for GoTrue-compatible auth services.
//!
//! Transport details only: endpoint layout, the `apikey` header, status
//! mapping, and JSON decoding. Passwords and tokens are never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{PasswordBodyDto, SignUpResponseDto, TokenResponseDto, UserDto};
use crate::domain::ports::{
    IdentityAccount, IdentityProvider, IdentityProviderError, IdentitySession,
};
use crate::domain::{AccessToken, LoginCredentials, Registration, UserId};

/// Identity adapter calling `/auth/v1/*` on one GoTrue deployment.
pub struct GoTrueIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl GoTrueIdentityProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        self.base_url
            .join(path)
            .map_err(|err| IdentityProviderError::unavailable(format!("invalid endpoint: {err}")))
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_up(
        &self,
        registration: &Registration,
    ) -> Result<IdentityAccount, IdentityProviderError> {
        let credentials = registration.credentials();
        let response = self
            .with_key(self.client.post(self.endpoint("auth/v1/signup")?))
            .json(&PasswordBodyDto {
                email: credentials.email().as_str(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: SignUpResponseDto = decode(response, map_sign_up_status).await?;
        let user_id = body.user_id().ok_or_else(|| {
            IdentityProviderError::unavailable("sign-up response did not include a user id")
        })?;
        debug!(%user_id, "identity account created");
        Ok(IdentityAccount {
            user_id: UserId::from_uuid(user_id),
            email: credentials.email().clone(),
        })
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IdentitySession, IdentityProviderError> {
        let response = self
            .with_key(self.client.post(self.endpoint("auth/v1/token")?))
            .query(&[("grant_type", "password")])
            .json(&PasswordBodyDto {
                email: credentials.email().as_str(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: TokenResponseDto = decode(response, map_sign_in_status).await?;
        let access_token = AccessToken::new(body.access_token).map_err(|_| {
            IdentityProviderError::unavailable("token response carried an empty access token")
        })?;
        Ok(IdentitySession {
            user_id: UserId::from_uuid(body.user.id),
            access_token,
        })
    }

    async fn resolve_token(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError> {
        let response = self
            .with_key(self.client.get(self.endpoint("auth/v1/user")?))
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(map_transport_error)?;
        let user: UserDto = decode(response, map_token_status).await?;
        Ok(UserId::from_uuid(user.id))
    }
}

async fn decode<T, F>(response: Response, map_status: F) -> Result<T, IdentityProviderError>
where
    T: DeserializeOwned,
    F: FnOnce(StatusCode, &[u8]) -> IdentityProviderError,
{
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| {
        IdentityProviderError::unavailable(format!("invalid identity response: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::unavailable(error.to_string())
}

fn map_upstream_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    IdentityProviderError::unavailable(status_message(status, body))
}

fn map_sign_up_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
        IdentityProviderError::rejected(status_message(status, body))
    } else {
        map_upstream_status(status, body)
    }
}

fn map_sign_in_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityProviderError::invalid_credentials()
        }
        _ => map_upstream_status(status, body),
    }
}

fn map_token_status(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            IdentityProviderError::invalid_token()
        }
        _ => map_upstream_status(status, body),
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://auth.example.test", "https://auth.example.test/auth/v1/user")]
    #[case("https://example.test/supabase", "https://example.test/supabase/auth/v1/user")]
    #[case("https://example.test/supabase/", "https://example.test/supabase/auth/v1/user")]
    fn endpoints_keep_base_path(#[case] base: &str, #[case] expected: &str) {
        let provider = GoTrueIdentityProvider::new(
            Url::parse(base).expect("valid base"),
            "anon-key",
            Duration::from_secs(5),
        )
        .expect("client builds");
        let url = provider.endpoint("auth/v1/user").expect("endpoint joins");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, true)]
    #[case(StatusCode::UNAUTHORIZED, true)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn sign_in_rejections_are_invalid_credentials(
        #[case] status: StatusCode,
        #[case] invalid: bool,
    ) {
        let error = map_sign_in_status(status, b"{\"error\":\"invalid_grant\"}");
        assert_eq!(
            matches!(error, IdentityProviderError::InvalidCredentials),
            invalid
        );
    }

    #[test]
    fn sign_up_client_errors_are_rejections_with_preview() {
        let error = map_sign_up_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            b"{\"msg\": \"User already registered\"}",
        );
        assert_eq!(
            error,
            IdentityProviderError::rejected("status 422: {\"msg\": \"User already registered\"}")
        );
    }

    #[test]
    fn rate_limits_are_unavailability() {
        let error = map_sign_up_status(StatusCode::TOO_MANY_REQUESTS, b"");
        assert_eq!(error, IdentityProviderError::unavailable("status 429"));
    }

    #[test]
    fn expired_tokens_are_invalid() {
        let error = map_token_status(StatusCode::UNAUTHORIZED, b"");
        assert_eq!(error, IdentityProviderError::invalid_token());
    }
}
