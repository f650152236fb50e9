use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::{RefreshFuture, TokenRefresher};
use crate::errors::Error;
use crate::token::{TokenPair, TokenStore};

pub const OBTAIN_PATH: &str = "api/token/";
pub const REFRESH_PATH: &str = "api/token/refresh/";

#[derive(Serialize)]
struct ObtainRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access: Option<String>,
    refresh: Option<String>,
}

/// The backend's token-issuing endpoints.
///
/// Calls go straight through `reqwest` and never through the authenticated
/// client, so a failing refresh cannot recurse into another refresh.
#[derive(Clone, Debug)]
pub struct TokenEndpoint {
    http: Client,
    obtain_url: String,
    refresh_url: String,
}

impl TokenEndpoint {
    pub fn new(http: Client, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            http,
            obtain_url: format!("{base}/{OBTAIN_PATH}"),
            refresh_url: format!("{base}/{REFRESH_PATH}"),
        }
    }

    /// Exchanges credentials for a fresh pair.
    pub async fn obtain(&self, username: &str, password: &str) -> Result<TokenPair, Error> {
        let resp = self
            .http
            .post(&self.obtain_url)
            .json(&ObtainRequest { username, password })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!("login failed: user='{}' status={}", username, status);
            return Err(rejection(status, body));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)?;
        match (parsed.access, parsed.refresh) {
            (Some(access), Some(refresh)) => {
                info!("login ok: user='{}'", username);
                TokenPair::try_new(access, refresh)
            }
            _ => {
                warn!("login response missing tokens: user='{}'", username);
                Err(Error::Auth("token response did not include both tokens".into()))
            }
        }
    }

    /// Exchanges a refresh token for a new access token. Returns the new access
    /// token and, when the backend rotates it, a new refresh token.
    pub async fn refresh_access(&self, refresh: &str) -> Result<(String, Option<String>), Error> {
        let resp = self
            .http
            .post(&self.refresh_url)
            .json(&RefreshRequest { refresh })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(Error::Auth(detail_or_status(status, &body)));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)?;
        let access = parsed
            .access
            .filter(|a| !a.is_empty())
            .ok_or_else(|| Error::Auth("refresh response did not include an access token".into()))?;
        Ok((access, parsed.refresh.filter(|r| !r.is_empty())))
    }
}

impl TokenRefresher for TokenEndpoint {
    fn refresh<'a>(&'a self, store: &'a dyn TokenStore) -> RefreshFuture<'a> {
        Box::pin(async move {
            let refresh = store.refresh_token().ok_or(Error::MissingRefreshToken)?;
            let (access, rotated) = self.refresh_access(&refresh).await?;
            match rotated {
                Some(rotated) => store.set_pair(TokenPair::try_new(access, rotated)?)?,
                None => store.set(&access)?,
            }
            Ok::<(), Error>(())
        })
    }
}

fn rejection(status: StatusCode, body: String) -> Error {
    if status.is_client_error() {
        Error::Auth(detail_or_status(status, &body))
    } else {
        Error::Server { status, body }
    }
}

/// Pulls DRF's `detail` message out of an error body, falling back to the status.
pub(crate) fn detail_or_status(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.to_string())
}
