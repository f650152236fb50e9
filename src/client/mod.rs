use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use reqwest::Client;

use crate::errors::Error;
use crate::token::TokenStore;

mod impls;

pub type RefreshFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// Obtains a new access token and writes it into `store`.
///
/// Any error (transport failure, rejected refresh token, nothing to refresh
/// with) means the refresh failed.
pub trait TokenRefresher: Send + Sync {
    fn refresh<'a>(&'a self, store: &'a dyn TokenStore) -> RefreshFuture<'a>;
}

/// HTTP client that attaches the stored bearer token and, on a 401, refreshes
/// it once and reissues the request once.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    store: Arc<dyn TokenStore>,
    refresher: Arc<dyn TokenRefresher>,
}
