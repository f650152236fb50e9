use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::{
    AuthClient, Config, Error,
    endpoint::TokenEndpoint,
    tasks::TasksApi,
    token::{FileTokenStore, TokenStore, claims::{self, AccessClaims}},
};

/// Everything a front end needs: login/logout plus the task calls, all
/// sharing one token store.
#[derive(Clone)]
pub struct TodoClient {
    config: Config,
    store: Arc<dyn TokenStore>,
    endpoint: Arc<TokenEndpoint>,
    client: AuthClient,
    tasks: TasksApi,
}

impl TodoClient {
    /// Builds a client persisting tokens to the configured token file.
    pub fn new(config: Config) -> Result<Self, Error> {
        let store = FileTokenStore::open(config.token_path()?)?;
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;
        let endpoint = Arc::new(TokenEndpoint::new(http.clone(), &config.base_url));
        let client = AuthClient::new(http, Arc::clone(&store), endpoint.clone());
        let tasks = TasksApi::new(client.clone(), &config.base_url);
        Ok(Self {
            config,
            store,
            endpoint,
            client,
            tasks,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    pub fn tasks(&self) -> &TasksApi {
        &self.tasks
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    /// Obtains a new pair and replaces whatever the store held.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), Error> {
        let pair = self.endpoint.obtain(username, password).await?;
        self.store.set_pair(pair)?;
        Ok(())
    }

    /// Logs in with the credentials from config.
    pub async fn login_from_config(&self) -> Result<(), Error> {
        match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) => self.login(user, pass).await,
            _ => Err(Error::Config(
                "username and password are required to log in".into(),
            )),
        }
    }

    pub fn logout(&self) -> Result<(), Error> {
        self.store.clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.get().is_some()
    }

    /// Unverified claims of the stored access token.
    pub fn claims(&self) -> Result<Option<AccessClaims>, Error> {
        self.store.get().map(|t| claims::peek(&t)).transpose()
    }
}
