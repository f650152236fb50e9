use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::{
    AuthClient, Error,
    client::TokenRefresher,
    request::RequestDescriptor,
    retry::{OperationKind, RetryEvent, RetryMachine, RetryOutcome, RetryState},
    telemetry::refresh::RefreshTrace,
    token::TokenStore,
};

impl AuthClient {
    pub fn new(
        http: Client,
        store: Arc<dyn TokenStore>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            http,
            store,
            refresher,
        }
    }

    pub fn http_client(&self) -> &Client {
        &self.http
    }

    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    /// Sends `descriptor` with the stored bearer token.
    ///
    /// A 401 triggers one refresh; if it succeeds the request is reissued once
    /// with the new token and that second response is returned whatever its
    /// status. If the refresh fails the original 401 is returned. Every other
    /// response comes back untouched. Transport failures are `Error::Network`.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<Response, Error> {
        self.send_as(OperationKind::Request, descriptor).await
    }

    pub async fn send_as(
        &self,
        operation: OperationKind,
        mut descriptor: RequestDescriptor,
    ) -> Result<Response, Error> {
        let start = Instant::now();
        let mut machine = RetryMachine::new();
        loop {
            let response = self.attempt(operation, &mut descriptor, &machine).await?;
            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(self.finish(operation, &machine, response, start));
            }
            if machine.advance(RetryEvent::Unauthorized).is_none() {
                warn!(
                    operation = %operation,
                    status = 401,
                    url = %descriptor.url,
                    "request.unauthorized after retry; giving up"
                );
                return Ok(self.finish(operation, &machine, response, start));
            }
            warn!(
                operation = %operation,
                status = 401,
                url = %descriptor.url,
                "request.unauthorized; refreshing access token"
            );
            if self.refresh(operation).await.is_err() {
                return Ok(self.finish(operation, &machine, response, start));
            }
            machine.advance(RetryEvent::Refreshed);
        }
    }

    async fn attempt(
        &self,
        operation: OperationKind,
        descriptor: &mut RequestDescriptor,
        machine: &RetryMachine,
    ) -> Result<Response, Error> {
        // Read at call time; a concurrent refresh may have replaced it.
        let token = self.store.get();
        match token.as_deref() {
            Some(token) => descriptor.set_bearer(token),
            // Only a token read from the store just now is ever attached.
            None => descriptor.clear_bearer(),
        }
        debug!(
            operation = %operation,
            method = %descriptor.method,
            url = %descriptor.url,
            authenticated = token.is_some(),
            retry = machine.state() == RetryState::Retried,
            "request.send"
        );
        let response = descriptor.build(&self.http)?.send().await?;
        Ok(response)
    }

    async fn refresh(&self, operation: OperationKind) -> Result<(), Error> {
        let trace = RefreshTrace::begin(operation);
        match self.refresher.refresh(self.store.as_ref()).await {
            Ok(()) => {
                trace.succeeded(self.store.get().map_or(0, |t| t.len()));
                Ok(())
            }
            Err(err) => {
                trace.failed(&err);
                Err(err)
            }
        }
    }

    fn finish(
        &self,
        operation: OperationKind,
        machine: &RetryMachine,
        response: Response,
        start: Instant,
    ) -> Response {
        RetryOutcome {
            operation,
            attempts: machine.attempts(),
            refreshed: machine.state() == RetryState::Retried,
            status: response.status().as_u16(),
            elapsed: start.elapsed(),
        }
        .log();
        response
    }
}
