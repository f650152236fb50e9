use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;

use crate::errors::Error;

pub const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";

/// Everything needed to issue one HTTP call.
///
/// `body` is always an already-encoded string. The client never serializes it
/// again; use [`RequestDescriptor::json`] to encode a value exactly once.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn options(url: impl Into<String>) -> Self {
        Self::new(Method::OPTIONS, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a pre-encoded body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and defaults the content type to JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_string(value)?);
        if self.header_value(CONTENT_TYPE).is_none() {
            self.headers
                .insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        }
        Ok(self)
    }

    /// Case-insensitive header lookup.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replaces any `Authorization` header, whatever its casing.
    pub(crate) fn set_bearer(&mut self, token: &str) {
        self.clear_bearer();
        self.headers
            .insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
    }

    /// Drops any `Authorization` header, whatever its casing.
    pub(crate) fn clear_bearer(&mut self) {
        self.headers
            .retain(|k, _| !k.eq_ignore_ascii_case(AUTHORIZATION));
    }

    pub(crate) fn build(
        &self,
        http: &reqwest::Client,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| Error::InvalidRequest(format!("invalid url '{}': {}", self.url, e)))?;
        let mut builder = http.request(self.method.clone(), url);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &self.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}
