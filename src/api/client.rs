//! HTTP client with token header injection and a mock/live switch.
//!
//! Every live request carries `Authorization: <token>` with the token read
//! from the session at call time (no `Bearer` prefix, no refresh). Replies are
//! returned as untyped JSON; classifying `success: false` is left to callers.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;

use super::envelope::EnvelopeMode;
use super::error::ApiError;
use super::mock;
use crate::config::ApiConfig;
use crate::session::Session;

/// Which backend answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiMode {
    /// Real HTTP against the configured base URL.
    #[default]
    Live,
    /// Canned in-process responses; the network is never touched.
    Mock,
}

/// HTTP client wrapper for the ticketing API.
pub struct ApiClient {
    client: Client,
    base_url: String,
    mode: ApiMode,
    envelope: EnvelopeMode,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            mode: config.mode,
            envelope: config.envelope,
            session,
        }
    }

    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// GET a path relative to the base URL.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        match self.mode {
            ApiMode::Mock => Ok(mock::mock_get(path)),
            ApiMode::Live => {
                let url = format!("{}{}", self.base_url, path);
                log::debug!("GET {}", url);

                let resp = self
                    .client
                    .get(&url)
                    .header(AUTHORIZATION, self.session.token()?)
                    .send()
                    .await?;
                self.read_body(resp).await
            }
        }
    }

    /// POST a JSON body to a path relative to the base URL.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, ApiError> {
        match self.mode {
            ApiMode::Mock => Ok(mock::mock_post(path, &serde_json::to_value(body)?)),
            ApiMode::Live => {
                let url = format!("{}{}", self.base_url, path);
                log::debug!("POST {}", url);

                let resp = self
                    .client
                    .post(&url)
                    .header(AUTHORIZATION, self.session.token()?)
                    .json(body)
                    .send()
                    .await?;
                self.read_body(resp).await
            }
        }
    }

    /// Parse the reply as JSON regardless of status; the backend puts its
    /// error reporting in the body.
    async fn read_body(&self, resp: Response) -> Result<Value, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            log::debug!("Backend answered {}", status);
        }
        let outer: Value = serde_json::from_slice(&bytes)?;
        Ok(self.envelope.apply(outer))
    }
}
