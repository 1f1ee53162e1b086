use crate::domain::{
    Endpoint, IdentityTransport, ProviderReply, TransportFailure, TransportFailureKind,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

// Thin wrapper around reqwest for the provider's account endpoints.
#[derive(Clone)]
pub struct IdentityToolkitClient {
    http: Client,
    sign_up_url: Url,
    verify_password_url: Url,
}

#[derive(Debug)]
pub enum ClientError {
    InvalidBaseUrl(String),
    Build(reqwest::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidBaseUrl(reason) => {
                write!(f, "invalid identity base url: {reason}")
            }
            ClientError::Build(err) => write!(f, "failed to build http client: {err}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl IdentityToolkitClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            sign_up_url: endpoint_url(base_url, Endpoint::SignUp, api_key)?,
            verify_password_url: endpoint_url(base_url, Endpoint::VerifyPassword, api_key)?,
        })
    }

    fn url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::SignUp => &self.sign_up_url,
            Endpoint::VerifyPassword => &self.verify_password_url,
        }
    }
}

// Resolve `{base}/{endpoint}?key={api_key}` once so calls only clone a parsed url.
fn endpoint_url(base_url: &str, endpoint: Endpoint, api_key: &str) -> Result<Url, ClientError> {
    let base = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl(format!(
            "unsupported scheme {:?}",
            base.scheme()
        )));
    }
    let mut url = base;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidBaseUrl(format!("{base_url} cannot carry a path")))?
        .pop_if_empty()
        .push(endpoint.path());
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

// Strip the url from reqwest errors so the api key never reaches logs.
fn transport_failure(err: reqwest::Error) -> TransportFailure {
    let kind = if err.is_timeout() {
        TransportFailureKind::Timeout
    } else if err.is_connect() {
        TransportFailureKind::Connect
    } else {
        TransportFailureKind::Other
    };
    TransportFailure::new(kind, err.without_url().to_string())
}

#[async_trait]
impl IdentityTransport for IdentityToolkitClient {
    async fn post_json(
        &self,
        endpoint: Endpoint,
        body: Value,
    ) -> Result<ProviderReply, TransportFailure> {
        let res = self
            .http
            .post(self.url(endpoint).clone())
            .json(&body)
            .send()
            .await
            .map_err(transport_failure)?;
        let status = res.status().as_u16();

        // Read the whole body before handing it back; partial bodies are never decoded.
        let body = res.text().await.map_err(transport_failure)?;

        Ok(ProviderReply { status, body })
    }
}
