pub mod config;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::debug;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::offering::{OfferingPayload, ServiceOffering, OFFERING_PATH};
use crate::types::profession::{Profession, ProfessionPayload, PROFESSION_PATH};
use crate::types::raw::{ListBody, RemoveOutcome};
use crate::types::user::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};

const MIME_JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    client: reqwest::Client,
    token: Option<String>,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Network error: {0}")]
    Network(#[from] anyhow::Error),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: code {code}, {message}")]
    Server { code: u16, message: String },

    #[error("Server returned invalid json: {0:?}")]
    InvalidJson(String),
}

impl RequestError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestError::Server { code, .. } if *code == StatusCode::UNAUTHORIZED)
    }
}

/// A REST collection under a fixed path with the
/// list/create/update/delete contract.
pub trait Resource: Serialize + DeserializeOwned {
    /// Path segment under the server root.
    const PATH: &'static str;

    /// Body sent on create and update.
    type Payload: Serialize;
}

impl Resource for Profession {
    const PATH: &'static str = PROFESSION_PATH;
    type Payload = ProfessionPayload;
}

impl Resource for ServiceOffering {
    const PATH: &'static str = OFFERING_PATH;
    type Payload = OfferingPayload;
}

impl Client {
    pub fn connect(url: &str, read_timeout_secs: u64) -> Result<Self> {
        let url = url.trim_end_matches('/');
        let parsed = match Url::parse(url) {
            Ok(url) => url,
            Err(_) => bail!("invalid server url '{url}'"),
        };
        match parsed.scheme() {
            "http" | "https" => {}
            _ => bail!(
                "invalid url scheme, expect 'http' or 'https', not '{}'",
                parsed.scheme()
            ),
        }

        if parsed.path() != "/" {
            bail!(
                "invalid server url, path should be '/', not '{}'",
                parsed.path()
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(read_timeout_secs))
            .build()
            .context("build http client")?;

        Ok(Client {
            url: url.to_string(),
            client,
            token: None,
        })
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, RequestError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let json = encode_body(&payload)?;
        self.do_request_json(Method::POST, "login", Some(json), &[])
            .await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<UserProfile, RequestError> {
        let json = encode_body(req)?;
        self.do_request_json(Method::POST, "users", Some(json), &[])
            .await
    }

    /// GET `/{path}/?{query}`. The body may be a bare array or an object
    /// with an `items` field, empty query values are not sent.
    pub async fn list_resources<T>(&self, query: &[(&str, String)]) -> Result<Vec<T>, RequestError>
    where
        T: Resource,
    {
        let path = format!("{}/", T::PATH);
        let body: ListBody<T> = self
            .do_request_json(Method::GET, &path, None, query)
            .await?;
        Ok(body.into_vec())
    }

    pub async fn create_resource<T>(&self, payload: &T::Payload) -> Result<T, RequestError>
    where
        T: Resource,
    {
        let path = format!("{}/", T::PATH);
        let json = encode_body(payload)?;
        self.do_request_json(Method::POST, &path, Some(json), &[])
            .await
    }

    pub async fn update_resource<T>(
        &self,
        id: &str,
        payload: &T::Payload,
    ) -> Result<T, RequestError>
    where
        T: Resource,
    {
        let path = format!("{}/{id}", T::PATH);
        let json = encode_body(payload)?;
        self.do_request_json(Method::PUT, &path, Some(json), &[])
            .await
    }

    /// DELETE `/{path}/{id}`. The server answers with an outcome object
    /// when it disables instead of deleting, or an empty body.
    pub async fn remove_resource<T>(&self, id: &str) -> Result<RemoveOutcome, RequestError>
    where
        T: Resource,
    {
        let path = format!("{}/{id}", T::PATH);
        let text = self.do_request(Method::DELETE, &path, None, &[]).await?;
        if text.trim().is_empty() {
            return Ok(RemoveOutcome::default());
        }
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    async fn do_request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        query: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let text = self.do_request(method, path, body, query).await?;
        match serde_json::from_str(&text) {
            Ok(data) => Ok(data),
            Err(_) => Err(RequestError::InvalidJson(text)),
        }
    }

    async fn do_request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        query: &[(&str, String)],
    ) -> Result<String, RequestError> {
        let mut url = format!("{}/{}", self.url, path);
        let kvs: Vec<String> = query
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        if !kvs.is_empty() {
            url = format!("{url}?{}", kvs.join("&"));
        }
        debug!("Request {method} {url}");

        let mut req = self.client.request(method, &url);
        if let Some(json) = body {
            req = req.header("Content-Type", MIME_JSON).body(json);
        }
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req = req.header("Accept", MIME_JSON);

        let req = match req.build() {
            Ok(req) => req,
            Err(e) => return Err(RequestError::Client(format!("build request failed: {e:#}"))),
        };

        let resp = match self.client.execute(req).await {
            Ok(resp) => resp,
            Err(e) => return Err(RequestError::Network(e.into())),
        };

        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => return Err(RequestError::Network(e.into())),
        };

        if !status.is_success() {
            return Err(RequestError::Server {
                code: status.as_u16(),
                message: extract_message(&text, status),
            });
        }

        Ok(text)
    }
}

fn encode_body<T: Serialize>(payload: &T) -> Result<String, RequestError> {
    match serde_json::to_string(payload) {
        Ok(json) => Ok(json),
        Err(e) => Err(RequestError::Client(format!("encode request body: {e}"))),
    }
}

/// Pull a human message out of an error body. The backend is not
/// consistent about the field name.
fn extract_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    format!("HTTP {}", status.as_u16())
}
