//! reqwest-backed gateway to the Directory, Groups Settings and Sheets APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{CallHandle, DirectoryApi, Method, Service, SheetSource, classify_status};
use crate::error::{FatalError, UpstreamError, UpstreamKind};

pub const DIRECTORY_BASE_URL: &str = "https://admin.googleapis.com/admin/directory/v1";
pub const GROUPS_SETTINGS_BASE_URL: &str = "https://www.googleapis.com/groups/v1";
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Service roots; overridable for testing against a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub directory: String,
    pub groups_settings: String,
    pub sheets: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            directory: DIRECTORY_BASE_URL.to_string(),
            groups_settings: GROUPS_SETTINGS_BASE_URL.to_string(),
            sheets: SHEETS_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Authenticated HTTP client shared by every worker of a batch.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    token: String,
    directory: Url,
    groups_settings: Url,
    sheets: Url,
}

fn parse_base(name: &str, raw: &str) -> Result<Url, FatalError> {
    Url::parse(raw).map_err(|e| FatalError::ServiceConstruction(format!("invalid {name} URL '{raw}': {e}")))
}

impl HttpGateway {
    pub fn new(token: impl Into<String>, endpoints: &Endpoints) -> Result<Self, FatalError> {
        let token = token.into();
        if token.is_empty() {
            return Err(FatalError::CredentialsMissing);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| FatalError::ServiceConstruction(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            directory: parse_base("directory", &endpoints.directory)?,
            groups_settings: parse_base("groups settings", &endpoints.groups_settings)?,
            sheets: parse_base("sheets", &endpoints.sheets)?,
        })
    }

    fn url(base: &Url, segments: &[String], query: &[(String, String)]) -> Result<Url, UpstreamError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::new(UpstreamKind::BadRequest, format!("'{base}' cannot be a base URL")))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, UpstreamError> {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut request = self.client.request(method, url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

fn transport_error(e: reqwest::Error) -> UpstreamError {
    let kind = if e.is_timeout() {
        UpstreamKind::Timeout
    } else {
        UpstreamKind::Transport
    };
    UpstreamError::new(kind, e.to_string())
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DirectoryApi for HttpGateway {
    async fn execute(&self, call: &CallHandle) -> Result<Value, UpstreamError> {
        let base = match call.service {
            Service::Directory => &self.directory,
            Service::GroupsSettings => &self.groups_settings,
        };
        let url = Self::url(base, &call.segments, &call.query)?;
        debug!(method = %call.method, url = %url, "executing call");
        self.send(call.method, url, call.body.as_ref()).await
    }
}

#[async_trait]
impl SheetSource for HttpGateway {
    async fn values(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, UpstreamError> {
        let segments = [
            "spreadsheets".to_string(),
            sheet_id.to_string(),
            "values".to_string(),
            range.to_string(),
        ];
        let url = Self::url(&self.sheets, &segments, &[])?;
        let value = self.send(Method::Get, url, None).await?;
        let range: ValueRange = serde_json::from_value(value)
            .map_err(|e| UpstreamError::new(UpstreamKind::BadRequest, format!("unexpected sheet response: {e}")))?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}
