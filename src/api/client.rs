use log::debug;
use reqwest::Method;
use std::time::Duration;

use crate::api::models::ShareResponse;
use crate::api::xml::parse_ocs_response;
use crate::config::settings::OcsConfig;

/// Header the OCS API requires on every request.
pub const OCS_API_REQUEST_HEADER: &str = "OCS-APIRequest";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    ResponseParse(String),

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Parameters attached to an OCS request: a form body for POST/PUT, a
/// query string for GET.
#[derive(Debug, Clone, Default)]
pub enum OcsParams {
    #[default]
    None,
    Form(Vec<(String, String)>),
    Query(Vec<(String, String)>),
}

/// Authenticated client for the OCS share endpoint.
///
/// The client keeps no share state between calls.
#[derive(Debug, Clone)]
pub struct OcsClient {
    config: OcsConfig,
    http_client: reqwest::Client,
}

impl OcsClient {
    pub fn new(config: OcsConfig, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(config, http_client)
    }

    /// Uses a caller-built HTTP client, e.g. one with its own timeout or
    /// proxy settings.
    pub fn with_http_client(
        config: OcsConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, ClientError> {
        config
            .validate()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &OcsConfig {
        &self.config
    }

    /// The share API URL as configured for `""`, otherwise joined with
    /// `subpath` without doubling the slash.
    fn build_url(&self, subpath: &str) -> String {
        if subpath.is_empty() {
            return self.config.share_api.clone();
        }

        format!("{}{}", self.config.share_api.trim_end_matches('/'), subpath)
    }

    /// Sends one request to `{shareApi}{subpath}` and parses the reply.
    ///
    /// HTTP status codes are not interpreted here: any reply, error or not,
    /// is parsed and returned, with its status in `http_status`.
    pub async fn request(
        &self,
        method: Method,
        subpath: &str,
        params: OcsParams,
    ) -> Result<ShareResponse, ClientError> {
        let url = self.build_url(subpath);
        debug!("[OCS] {} {}", method, url);

        let mut request = self
            .http_client
            .request(method, &url)
            .basic_auth(&self.config.user_name, Some(&self.config.password))
            .header(OCS_API_REQUEST_HEADER, "true");

        request = match &params {
            OcsParams::None => request,
            OcsParams::Form(form) => request.form(form),
            OcsParams::Query(query) => request.query(query),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("[OCS] {} -> {} ({} bytes)", url, status, body.len());

        let mut parsed = parse_ocs_response(&body)?;
        parsed.http_status = Some(status.as_u16());
        Ok(parsed)
    }
}
