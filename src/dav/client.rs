use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

use crate::api::client::ClientError;
use crate::dav::props::{parse_multistatus, PROPFIND_BODY};
use crate::dav::{DavEntry, Depth, WebDav};

const DESTINATION_HEADER: &str = "Destination";

/// reqwest-backed WebDAV client rooted at a base URL such as
/// `https://cloud.example/remote.php/webdav/`.
#[derive(Debug, Clone)]
pub struct DavClient {
    base_url: Url,
    user_name: String,
    password: String,
    http_client: reqwest::Client,
}

impl DavClient {
    pub fn new(
        base_url: &str,
        user_name: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(base_url, user_name, password, http_client)
    }

    pub fn with_http_client(
        base_url: &str,
        user_name: &str,
        password: &str,
        http_client: reqwest::Client,
    ) -> Result<Self, ClientError> {
        // a base without trailing slash would lose its last segment on join
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            ClientError::Configuration(format!("invalid WebDAV URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            base_url,
            user_name: user_name.to_string(),
            password: password.to_string(),
            http_client,
        })
    }

    fn request(&self, method: Method, location: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.absolute_url(location)?;
        debug!("[DAV] {} {}", method, url);

        Ok(self
            .http_client
            .request(method, url)
            .basic_auth(&self.user_name, Some(&self.password)))
    }

    fn extension_method(name: &str) -> Result<Method, ClientError> {
        Method::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidRequest(format!("{}: {}", name, e)))
    }

    /// Path of an `href` relative to the WebDAV root, decoded.
    fn relative_path(&self, href: &str) -> String {
        let href_path = match Url::parse(href) {
            Ok(url) => url.path().to_string(),
            Err(_) => href.to_string(),
        };

        let root = self.base_url.path();
        let relative = href_path
            .strip_prefix(root)
            .or_else(|| href_path.strip_prefix(root.trim_end_matches('/')))
            .unwrap_or(&href_path)
            .trim_matches('/');

        urlencoding::decode(relative)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| relative.to_string())
    }

    async fn send_with_destination(
        &self,
        method: &str,
        location: &str,
        destination: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .request(Self::extension_method(method)?, location)?
            .header(DESTINATION_HEADER, destination)
            .send()
            .await?;

        check_status(response, location).await.map(|_| ())
    }
}

/// Passes 2xx replies through and maps the others to errors.
async fn check_status(response: Response, location: &str) -> Result<Response, ClientError> {
    let status = response.status();
    debug!("[DAV] {} -> {}", location, status);

    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match status.as_u16() {
        404 => ClientError::NotFound {
            path: location.to_string(),
        },
        401 | 403 => ClientError::PermissionDenied(message),
        code => ClientError::Server {
            status: code,
            message,
        },
    })
}

#[async_trait]
impl WebDav for DavClient {
    fn absolute_url(&self, location: &str) -> Result<String, ClientError> {
        self.base_url
            .join(location.trim_start_matches('/'))
            .map(String::from)
            .map_err(|e| ClientError::InvalidRequest(format!("{}: {}", location, e)))
    }

    async fn get(&self, location: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.request(Method::GET, location)?.send().await?;
        let response = check_status(response, location).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn put(&self, location: &str, data: Vec<u8>) -> Result<(), ClientError> {
        let response = self
            .request(Method::PUT, location)?
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        check_status(response, location).await.map(|_| ())
    }

    async fn delete(&self, location: &str) -> Result<(), ClientError> {
        let response = self.request(Method::DELETE, location)?.send().await?;
        check_status(response, location).await.map(|_| ())
    }

    async fn mkcol(&self, location: &str) -> Result<(), ClientError> {
        let response = self
            .request(Self::extension_method("MKCOL")?, location)?
            .send()
            .await?;

        check_status(response, location).await.map(|_| ())
    }

    async fn propfind(&self, location: &str, depth: Depth) -> Result<Vec<DavEntry>, ClientError> {
        let response = self
            .request(Self::extension_method("PROPFIND")?, location)?
            .header("Depth", depth.as_str())
            .header(CONTENT_TYPE, "application/xml; charset=utf-8")
            .body(PROPFIND_BODY)
            .send()
            .await?;

        let body = check_status(response, location).await?.text().await?;

        Ok(parse_multistatus(&body)?
            .into_iter()
            .map(|(href, mut entry)| {
                entry.path = self.relative_path(&href);
                entry
            })
            .collect())
    }

    async fn move_to(&self, location: &str, destination: &str) -> Result<(), ClientError> {
        self.send_with_destination("MOVE", location, destination)
            .await
    }

    async fn copy_to(&self, location: &str, destination: &str) -> Result<(), ClientError> {
        self.send_with_destination("COPY", location, destination)
            .await
    }
}
