//! WebDAV side of the adapter.
//!
//! `WebDav` is the capability set the adapter needs from a WebDAV client.
//! `DavClient` implements it over reqwest; tests substitute a mock.

use async_trait::async_trait;
use serde::Serialize;

use crate::api::client::ClientError;

pub mod adapter;
pub mod client;
pub mod props;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Zero,
    One,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
        }
    }
}

/// One resource from a PROPFIND reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DavEntry {
    /// Decoded path relative to the WebDAV root, without leading slash.
    pub path: String,
    pub is_collection: bool,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
}

/// Operations the adapter delegates to a WebDAV client. Locations are
/// percent-encoded and relative to the WebDAV root.
///
/// Non-2xx replies map to `ClientError::NotFound` for 404,
/// `ClientError::PermissionDenied` for 401/403 and `ClientError::Server`
/// otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebDav: Send + Sync {
    /// Absolute URL of `location`, as needed in a `Destination` header.
    fn absolute_url(&self, location: &str) -> Result<String, ClientError>;

    async fn get(&self, location: &str) -> Result<Vec<u8>, ClientError>;

    async fn put(&self, location: &str, data: Vec<u8>) -> Result<(), ClientError>;

    async fn delete(&self, location: &str) -> Result<(), ClientError>;

    async fn mkcol(&self, location: &str) -> Result<(), ClientError>;

    async fn propfind(&self, location: &str, depth: Depth) -> Result<Vec<DavEntry>, ClientError>;

    /// `MOVE` with `destination` as the `Destination` header.
    async fn move_to(&self, location: &str, destination: &str) -> Result<(), ClientError>;

    /// `COPY` with `destination` as the `Destination` header.
    async fn copy_to(&self, location: &str, destination: &str) -> Result<(), ClientError>;
}
