//! OwnCloud adapter.
//!
//! Combines a WebDAV file client with OwnCloud's OCS sharing API: public
//! link shares can be created, read, updated and deleted, and a public URL
//! can be obtained for any path. Renames go through a WebDAV `MOVE` with an
//! absolute `Destination`, which OwnCloud requires.

pub mod api;
pub mod config;
pub mod dav;
pub mod util;

pub use api::client::{ClientError, OcsClient, OcsParams};
pub use api::models::{OcsMeta, ShareEntry, ShareParam, ShareResponse, ShareType};
pub use api::shares::SHARE_PARAMS;
pub use config::settings::{Config, ConfigError, OcsConfig};
pub use dav::adapter::OwnCloudAdapter;
pub use dav::client::DavClient;
pub use dav::{DavEntry, Depth, WebDav};
