pub mod config;
pub mod rename;
pub mod share;
pub mod url;

use anyhow::{Context, Result};
use owncloud_adapter::{Config, DavClient, OwnCloudAdapter};

pub fn load_adapter() -> Result<OwnCloudAdapter<DavClient>> {
    let config = Config::from_file()?;
    OwnCloudAdapter::from_config(&config).context("cannot set up the OwnCloud adapter")
}
