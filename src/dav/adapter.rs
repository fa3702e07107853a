use log::{debug, warn};

use crate::api::client::{ClientError, OcsClient};
use crate::api::models::ShareResponse;
use crate::config::settings::{Config, OcsConfig};
use crate::dav::client::DavClient;
use crate::dav::{DavEntry, Depth, WebDav};
use crate::util::path::{apply_path_prefix, encode_path, remove_path_prefix};

/// OwnCloud storage adapter: WebDAV file operations plus OCS sharing.
///
/// File operations are delegated to the wrapped `WebDav` client. Renames and
/// copies send an absolute `Destination` URL, which OwnCloud insists on.
/// Share operations go to the OCS API.
pub struct OwnCloudAdapter<D: WebDav> {
    dav: D,
    prefix: Option<String>,
    use_streamed_copy: bool,
    ocs: OcsClient,
}

impl OwnCloudAdapter<DavClient> {
    /// Builds the WebDAV and OCS clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let dav = DavClient::new(
            &config.dav_url,
            &config.user_name,
            &config.password,
            config.timeout(),
        )?;
        let ocs = match &config.ocs {
            Some(ocs) => OcsClient::new(ocs.clone(), config.timeout())?,
            None => return Err(missing_ocs_config()),
        };

        Ok(Self::with_ocs_client(
            dav,
            config.prefix.clone(),
            config.use_streamed_copy,
            ocs,
        ))
    }
}

fn missing_ocs_config() -> ClientError {
    ClientError::Configuration("Not presented OCS configuration".to_string())
}

impl<D: WebDav> OwnCloudAdapter<D> {
    /// Fails immediately when `ocs` is absent or invalid; the adapter has no
    /// anonymous mode.
    pub fn new(
        dav: D,
        prefix: Option<String>,
        use_streamed_copy: bool,
        ocs: Option<OcsConfig>,
    ) -> Result<Self, ClientError> {
        let ocs = ocs.ok_or_else(missing_ocs_config)?;
        let ocs = OcsClient::with_http_client(ocs, reqwest::Client::new())?;
        Ok(Self::with_ocs_client(dav, prefix, use_streamed_copy, ocs))
    }

    pub fn with_ocs_client(
        dav: D,
        prefix: Option<String>,
        use_streamed_copy: bool,
        ocs: OcsClient,
    ) -> Self {
        Self {
            dav,
            prefix,
            use_streamed_copy,
            ocs,
        }
    }

    pub fn dav(&self) -> &D {
        &self.dav
    }

    pub fn ocs(&self) -> &OcsClient {
        &self.ocs
    }

    fn location(&self, path: &str) -> String {
        apply_path_prefix(self.prefix.as_deref(), &encode_path(path))
    }

    /// Public URL of `path`.
    ///
    /// **Creates a new public link share on every call.** This is not a
    /// lookup: existing shares are not reused, so calling it N times leaves
    /// N shares on the server.
    pub async fn get_url(&self, path: &str) -> Result<String, ClientError> {
        Ok(self.create_share(path).await?.url)
    }

    /// Moves `path` to `new_path` with a WebDAV `MOVE`.
    ///
    /// Returns `Ok(false)` when the source does not exist or the server
    /// refuses the move. Transport failures are still returned as errors.
    pub async fn rename(&self, path: &str, new_path: &str) -> Result<bool, ClientError> {
        let location = self.location(path);
        let destination = self.dav.absolute_url(&self.location(new_path))?;

        settle(self.dav.move_to(&location, &destination).await, "rename", path)
    }

    /// Copies `path` to `new_path`. With streamed copy enabled the content
    /// is downloaded and uploaded again, otherwise a WebDAV `COPY` is sent.
    pub async fn copy(&self, path: &str, new_path: &str) -> Result<bool, ClientError> {
        let location = self.location(path);
        let new_location = self.location(new_path);

        let result = if self.use_streamed_copy {
            match self.dav.get(&location).await {
                Ok(data) => self.dav.put(&new_location, data).await,
                Err(e) => Err(e),
            }
        } else {
            let destination = self.dav.absolute_url(&new_location)?;
            self.dav.copy_to(&location, &destination).await
        };

        settle(result, "copy", path)
    }

    pub async fn read(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        self.dav.get(&self.location(path)).await
    }

    pub async fn write(&self, path: &str, data: Vec<u8>) -> Result<(), ClientError> {
        self.dav.put(&self.location(path), data).await
    }

    pub async fn delete(&self, path: &str) -> Result<bool, ClientError> {
        settle(self.dav.delete(&self.location(path)).await, "delete", path)
    }

    pub async fn create_dir(&self, path: &str) -> Result<(), ClientError> {
        self.dav.mkcol(&self.location(path)).await
    }

    pub async fn has(&self, path: &str) -> Result<bool, ClientError> {
        match self.dav.propfind(&self.location(path), Depth::Zero).await {
            Ok(_) => Ok(true),
            Err(ClientError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn get_metadata(&self, path: &str) -> Result<DavEntry, ClientError> {
        let entries = self.dav.propfind(&self.location(path), Depth::Zero).await?;

        let mut entry = entries.into_iter().next().ok_or_else(|| ClientError::NotFound {
            path: path.to_string(),
        })?;
        entry.path = remove_path_prefix(self.prefix.as_deref(), &entry.path);
        Ok(entry)
    }

    /// Direct children of `directory`; paths are relative to the prefix.
    pub async fn list_contents(&self, directory: &str) -> Result<Vec<DavEntry>, ClientError> {
        let entries = self.dav.propfind(&self.location(directory), Depth::One).await?;
        let requested = directory.trim_matches('/');

        Ok(entries
            .into_iter()
            .map(|mut entry| {
                entry.path = remove_path_prefix(self.prefix.as_deref(), &entry.path);
                entry
            })
            .filter(|entry| entry.path != requested)
            .collect())
    }

    pub async fn create_share(&self, path: &str) -> Result<ShareResponse, ClientError> {
        self.ocs.create_share(path).await
    }

    pub async fn get_share_by_id(&self, share_id: &str) -> Result<ShareResponse, ClientError> {
        self.ocs.get_share_by_id(share_id).await
    }

    pub async fn get_shares(&self, path: &str, subfiles: bool) -> Result<ShareResponse, ClientError> {
        self.ocs.get_shares(path, subfiles).await
    }

    pub async fn update_share_by_id<I, K, V>(
        &self,
        share_id: &str,
        params: I,
    ) -> Result<bool, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.ocs.update_share_by_id(share_id, params).await
    }

    pub async fn delete_share_by_id(&self, share_id: &str) -> Result<bool, ClientError> {
        self.ocs.delete_share_by_id(share_id).await
    }
}

/// Turns the outcome of a file operation into the boolean the adapter
/// reports. Missing resources and refused requests are `false`; anything
/// else stays an error.
fn settle(result: Result<(), ClientError>, operation: &str, path: &str) -> Result<bool, ClientError> {
    match result {
        Ok(()) => Ok(true),
        Err(ClientError::NotFound { .. }) => {
            debug!("[{}] '{}' not found", operation, path);
            Ok(false)
        }
        Err(e @ (ClientError::Server { .. } | ClientError::PermissionDenied(_))) => {
            warn!("[{}] '{}' failed: {}", operation, path, e);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
