//! Share lifecycle operations over the OCS share endpoint.

use log::debug;
use reqwest::Method;

use crate::api::client::{ClientError, OcsClient, OcsParams};
use crate::api::models::{ShareParam, ShareRequest, ShareResponse};

/// Share fields accepted by `update_share_by_id`, in `ShareParam::ALL` order.
pub const SHARE_PARAMS: [&str; ShareParam::ALL.len()] = {
    let mut keys = [""; ShareParam::ALL.len()];
    let mut i = 0;
    while i < keys.len() {
        keys[i] = ShareParam::ALL[i].key();
        i += 1;
    }
    keys
};

fn share_path(share_id: &str) -> String {
    format!("/{}", urlencoding::encode(share_id))
}

impl OcsClient {
    /// Creates a read-only public link share for `path`.
    pub async fn create_share(&self, path: &str) -> Result<ShareResponse, ClientError> {
        let request = ShareRequest::public_link(path);
        self.request(Method::POST, "", OcsParams::Form(request.form_params()))
            .await
    }

    pub async fn get_share_by_id(&self, share_id: &str) -> Result<ShareResponse, ClientError> {
        self.request(Method::GET, &share_path(share_id), OcsParams::None)
            .await
    }

    /// Shares on `path`, including reshares. With `subfiles` the server lists
    /// the shares of the folder's children instead.
    pub async fn get_shares(
        &self,
        path: &str,
        subfiles: bool,
    ) -> Result<ShareResponse, ClientError> {
        let query = vec![
            ("path".to_string(), path.to_string()),
            ("reshares".to_string(), "true".to_string()),
            ("subfiles".to_string(), subfiles.to_string()),
        ];
        self.request(Method::GET, "", OcsParams::Query(query)).await
    }

    /// Sends one PUT per accepted key; the API cannot update several fields
    /// in one call. Keys outside `SHARE_PARAMS` are skipped without error.
    ///
    /// Returns `true` once every request went through. Neither the HTTP
    /// status nor the OCS status is checked, so updating a share that does
    /// not exist still reports `true`.
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
        let subpath = share_path(share_id);

        for (key, value) in params {
            let Some(param) = ShareParam::from_key(key.as_ref()) else {
                debug!("[OCS] ignoring share parameter '{}'", key.as_ref());
                continue;
            };

            let form = vec![(param.key().to_string(), value.into())];
            self.request(Method::PUT, &subpath, OcsParams::Form(form))
                .await?;
        }

        Ok(true)
    }

    /// Deletes a share. Like updates, reports `true` whatever the server
    /// answered, as long as the request completed.
    pub async fn delete_share_by_id(&self, share_id: &str) -> Result<bool, ClientError> {
        self.request(Method::DELETE, &share_path(share_id), OcsParams::None)
            .await?;
        Ok(true)
    }
}
