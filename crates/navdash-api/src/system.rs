// Server configuration and icon proxy endpoints

use tracing::debug;

use crate::client::{ApiClient, RequestOptions};
use crate::error::Error;
use crate::models::{IconResponse, RemoteConfig};

impl ApiClient {
    /// Fetch the server's feature flags. Does not require a session.
    ///
    /// `GET /config`
    pub async fn get_config(&self) -> Result<RemoteConfig, Error> {
        debug!("fetching remote config");
        let resp = self
            .request::<RemoteConfig>("/config", RequestOptions::get())
            .await?;
        Ok(resp.data)
    }

    /// Ask the server to fetch a website's favicon.
    ///
    /// `GET /get-icon?url={url}`
    ///
    /// Returns the icon as a `data:` URI; see
    /// [`IconData::parse`](crate::IconData::parse) to decode it.
    pub async fn get_website_icon(&self, url: &str) -> Result<String, Error> {
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        debug!(url, "fetching website icon");
        let resp = self
            .request::<IconResponse>(&format!("/get-icon?url={encoded}"), RequestOptions::get())
            .await?;
        if resp.data.icon_data.is_empty() {
            return Err(Error::InvalidIconData {
                reason: "server returned no icon data".into(),
            });
        }
        Ok(resp.data.icon_data)
    }
}
