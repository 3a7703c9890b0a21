// Navigation endpoints
//
// Links are addressed by their position in the server's `links` array.

use serde_json::json;
use tracing::debug;

use crate::client::{ApiClient, RequestOptions};
use crate::error::Error;
use crate::models::{LastModified, Link, Navigation, SortIndexUpdate};

impl ApiClient {
    /// Fetch links, categories and the freshness stamp.
    ///
    /// `GET /navigation`
    pub async fn get_navigation(&self) -> Result<Navigation, Error> {
        debug!("fetching navigation");
        let resp = self
            .request::<Navigation>("/navigation", RequestOptions::get())
            .await?;
        Ok(resp.data)
    }

    /// Fetch only the freshness stamp.
    ///
    /// `GET /navigation/last-modified`
    pub async fn get_last_modified(&self) -> Result<i64, Error> {
        let resp = self
            .request::<LastModified>("/navigation/last-modified", RequestOptions::get())
            .await?;
        Ok(resp.data.last_modified)
    }

    /// Append a link.
    ///
    /// `POST /navigation/add`
    pub async fn add_link(&self, link: &Link) -> Result<(), Error> {
        debug!(name = %link.name, category = %link.category, "adding link");
        let _ = self
            .request::<serde_json::Value>("/navigation/add", RequestOptions::post(json!(link)))
            .await?;
        Ok(())
    }

    /// Replace the link at `index`.
    ///
    /// `PUT /navigation/update/{index}`
    pub async fn update_link(&self, index: usize, link: &Link) -> Result<(), Error> {
        debug!(index, name = %link.name, "updating link");
        let _ = self
            .request::<serde_json::Value>(
                &format!("/navigation/update/{index}"),
                RequestOptions::put(json!(link)),
            )
            .await?;
        Ok(())
    }

    /// Remove the link at `index`.
    ///
    /// `DELETE /navigation/delete/{index}`
    pub async fn delete_link(&self, index: usize) -> Result<(), Error> {
        debug!(index, "deleting link");
        let _ = self
            .request::<serde_json::Value>(
                &format!("/navigation/delete/{index}"),
                RequestOptions::delete(),
            )
            .await?;
        Ok(())
    }

    /// Apply a batch of sort-index (and optional category) changes.
    ///
    /// `PUT /navigation/sort` with `{"updates": [...]}`
    pub async fn update_sort_indices(&self, updates: &[SortIndexUpdate]) -> Result<(), Error> {
        debug!(count = updates.len(), "updating sort indices");
        let _ = self
            .request::<serde_json::Value>(
                "/navigation/sort",
                RequestOptions::put(json!({ "updates": updates })),
            )
            .await?;
        Ok(())
    }

    /// Replace the category list.
    ///
    /// `PUT /navigation/categories` with `{"categories": [...]}`
    ///
    /// Returns the server's updated navigation document, or `None` when the
    /// server answers without a JSON body.
    pub async fn update_categories(&self, categories: &[String]) -> Result<Option<Navigation>, Error> {
        debug!(count = categories.len(), "replacing categories");
        let resp = self
            .request::<Option<Navigation>>(
                "/navigation/categories",
                RequestOptions::put(json!({ "categories": categories })),
            )
            .await?;
        Ok(resp.data)
    }
}
