// Wire types for the dashboard API
//
// Field names follow the server's camelCase JSON. The server writes nil
// slices as `null`, so list fields accept `null` as empty.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single bookmark.
///
/// The server identifies links by their position in its `links` array;
/// `sort_index` only orders links for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub name: String,
    pub url: String,
    /// Icon URL or `data:` URI.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sort_index: i64,
}

/// Full navigation document: `GET /navigation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// Server freshness stamp (Unix milliseconds). 0 when never written.
    #[serde(default)]
    pub last_modified: i64,
}

/// `GET /navigation/last-modified`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastModified {
    #[serde(default)]
    pub last_modified: i64,
}

/// One entry of a bulk reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortIndexUpdate {
    /// Server position of the link.
    pub index: usize,
    pub sort_index: i64,
    /// Move the link to this category as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Server feature flags: `GET /config`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    /// Anyone may use the dashboard without logging in.
    #[serde(default)]
    pub enable_no_auth: bool,
    /// Anyone may *view* the navigation without logging in.
    #[serde(default)]
    pub enable_no_auth_view: bool,
}

/// Username/password pair for `POST /login`.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IconResponse {
    #[serde(default)]
    pub icon_data: String,
}

/// A decoded `data:<mime>;base64,<payload>` icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl IconData {
    /// Split and decode a base64 data URI as returned by `/get-icon`.
    pub fn parse(data_uri: &str) -> Result<Self, Error> {
        let rest = data_uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::InvalidIconData {
                reason: "missing `data:` prefix".into(),
            })?;
        let (meta, payload) = rest.split_once(',').ok_or_else(|| Error::InvalidIconData {
            reason: "missing `,` separator".into(),
        })?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| Error::InvalidIconData {
                reason: "payload is not base64-encoded".into(),
            })?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::InvalidIconData {
                reason: e.to_string(),
            })?;

        Ok(Self {
            mime_type: if mime_type.is_empty() {
                "application/octet-stream".into()
            } else {
                mime_type.into()
            },
            bytes,
        })
    }

    /// Conventional file extension for the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/svg+xml" => "svg",
            "image/gif" => "gif",
            "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
            "image/webp" => "webp",
            _ => "bin",
        }
    }
}
