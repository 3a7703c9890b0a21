// ── Session and navigation store ──
//
// Single owner of the session token, the navigation cache and the
// server's feature flags. Every API call goes through here so that a
// 401 from any endpoint ends in the same logout. State is written with
// an explicit `save()` after each change and read back with `load()`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use navdash_api::transport::{TlsMode, TransportConfig};
use navdash_api::{ApiClient, Link, LoginCredentials, RemoteConfig, Session, SortIndexUpdate};

use crate::config::{DashboardConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::NavigationCache;
use crate::persist::StateStorage;

/// Storage key of the main store document.
pub const STORE_KEY: &str = "main";
/// Schema version of the main store document.
pub const STORE_VERSION: u32 = 2;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedStore {
    #[serde(default)]
    token: Option<String>,
    #[serde(flatten)]
    navigation: NavigationCache,
    #[serde(default)]
    config: RemoteConfig,
}

/// The dashboard's client-side state.
///
/// Created once at startup with [`Store::open`] (or [`Store::connect`])
/// and disposed with [`Store::close`]. The [`Session`] inside is shared
/// with the [`ApiClient`], so the client's 401 handling and the store's
/// token are always the same cell.
pub struct Store {
    client: ApiClient,
    storage: Option<StateStorage>,
    navigation: NavigationCache,
    config: RemoteConfig,
}

impl Store {
    /// An empty store around `client`. Nothing is loaded.
    pub fn new(client: ApiClient, storage: Option<StateStorage>) -> Self {
        Self {
            client,
            storage,
            navigation: NavigationCache::default(),
            config: RemoteConfig::default(),
        }
    }

    /// Create a store and rehydrate it from `storage`.
    pub fn open(client: ApiClient, storage: Option<StateStorage>) -> Result<Self, CoreError> {
        let mut store = Self::new(client, storage);
        store.load()?;
        Ok(store)
    }

    /// Build the HTTP client from `config`, then [`open`](Self::open).
    pub fn connect(config: &DashboardConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = ApiClient::new(config.api_base.clone(), Session::new(), &transport)?;
        let storage = config.state_dir.clone().map(StateStorage::new);
        Self::open(client, storage)
    }

    /// Persist and dispose of the store.
    pub fn close(self) -> Result<(), CoreError> {
        self.save()
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Replace in-memory state with the persisted document, if any.
    ///
    /// Returns whether a document was found. A document from another
    /// schema version is treated as absent.
    pub fn load(&mut self) -> Result<bool, CoreError> {
        let Some(storage) = &self.storage else {
            return Ok(false);
        };
        let Some(persisted) = storage.load::<PersistedStore>(STORE_KEY, STORE_VERSION)? else {
            return Ok(false);
        };

        self.client
            .session()
            .set_token(persisted.token.map(SecretString::from));
        self.navigation = persisted.navigation;
        self.config = persisted.config;
        debug!(
            links = self.navigation.links.len(),
            authenticated = self.is_authenticated(),
            "store rehydrated"
        );
        Ok(true)
    }

    /// Write the current state. A store without storage is a no-op.
    pub fn save(&self) -> Result<(), CoreError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let persisted = PersistedStore {
            token: self.token().map(|t| t.expose_secret().to_owned()),
            navigation: self.navigation.clone(),
            config: self.config,
        };
        storage.save(STORE_KEY, STORE_VERSION, &persisted)
    }

    /// Save, logging instead of failing. Used where the caller has no
    /// way to act on a persistence failure.
    fn save_quietly(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist store state (non-fatal)");
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn token(&self) -> Option<SecretString> {
        self.client.session().token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    pub fn navigation(&self) -> &NavigationCache {
        &self.navigation
    }

    pub fn links(&self) -> &[Link] {
        &self.navigation.links
    }

    pub fn categories(&self) -> &[String] {
        &self.navigation.categories
    }

    pub fn last_modified(&self) -> Option<i64> {
        self.navigation.last_modified
    }

    pub fn config(&self) -> RemoteConfig {
        self.config
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Replace the session token and persist.
    pub fn set_token(&mut self, token: Option<String>) -> Result<(), CoreError> {
        self.client
            .session()
            .set_token(token.map(SecretString::from));
        self.save()
    }

    /// Drop the token and the cached links.
    ///
    /// Categories and server flags are kept; the freshness stamp is reset
    /// so the next [`get_navigation`](Self::get_navigation) refetches the
    /// links that were just dropped.
    pub fn logout(&mut self) {
        info!("logging out");
        self.client.session().clear();
        self.navigation.links.clear();
        self.navigation.last_modified = None;
        self.save_quietly();
    }

    /// Authenticate and start a session.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<(), CoreError> {
        let result = self.client.login(credentials).await;
        let token = self.check(result)?;
        self.set_token(Some(token))?;
        info!(username = %credentials.username, "logged in");
        Ok(())
    }

    /// Whether the current session is still accepted by the server.
    ///
    /// Without a token this answers `false` without touching the network.
    /// Any failure of the probe ends the session.
    pub async fn validate_token(&mut self) -> bool {
        if !self.is_authenticated() {
            debug!("no token, skipping validation");
            return false;
        }

        match self.client.validate_token().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "token validation failed");
                self.logout();
                false
            }
        }
    }

    // ── Server flags ─────────────────────────────────────────────────

    /// Refresh the server's feature flags.
    ///
    /// Never fails: on error the last-known flags are kept and returned.
    pub async fn fetch_config(&mut self) -> RemoteConfig {
        let result = self.client.get_config().await;
        match self.check(result) {
            Ok(config) => {
                debug!(?config, "remote config fetched");
                if config != self.config {
                    self.config = config;
                    self.save_quietly();
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch remote config, keeping last-known flags");
            }
        }
        self.config
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Return the navigation, fetching it only if the server's stamp moved.
    ///
    /// The stamp is checked first; when it matches the cache no further
    /// request is made. Otherwise links, categories and stamp are replaced
    /// together from one full fetch.
    pub async fn get_navigation(&mut self) -> Result<&NavigationCache, CoreError> {
        let result = self.client.get_last_modified().await;
        let stamp = self.check(result)?;

        if self.navigation.is_fresh(stamp) {
            debug!(stamp, "navigation cache is fresh");
            return Ok(&self.navigation);
        }

        let result = self.client.get_navigation().await;
        let nav = self.check(result)?;
        debug!(
            cached = ?self.navigation.last_modified,
            fetched = nav.last_modified,
            links = nav.links.len(),
            "navigation replaced"
        );
        self.navigation = NavigationCache::from(nav);
        self.save_quietly();
        Ok(&self.navigation)
    }

    pub async fn add_link(&mut self, link: &Link) -> Result<(), CoreError> {
        let result = self.client.add_link(link).await;
        self.check(result)
    }

    pub async fn update_link(&mut self, index: usize, link: &Link) -> Result<(), CoreError> {
        let result = self.client.update_link(index, link).await;
        self.check(result)
    }

    pub async fn delete_link(&mut self, index: usize) -> Result<(), CoreError> {
        let result = self.client.delete_link(index).await;
        self.check(result)
    }

    pub async fn update_sort_indices(&mut self, updates: &[SortIndexUpdate]) -> Result<(), CoreError> {
        if updates.is_empty() {
            debug!("no sort changes to send");
            return Ok(());
        }
        let result = self.client.update_sort_indices(updates).await;
        self.check(result)
    }

    /// Move the link at `index` into `category` at display `position`,
    /// renumbering the affected categories.
    ///
    /// Planned against the cached navigation, so call
    /// [`get_navigation`](Self::get_navigation) first. Returns the batch
    /// that was sent.
    pub async fn move_link(
        &mut self,
        index: usize,
        category: &str,
        position: usize,
    ) -> Result<Vec<SortIndexUpdate>, CoreError> {
        let updates = self.navigation.plan_move(index, category, position)?;
        self.update_sort_indices(&updates).await?;
        Ok(updates)
    }

    /// Replace the category list.
    ///
    /// Refuses locally to drop a category that cached links still use.
    /// When the server answers with the updated document, the cache is
    /// replaced with it.
    pub async fn update_categories(&mut self, categories: Vec<String>) -> Result<(), CoreError> {
        let in_use = self.navigation.categories_in_use_missing_from(&categories);
        if !in_use.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: format!("cannot remove categories still in use: {}", in_use.join(", ")),
            });
        }

        let result = self.client.update_categories(&categories).await;
        if let Some(nav) = self.check(result)? {
            self.navigation = NavigationCache::from(nav);
            self.save_quietly();
        }
        Ok(())
    }

    /// Ask the server for a website's icon, as a `data:` URI.
    pub async fn fetch_icon(&mut self, url: &str) -> Result<String, CoreError> {
        let result = self.client.get_website_icon(url).await;
        self.check(result)
    }

    /// Translate an API result, logging out on 401.
    fn check<T>(&mut self, result: Result<T, navdash_api::Error>) -> Result<T, CoreError> {
        result.map_err(|e| {
            if e.is_unauthorized() {
                self.logout();
            }
            CoreError::from(e)
        })
    }
}

fn build_transport(config: &DashboardConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
