//! Client-side state for the navdash dashboard, between `navdash-api` and
//! the CLI.
//!
//! - **[`Store`]**: owns the session token, the navigation cache and the
//!   server's feature flags. Fetches navigation conditionally on the
//!   server's `lastModified` stamp, and logs out on any 401.
//!
//! - **[`ThemeController`]**: light / dark / system theme mode, pushed onto
//!   a [`ThemeSurface`] and following OS colour-scheme changes.
//!
//! - **[`before_each`]**: the route guard deciding whether a [`Route`] may be
//!   entered, based on the session and the server's no-auth flags.
//!
//! - **[`StateStorage`]**: versioned JSON documents in a state directory,
//!   reset when the schema version changes.

pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod persist;
pub mod store;
pub mod theme;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DashboardConfig, TlsVerification};
pub use error::CoreError;
pub use guard::{GuardDecision, Route, before_each};
pub use model::{IndexedLink, NavigationCache};
pub use persist::StateStorage;
pub use store::Store;
pub use theme::{ThemeController, ThemeMode, ThemeSurface, resolve_dark};

// Wire types callers need to drive the store.
pub use navdash_api::{IconData, Link, LoginCredentials, RemoteConfig, SortIndexUpdate};
