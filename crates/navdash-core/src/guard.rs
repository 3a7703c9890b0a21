// ── Route guard ──
//
// Decides whether a navigation to a named route may proceed. Uses the
// store's last-known server flags; call `Store::fetch_config` first so
// they are current.

use strum::{Display, EnumString};
use tracing::debug;

use crate::store::Store;

/// A named entry point of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    /// The login screen. Public.
    Login,
    /// The navigation view. Anonymous viewing can be enabled server-side.
    Nav,
    /// Link and category editing.
    Edit,
}

impl Route {
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Whether the server's anonymous-view flag opens this route.
    pub fn allows_anonymous_view(self) -> bool {
        matches!(self, Self::Nav)
    }
}

/// Outcome of [`before_each`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(Route),
}

/// Gate a navigation to `to`.
///
/// Protected routes pass when the server disables auth (or allows
/// anonymous viewing of a viewable route); otherwise the token is
/// validated and a failure redirects to [`Route::Login`]. Entering the
/// login route with a valid token redirects to [`Route::Nav`].
pub async fn before_each(store: &mut Store, to: Route) -> GuardDecision {
    let config = store.config();

    let decision = if to.requires_auth() {
        let open = config.enable_no_auth || (to.allows_anonymous_view() && config.enable_no_auth_view);
        if open || store.validate_token().await {
            GuardDecision::Proceed
        } else {
            GuardDecision::Redirect(Route::Login)
        }
    } else if to == Route::Login && store.is_authenticated() && store.validate_token().await {
        GuardDecision::Redirect(Route::Nav)
    } else {
        GuardDecision::Proceed
    };

    debug!(route = %to, ?decision, "route guard");
    decision
}
