//! Command dispatch: bridges CLI args -> route guard -> store -> output.

pub mod categories;
pub mod config_cmd;
pub mod icon;
pub mod links;
pub mod session;
pub mod status;
pub mod theme;
pub mod util;

use tracing::debug;

use navdash_core::{GuardDecision, Route, Store, before_each};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Palette;

/// Dispatch a dashboard-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    store: &mut Store,
    global: &GlobalOpts,
    palette: Palette,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(store, args, global, palette).await,
        Command::Logout(args) => session::logout(store, &args, global, palette),
        Command::Links(args) => links::handle(store, args, global, palette).await,
        Command::Categories(args) => categories::handle(store, args, global, palette).await,
        Command::Icon(args) => icon::handle(store, args, global, palette).await,
        Command::Status => {
            status::status(store, global, palette).await;
            Ok(())
        }
        Command::ServerConfig => {
            status::server_config(store, global);
            Ok(())
        }
        // Local commands are handled before dispatch
        Command::Theme(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Pass `route` through the guard, failing when it sends us to login.
pub async fn enter(store: &mut Store, route: Route) -> Result<(), CliError> {
    match before_each(store, route).await {
        GuardDecision::Proceed => Ok(()),
        GuardDecision::Redirect(Route::Login) => Err(CliError::AuthRequired),
        GuardDecision::Redirect(other) => {
            debug!(from = %route, to = %other, "guard redirect ignored");
            Ok(())
        }
    }
}
