//! Login / logout handlers.

use std::io::{BufRead, IsTerminal};

use dialoguer::Input;
use secrecy::SecretString;
use tracing::debug;

use navdash_core::{GuardDecision, LoginCredentials, Route, Store, before_each};

use crate::cli::{GlobalOpts, LoginArgs, LogoutArgs};
use crate::config;
use crate::error::CliError;
use crate::output::{self, Palette};

use super::util;

pub async fn login(
    store: &mut Store,
    args: LoginArgs,
    global: &GlobalOpts,
    palette: Palette,
) -> Result<(), CliError> {
    if !args.force && before_each(store, Route::Login).await == GuardDecision::Redirect(Route::Nav) {
        output::print_status(
            &palette.muted("Already logged in (use --force to log in again)"),
            global.quiet,
        );
        return Ok(());
    }

    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // 1. Username (flag/env > profile > prompt)
    let username = match args
        .username
        .or_else(|| profile.and_then(navdash_config::resolve_username))
    {
        Some(u) => u,
        None if std::io::stdin().is_terminal() => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(util::prompt_err)?,
        None => return Err(CliError::NoCredentials { profile: profile_name }),
    };
    util::require_non_empty("username", &username)?;

    // 2. Password (stdin > credential chain > prompt)
    let password = if args.password_stdin {
        read_password_stdin()?
    } else if let Some(pw) =
        profile.and_then(|p| navdash_config::resolve_password(p, &profile_name).ok())
    {
        debug!(profile = %profile_name, "using configured password");
        pw
    } else if std::io::stdin().is_terminal() {
        SecretString::from(rpassword::prompt_password("Password: ").map_err(util::prompt_err)?)
    } else {
        return Err(CliError::NoCredentials { profile: profile_name });
    };

    let credentials = LoginCredentials::new(username, password);
    store.login(&credentials).await.map_err(|e| match CliError::from(e) {
        CliError::AuthRequired => CliError::AuthFailed {
            profile: profile_name.clone(),
            message: "invalid username or password".into(),
        },
        CliError::AuthFailed { message, .. } => CliError::AuthFailed {
            profile: profile_name.clone(),
            message,
        },
        other => other,
    })?;

    output::print_status(
        &palette.ok(&format!("✓ Logged in as {}", credentials.username)),
        global.quiet,
    );
    Ok(())
}

fn read_password_stdin() -> Result<SecretString, CliError> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    util::require_non_empty("password", &password)?;
    Ok(SecretString::from(password))
}

pub fn logout(
    store: &mut Store,
    args: &LogoutArgs,
    global: &GlobalOpts,
    palette: Palette,
) -> Result<(), CliError> {
    store.logout();

    if args.forget {
        let cfg = config::load_config_or_default();
        let profile_name = config::active_profile_name(global, &cfg);
        navdash_config::delete_password(&profile_name)?;
        output::print_status(
            &palette.muted(&format!("Removed keyring password for profile '{profile_name}'")),
            global.quiet,
        );
    }

    output::print_status(&palette.ok("✓ Logged out"), global.quiet);
    Ok(())
}
