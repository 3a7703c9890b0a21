//! CLI configuration: thin wrapper around `navdash_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-base, --insecure, --state-dir, ...).

use std::path::PathBuf;
use std::time::Duration;

use navdash_core::{DashboardConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use navdash_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Where persisted state lives for this invocation (flag > profile > default).
pub fn resolve_state_dir(global: &GlobalOpts, config: &Config) -> PathBuf {
    let profile_name = active_profile_name(global, config);
    global
        .state_dir
        .clone()
        .or_else(|| {
            config
                .profiles
                .get(&profile_name)
                .and_then(|p| p.state_dir.clone())
        })
        .unwrap_or_else(|| navdash_config::state_dir(&profile_name))
}

/// Build a `DashboardConfig` from the config file, profile, and CLI overrides.
pub fn resolve_dashboard_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<DashboardConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut dashboard = match (config.profiles.get(&profile_name), global.api_base.as_deref()) {
        // Profile present: flags override its values
        (Some(profile), api_base) => {
            let mut cfg =
                navdash_config::profile_to_dashboard_config(profile, &profile_name, &config.defaults)?;
            if let Some(raw) = api_base {
                cfg.api_base = navdash_config::parse_api_base(raw)?;
            }
            if let Some(secs) = global.timeout {
                cfg.timeout = Duration::from_secs(secs);
            }
            cfg
        }

        // No profile: build from flags / env alone
        (None, Some(raw)) => {
            let mut cfg = DashboardConfig::new(navdash_config::parse_api_base(raw)?);
            cfg.timeout = Duration::from_secs(global.timeout.unwrap_or(config.defaults.timeout));
            if config.defaults.insecure {
                cfg.tls = TlsVerification::DangerAcceptInvalid;
            }
            cfg
        }

        (None, None) => {
            if global.profile.is_some() {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: available_profiles(config),
                });
            }
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if global.insecure {
        dashboard.tls = TlsVerification::DangerAcceptInvalid;
    }
    dashboard.state_dir = Some(resolve_state_dir(global, config));

    Ok(dashboard)
}
