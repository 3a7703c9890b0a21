//! Theme command handler and terminal theme setup.

use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use navdash_core::{StateStorage, ThemeController, ThemeMode};

use crate::cli::{GlobalOpts, ThemeArg, ThemeArgs, ThemeCommand};
use crate::error::CliError;
use crate::output::{self, Palette};

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::System => Self::System,
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Build the theme controller for this invocation.
///
/// The OS signal is the terminal's `COLORFGBG` hint. Unreadable theme
/// state is logged and replaced by the default mode.
pub fn open(state_dir: PathBuf, color: bool) -> ThemeController<Palette> {
    let os_dark = output::terminal_prefers_dark();
    let storage = StateStorage::new(state_dir);
    ThemeController::open(storage, os_dark, Palette::new(color)).unwrap_or_else(|e| {
        warn!(error = %e, "could not load theme state, using default");
        ThemeController::new(ThemeMode::default(), os_dark, Palette::new(color))
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeView {
    mode: ThemeMode,
    is_dark: bool,
    terminal_dark: bool,
}

pub fn handle(
    args: ThemeArgs,
    theme: &mut ThemeController<Palette>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command.unwrap_or(ThemeCommand::Show) {
        ThemeCommand::Show => {}
        ThemeCommand::Toggle => {
            theme.toggle_theme();
            theme.save()?;
        }
        ThemeCommand::Set { mode } => {
            theme.set_mode(mode.into());
            theme.save()?;
        }
    }

    let view = ThemeView {
        mode: theme.mode(),
        is_dark: theme.is_dark(),
        terminal_dark: theme.os_dark(),
    };
    let palette = *theme.surface();
    let out = output::render_single(
        &global.output,
        &view,
        |v| {
            let resolved = if v.is_dark { "dark" } else { "light" };
            format!(
                "{} {} {}",
                palette.heading(&v.mode.to_string()),
                palette.muted("→"),
                palette.accent(resolved)
            )
        },
        |v| v.mode.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
