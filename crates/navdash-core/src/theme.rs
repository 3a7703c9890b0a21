// ── Theme controller ──
//
// Three modes: `system` follows the OS colour scheme, `light` and `dark`
// pin it. The resolved darkness is pushed onto a `ThemeSurface` on
// construction and on every change, so the first thing rendered already
// uses the right palette.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::persist::StateStorage;

/// Storage key of the theme document.
pub const THEME_KEY: &str = "theme";
/// Schema version of the theme document.
pub const THEME_VERSION: u32 = 1;

/// User-selected theme mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    /// The next mode in the toggle cycle: system → light → dark → system.
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }
}

/// Whether `mode` renders dark given the OS preference.
pub fn resolve_dark(mode: ThemeMode, os_dark: bool) -> bool {
    match mode {
        ThemeMode::System => os_dark,
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
    }
}

/// Whatever renders the theme: a document root, a terminal palette.
pub trait ThemeSurface {
    fn set_dark(&mut self, dark: bool);
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedTheme {
    mode: ThemeMode,
}

/// Owns the theme mode and keeps a [`ThemeSurface`] in sync with it.
pub struct ThemeController<S> {
    mode: ThemeMode,
    is_dark: bool,
    os_dark: bool,
    surface: S,
    storage: Option<StateStorage>,
}

impl<S: ThemeSurface> ThemeController<S> {
    /// A controller in `mode`, applied to `surface` immediately.
    pub fn new(mode: ThemeMode, os_dark: bool, surface: S) -> Self {
        let mut controller = Self {
            mode,
            is_dark: false,
            os_dark,
            surface,
            storage: None,
        };
        controller.apply_theme();
        controller
    }

    /// A controller whose mode is rehydrated from `storage`.
    ///
    /// A missing or stale document starts in [`ThemeMode::System`].
    pub fn open(storage: StateStorage, os_dark: bool, surface: S) -> Result<Self, CoreError> {
        let mode = storage
            .load::<PersistedTheme>(THEME_KEY, THEME_VERSION)?
            .map(|t| t.mode)
            .unwrap_or_default();
        let mut controller = Self::new(mode, os_dark, surface);
        controller.storage = Some(storage);
        Ok(controller)
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn os_dark(&self) -> bool {
        self.os_dark
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Recompute darkness and push it to the surface.
    pub fn apply_theme(&mut self) {
        self.is_dark = resolve_dark(self.mode, self.os_dark);
        self.surface.set_dark(self.is_dark);
        debug!(mode = %self.mode, dark = self.is_dark, "theme applied");
    }

    /// Advance to the next mode and apply it.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Select `mode` directly and apply it. Call [`save`](Self::save) to
    /// persist the choice.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.apply_theme();
    }

    /// Record a new OS preference. Only re-applies in system mode.
    pub fn on_os_change(&mut self, os_dark: bool) {
        self.os_dark = os_dark;
        if self.mode == ThemeMode::System {
            self.apply_theme();
        }
    }

    /// Follow OS preference changes until the sender is dropped.
    pub async fn follow_os(&mut self, mut rx: watch::Receiver<bool>) {
        while rx.changed().await.is_ok() {
            let os_dark = *rx.borrow_and_update();
            self.on_os_change(os_dark);
        }
        debug!("os theme signal closed");
    }

    /// Persist the mode. A controller without storage is a no-op.
    pub fn save(&self) -> Result<(), CoreError> {
        match &self.storage {
            Some(storage) => storage.save(THEME_KEY, THEME_VERSION, &PersistedTheme { mode: self.mode }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<bool>,
    }

    impl ThemeSurface for Recorder {
        fn set_dark(&mut self, dark: bool) {
            self.calls.push(dark);
        }
    }

    #[test]
    fn applied_on_construction() {
        let theme = ThemeController::new(ThemeMode::Dark, false, Recorder::default());
        assert!(theme.is_dark());
        assert_eq!(theme.surface().calls, vec![true]);
    }

    #[test]
    fn toggle_cycles_through_modes() {
        let mut theme = ThemeController::new(ThemeMode::System, true, Recorder::default());
        assert!(theme.is_dark());

        assert_eq!(theme.toggle_theme(), ThemeMode::Light);
        assert!(!theme.is_dark());
        assert_eq!(theme.toggle_theme(), ThemeMode::Dark);
        assert!(theme.is_dark());
        assert_eq!(theme.toggle_theme(), ThemeMode::System);
        assert!(theme.is_dark());

        assert_eq!(theme.surface().calls, vec![true, false, true, true]);
    }

    #[test]
    fn resolve_dark_table() {
        for mode in ThemeMode::iter() {
            for os in [false, true] {
                let expected = match mode {
                    ThemeMode::System => os,
                    ThemeMode::Light => false,
                    ThemeMode::Dark => true,
                };
                assert_eq!(resolve_dark(mode, os), expected, "{mode} os_dark={os}");
            }
        }
    }

    #[test]
    fn os_change_ignored_when_pinned() {
        let mut theme = ThemeController::new(ThemeMode::Light, false, Recorder::default());
        theme.on_os_change(true);
        assert!(!theme.is_dark());
        assert_eq!(theme.surface().calls.len(), 1);

        theme.set_mode(ThemeMode::System);
        assert!(theme.is_dark());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!(ThemeMode::from_str("Dark").unwrap(), ThemeMode::Dark);
        assert_eq!(ThemeMode::System.to_string(), "system");
        assert!(ThemeMode::from_str("sepia").is_err());
    }

    #[test]
    fn mode_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StateStorage::new(dir.path());

        let mut theme = ThemeController::open(storage.clone(), false, Recorder::default()).unwrap();
        assert_eq!(theme.mode(), ThemeMode::System);
        theme.set_mode(ThemeMode::Dark);
        assert!(!storage.path_for(THEME_KEY).exists());
        theme.save().unwrap();

        let reopened = ThemeController::open(storage, false, Recorder::default()).unwrap();
        assert_eq!(reopened.mode(), ThemeMode::Dark);
        assert!(reopened.is_dark());
    }

    #[tokio::test]
    async fn follows_os_signal_in_system_mode() {
        let (tx, rx) = watch::channel(false);
        let mut theme = ThemeController::new(ThemeMode::System, false, Recorder::default());

        let driver = async move {
            tx.send(true).unwrap();
            tokio::task::yield_now().await;
            drop(tx);
        };
        tokio::join!(theme.follow_os(rx), driver);

        assert!(theme.is_dark());
        assert!(theme.os_dark());
    }
}
