//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Human-facing decoration goes through a [`Palette`] chosen by the theme.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use navdash_core::ThemeSurface;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

type Rgb = (u8, u8, u8);

// Dark backgrounds: neon accents
const DARK_ACCENT: Rgb = (128, 255, 234); // #80ffea
const DARK_HEADING: Rgb = (225, 53, 255); // #e135ff
const DARK_MUTED: Rgb = (189, 193, 207); // #bdc1cf
const DARK_OK: Rgb = (80, 250, 123); // #50fa7b
const DARK_WARN: Rgb = (241, 250, 140); // #f1fa8c

// Light backgrounds: same hues, darker
const LIGHT_ACCENT: Rgb = (0, 128, 128); // #008080
const LIGHT_HEADING: Rgb = (135, 0, 175); // #8700af
const LIGHT_MUTED: Rgb = (98, 114, 164); // #6272a4
const LIGHT_OK: Rgb = (0, 135, 0); // #008700
const LIGHT_WARN: Rgb = (175, 95, 0); // #af5f00

/// Terminal colours for the resolved light/dark theme.
///
/// Implements [`ThemeSurface`], so the theme controller switches it the
/// same way a browser flips its root style class.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
    dark: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            dark: true,
        }
    }

    pub fn is_dark(self) -> bool {
        self.dark
    }

    fn paint(self, text: &str, dark: Rgb, light: Rgb) -> String {
        if !self.enabled {
            return text.to_owned();
        }
        let (r, g, b) = if self.dark { dark } else { light };
        text.truecolor(r, g, b).to_string()
    }

    pub fn heading(self, text: &str) -> String {
        if !self.enabled {
            return text.to_owned();
        }
        self.paint(text, DARK_HEADING, LIGHT_HEADING).bold().to_string()
    }

    pub fn accent(self, text: &str) -> String {
        self.paint(text, DARK_ACCENT, LIGHT_ACCENT)
    }

    pub fn muted(self, text: &str) -> String {
        self.paint(text, DARK_MUTED, LIGHT_MUTED)
    }

    pub fn ok(self, text: &str) -> String {
        self.paint(text, DARK_OK, LIGHT_OK)
    }

    pub fn warn(self, text: &str) -> String {
        self.paint(text, DARK_WARN, LIGHT_WARN)
    }
}

impl ThemeSurface for Palette {
    fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }
}

/// The terminal's colour-scheme hint.
///
/// `COLORFGBG` is `fg;bg` (sometimes `fg;extra;bg`) in ANSI colour
/// numbers; backgrounds 0-6 and 8 are dark. Without a hint, assume dark.
pub fn terminal_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(parse_colorfgbg)
        .unwrap_or(true)
}

fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a status line to stderr, respecting quiet mode.
pub fn print_status(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.expect("serialization should not fail")
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
