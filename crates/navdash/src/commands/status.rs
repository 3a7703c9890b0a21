//! Status and server-config handlers.

use std::fmt::Write as _;

use serde::Serialize;

use navdash_core::{RemoteConfig, Store};

use crate::cli::GlobalOpts;
use crate::output::{self, Palette};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    api_base: String,
    session: &'static str,
    cached_links: usize,
    cached_categories: usize,
    last_modified: Option<String>,
    enable_no_auth: bool,
    enable_no_auth_view: bool,
}

/// Validate the session and summarize cached state.
pub async fn status(store: &mut Store, global: &GlobalOpts, palette: Palette) {
    let had_token = store.is_authenticated();
    let valid = store.validate_token().await;
    let session = match (had_token, valid) {
        (_, true) => "valid",
        (true, false) => "expired",
        (false, false) => "none",
    };

    let config = store.config();
    let nav = store.navigation();
    let view = StatusView {
        api_base: store.client().base_url().to_string(),
        session,
        cached_links: nav.links.len(),
        cached_categories: nav.categories.len(),
        last_modified: nav.last_modified_at().map(|t| t.to_rfc3339()),
        enable_no_auth: config.enable_no_auth,
        enable_no_auth_view: config.enable_no_auth_view,
    };

    let out = output::render_single(
        &global.output,
        &view,
        |v| render_status(v, palette),
        |v| v.session.to_owned(),
    );
    output::print_output(&out, global.quiet);
}

fn render_status(v: &StatusView, palette: Palette) -> String {
    let session = match v.session {
        "valid" => palette.ok(v.session),
        _ => palette.warn(v.session),
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.heading("navdash"));
    let _ = writeln!(out, "  {} {}", label(palette, "API"), palette.accent(&v.api_base));
    let _ = writeln!(out, "  {} {session}", label(palette, "Session"));
    let _ = writeln!(
        out,
        "  {} {} links in {} categories",
        label(palette, "Cache"),
        v.cached_links,
        v.cached_categories
    );
    let _ = writeln!(
        out,
        "  {} {}",
        label(palette, "Last modified"),
        v.last_modified.as_deref().unwrap_or("never")
    );
    let _ = write!(
        out,
        "  {} no-auth={} no-auth-view={}",
        label(palette, "Server flags"),
        v.enable_no_auth,
        v.enable_no_auth_view
    );
    out
}

fn label(palette: Palette, text: &str) -> String {
    palette.muted(&format!("{text:<14}"))
}

/// Print the server flags fetched at startup.
pub fn server_config(store: &Store, global: &GlobalOpts) {
    let config: RemoteConfig = store.config();
    let out = output::render_single(
        &global.output,
        &config,
        |c| {
            format!(
                "enableNoAuth:     {}\nenableNoAuthView: {}",
                c.enable_no_auth, c.enable_no_auth_view
            )
        },
        |c| format!("{} {}", c.enable_no_auth, c.enable_no_auth_view),
    );
    output::print_output(&out, global.quiet);
}
