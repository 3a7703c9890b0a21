//! Category command handlers.

use serde::Serialize;
use tabled::Tabled;

use navdash_core::{Route, Store};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::{enter, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CategoryView {
    name: String,
    links: usize,
    listed: bool,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Links")]
    links: usize,
    #[tabled(rename = "Listed")]
    listed: String,
}

impl From<&CategoryView> for CategoryRow {
    fn from(v: &CategoryView) -> Self {
        Self {
            name: v.name.clone(),
            links: v.links,
            listed: if v.listed { "yes".into() } else { "no".into() },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    store: &mut Store,
    args: CategoriesArgs,
    global: &GlobalOpts,
    palette: Palette,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List => {
            enter(store, Route::Nav).await?;
            let nav = store.get_navigation().await?;
            let views: Vec<CategoryView> = nav
                .grouped()
                .into_iter()
                .map(|(name, links)| CategoryView {
                    name: name.to_owned(),
                    links: links.len(),
                    listed: nav.categories.iter().any(|c| c == name),
                })
                .collect();

            let out = output::render_list(
                &global.output,
                &views,
                |v| CategoryRow::from(v),
                |v| v.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Set { categories } => {
            enter(store, Route::Edit).await?;
            for c in &categories {
                util::require_non_empty("category", c)?;
            }
            let categories = dedup(categories);
            store.get_navigation().await?;
            store.update_categories(categories).await?;
            output::print_status(&palette.ok("✓ Categories updated"), global.quiet);
            Ok(())
        }

        CategoriesCommand::Add { name } => {
            enter(store, Route::Edit).await?;
            util::require_non_empty("category", &name)?;
            let mut categories = store.get_navigation().await?.categories.clone();
            if categories.contains(&name) {
                output::print_status(
                    &palette.muted(&format!("Category '{name}' already exists")),
                    global.quiet,
                );
                return Ok(());
            }
            categories.push(name.clone());
            store.update_categories(categories).await?;
            output::print_status(&palette.ok(&format!("✓ Added category '{name}'")), global.quiet);
            Ok(())
        }

        CategoriesCommand::Remove { name } => {
            enter(store, Route::Edit).await?;
            let current = store.get_navigation().await?.categories.clone();
            if !current.contains(&name) {
                return Err(CliError::NotFound {
                    resource_type: "category".into(),
                    identifier: name,
                    list_command: "categories list".into(),
                });
            }
            let remaining: Vec<String> = current.into_iter().filter(|c| *c != name).collect();
            store.update_categories(remaining).await?;
            output::print_status(&palette.ok(&format!("✓ Removed category '{name}'")), global.quiet);
            Ok(())
        }
    }
}

/// Drop repeated names, keeping first occurrences in order.
fn dedup(categories: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for c in categories {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}
