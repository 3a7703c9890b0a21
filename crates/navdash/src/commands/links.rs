//! Link command handlers.

use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use navdash_core::{IndexedLink, Link, Route, Store};

use crate::cli::{GlobalOpts, LinksArgs, LinksCommand};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::{enter, util};

// ── Views ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkView {
    index: usize,
    category: String,
    name: String,
    url: String,
    icon: String,
    sort_index: i64,
}

impl From<IndexedLink<'_>> for LinkView {
    fn from((index, link): IndexedLink<'_>) -> Self {
        Self {
            index,
            category: link.category.clone(),
            name: link.name.clone(),
            url: link.url.clone(),
            icon: link.icon.clone(),
            sort_index: link.sort_index,
        }
    }
}

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Sort")]
    sort_index: i64,
}

impl From<&LinkView> for LinkRow {
    fn from(v: &LinkView) -> Self {
        Self {
            index: v.index,
            category: v.category.clone(),
            name: v.name.clone(),
            url: v.url.clone(),
            sort_index: v.sort_index,
        }
    }
}

fn not_found(index: usize) -> CliError {
    CliError::NotFound {
        resource_type: "link".into(),
        identifier: index.to_string(),
        list_command: "links list".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    store: &mut Store,
    args: LinksArgs,
    global: &GlobalOpts,
    palette: Palette,
) -> Result<(), CliError> {
    match args.command {
        LinksCommand::List { category } => {
            enter(store, Route::Nav).await?;
            let nav = store.get_navigation().await?;

            if let Some(ref wanted) = category {
                if !nav.categories.contains(wanted) && nav.links_in(wanted).is_empty() {
                    return Err(CliError::NotFound {
                        resource_type: "category".into(),
                        identifier: wanted.clone(),
                        list_command: "categories list".into(),
                    });
                }
            }

            let views: Vec<LinkView> = nav
                .grouped()
                .into_iter()
                .filter(|(name, _)| category.as_deref().is_none_or(|c| c == *name))
                .flat_map(|(_, links)| links.into_iter().map(LinkView::from))
                .collect();

            let orphans = nav.orphan_categories().join(", ");
            let updated = nav.last_modified_at();

            let out = output::render_list(&global.output, &views, |v| LinkRow::from(v), |v| v.url.clone());
            output::print_output(&out, global.quiet);

            if !orphans.is_empty() {
                output::print_status(
                    &palette.warn(&format!("Categories used by links but not listed: {orphans}")),
                    global.quiet,
                );
            }
            if let Some(at) = updated {
                output::print_status(
                    &palette.muted(&format!("Last modified {}", at.format("%Y-%m-%d %H:%M:%S UTC"))),
                    global.quiet,
                );
            }
            Ok(())
        }

        LinksCommand::Add {
            name,
            url,
            category,
            icon,
            fetch_icon,
        } => {
            enter(store, Route::Edit).await?;
            util::require_non_empty("name", &name)?;
            util::require_non_empty("url", &url)?;
            util::require_non_empty("category", &category)?;

            let sort_index = store.get_navigation().await?.next_sort_index(&category);

            let icon = match icon {
                Some(icon) => icon,
                None if fetch_icon => match store.fetch_icon(&url).await {
                    Ok(data_uri) => data_uri,
                    Err(e) => {
                        warn!(error = %e, "icon fetch failed, adding link without icon");
                        String::new()
                    }
                },
                None => String::new(),
            };

            let link = Link {
                name,
                url,
                icon,
                category,
                sort_index,
            };
            store.add_link(&link).await?;
            output::print_status(
                &palette.ok(&format!("✓ Added '{}' to {}", link.name, link.category)),
                global.quiet,
            );
            Ok(())
        }

        LinksCommand::Update {
            index,
            name,
            url,
            category,
            icon,
        } => {
            enter(store, Route::Edit).await?;
            let mut link = store
                .get_navigation()
                .await?
                .link(index)
                .cloned()
                .ok_or_else(|| not_found(index))?;

            if let Some(name) = name {
                util::require_non_empty("name", &name)?;
                link.name = name;
            }
            if let Some(url) = url {
                util::require_non_empty("url", &url)?;
                link.url = url;
            }
            if let Some(category) = category {
                util::require_non_empty("category", &category)?;
                link.category = category;
            }
            if let Some(icon) = icon {
                link.icon = icon;
            }

            store.update_link(index, &link).await?;
            output::print_status(
                &palette.ok(&format!("✓ Updated link #{index} ({})", link.name)),
                global.quiet,
            );
            Ok(())
        }

        LinksCommand::Delete { index } => {
            enter(store, Route::Edit).await?;
            let name = store
                .get_navigation()
                .await?
                .link(index)
                .map(|l| l.name.clone())
                .ok_or_else(|| not_found(index))?;

            if !util::confirm(&format!("Delete link '{name}'?"), "links delete", global.yes)? {
                return Ok(());
            }
            store.delete_link(index).await?;
            output::print_status(&palette.ok(&format!("✓ Deleted '{name}'")), global.quiet);
            Ok(())
        }

        LinksCommand::Move {
            index,
            position,
            category,
        } => {
            enter(store, Route::Edit).await?;
            let current = store
                .get_navigation()
                .await?
                .link(index)
                .map(|l| l.category.clone())
                .ok_or_else(|| not_found(index))?;
            let target = category.unwrap_or(current);

            let updates = store.move_link(index, &target, position).await?;
            let message = if updates.is_empty() {
                palette.muted("Already in place, nothing to do")
            } else {
                palette.ok(&format!(
                    "✓ Moved link #{index} to {target} position {position} ({} sort updates)",
                    updates.len()
                ))
            };
            output::print_status(&message, global.quiet);
            Ok(())
        }
    }
}
