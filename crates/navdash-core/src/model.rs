// ── Navigation cache and display ordering ──
//
// Links keep their server position as identity; display order within a
// category is `sort_index`, with position breaking ties so duplicate
// indices still produce a stable order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use navdash_api::{Link, Navigation, SortIndexUpdate};

use crate::error::CoreError;

/// A link paired with its server position.
pub type IndexedLink<'a> = (usize, &'a Link);

/// The cached navigation document.
///
/// Replaced as a whole whenever the server's stamp changes; never
/// patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCache {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Stamp of the document the cache was filled from. `None` until the
    /// first fetch, and again after logout.
    #[serde(default)]
    pub last_modified: Option<i64>,
}

impl From<Navigation> for NavigationCache {
    fn from(nav: Navigation) -> Self {
        Self {
            links: nav.links,
            categories: nav.categories,
            last_modified: Some(nav.last_modified),
        }
    }
}

impl NavigationCache {
    /// Whether the cache holds a fetched document with this stamp.
    pub fn is_fresh(&self, server_stamp: i64) -> bool {
        self.last_modified == Some(server_stamp)
    }

    /// The stamp as a UTC timestamp (the server writes Unix milliseconds).
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified
            .filter(|ms| *ms > 0)
            .and_then(DateTime::from_timestamp_millis)
    }

    pub fn link(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    /// Links of one category in display order.
    pub fn links_in(&self, category: &str) -> Vec<IndexedLink<'_>> {
        let mut links: Vec<IndexedLink<'_>> = self
            .links
            .iter()
            .enumerate()
            .filter(|(_, l)| l.category == category)
            .collect();
        links.sort_by_key(|(pos, l)| (l.sort_index, *pos));
        links
    }

    /// Categories in list order with their links in display order.
    ///
    /// Categories used by links but missing from the list are appended in
    /// first-seen order so no link is ever hidden.
    pub fn grouped(&self) -> Vec<(&str, Vec<IndexedLink<'_>>)> {
        let mut names: Vec<&str> = Vec::with_capacity(self.categories.len());
        for c in &self.categories {
            if !names.contains(&c.as_str()) {
                names.push(c);
            }
        }
        for c in self.orphan_categories() {
            names.push(c);
        }
        names
            .into_iter()
            .map(|name| (name, self.links_in(name)))
            .collect()
    }

    /// Categories referenced by links but absent from the category list.
    pub fn orphan_categories(&self) -> Vec<&str> {
        let mut orphans: Vec<&str> = Vec::new();
        for link in &self.links {
            let c = link.category.as_str();
            if !self.categories.iter().any(|k| k == c) && !orphans.contains(&c) {
                orphans.push(c);
            }
        }
        orphans
    }

    /// Listed categories that no link uses.
    pub fn unused_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| !self.links.iter().any(|l| &l.category == *c))
            .map(String::as_str)
            .collect()
    }

    /// Categories that `replacement` would drop while links still use them.
    pub fn categories_in_use_missing_from(&self, replacement: &[String]) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for link in &self.links {
            let c = link.category.as_str();
            if !c.is_empty() && !replacement.iter().any(|r| r == c) && !missing.contains(&c) {
                missing.push(c);
            }
        }
        missing
    }

    /// Sort index that places a new link last in `category`.
    pub fn next_sort_index(&self, category: &str) -> i64 {
        self.links_in(category)
            .iter()
            .map(|(_, l)| l.sort_index.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Plan the sort-index batch that moves the link at `index` into
    /// `category` at display `position`.
    ///
    /// The target category is renumbered densely from 0. When the link
    /// changes category, its former siblings are renumbered as well.
    /// Only entries whose values actually change are emitted.
    pub fn plan_move(
        &self,
        index: usize,
        category: &str,
        position: usize,
    ) -> Result<Vec<SortIndexUpdate>, CoreError> {
        let moved = self.links.get(index).ok_or(CoreError::LinkNotFound {
            index,
            count: self.links.len(),
        })?;
        let changes_category = moved.category != category;

        let mut target: Vec<usize> = self
            .links_in(category)
            .into_iter()
            .map(|(pos, _)| pos)
            .filter(|pos| *pos != index)
            .collect();
        let slot = position.min(target.len());
        target.insert(slot, index);

        let mut updates = Vec::new();
        for (rank, pos) in target.into_iter().enumerate() {
            let sort_index = rank_to_index(rank);
            let link = &self.links[pos];
            if pos == index && changes_category {
                updates.push(SortIndexUpdate {
                    index: pos,
                    sort_index,
                    category: Some(category.to_owned()),
                });
            } else if link.sort_index != sort_index {
                updates.push(SortIndexUpdate {
                    index: pos,
                    sort_index,
                    category: None,
                });
            }
        }

        if changes_category {
            let siblings = self
                .links_in(&moved.category)
                .into_iter()
                .filter(|(pos, _)| *pos != index);
            for (rank, (pos, link)) in siblings.enumerate() {
                let sort_index = rank_to_index(rank);
                if link.sort_index != sort_index {
                    updates.push(SortIndexUpdate {
                        index: pos,
                        sort_index,
                        category: None,
                    });
                }
            }
        }

        Ok(updates)
    }
}

fn rank_to_index(rank: usize) -> i64 {
    i64::try_from(rank).unwrap_or(i64::MAX)
}
