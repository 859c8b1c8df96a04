//! Flat traversal of the navigation tree: entries, pager, route table.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::NavigationConfig;
use crate::nav::{NavEntry, NavNode};
use crate::target::{self, page_key};

/// Entries of a navigation tree in document order.
///
/// Created by [`NavigationConfig::flatten`]. The iterator borrows the tree
/// and is cheap to clone, so a consumer can restart from any position.
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    nodes: std::slice::Iter<'a, NavNode>,
    section: std::slice::Iter<'a, NavEntry>,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(nodes: &'a [NavNode]) -> Self {
        Self {
            nodes: nodes.iter(),
            section: Default::default(),
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a NavEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.section.next() {
                return Some(entry);
            }
            match self.nodes.next()? {
                NavNode::Page(entry) => return Some(entry),
                NavNode::Section(section) => self.section = section.pages.iter(),
            }
        }
    }
}

impl std::iter::FusedIterator for Entries<'_> {}

/// Link shown in the page footer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PagerLink {
    /// Display label.
    pub name: String,
    /// Public URL.
    pub href: String,
}

/// Previous and next links around a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PagerLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PagerLink>,
}

/// Local page served by the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Site path of the page, without query or fragment.
    pub path: String,
    /// Markdown source relative to the configuration directory.
    pub source: PathBuf,
    /// Display label of the first entry linking the page.
    pub name: String,
}

impl NavigationConfig {
    /// All entries in document order.
    ///
    /// Top-level pages and section pages appear in the order they are
    /// listed; sections contribute their entries in place.
    #[must_use]
    pub fn flatten(&self) -> Entries<'_> {
        Entries::new(&self.navigation)
    }

    /// Entries eligible for the pager: local pages only.
    pub fn pager_entries(&self) -> impl Iterator<Item = &NavEntry> + Clone {
        self.flatten().filter(|entry| entry.is_local())
    }

    /// Previous/next links for the page at `path`.
    ///
    /// Returns `None` when the pager is disabled or no local entry links
    /// `path`. Duplicate paths use the first occurrence.
    #[must_use]
    pub fn pager(&self, path: &str) -> Option<Pager> {
        if !self.options.pager {
            return None;
        }

        let key = page_key(path);
        let pages: Vec<&NavEntry> = self.pager_entries().collect();
        let index = pages.iter().position(|entry| page_key(&entry.path) == key)?;

        let link = |entry: &NavEntry| PagerLink {
            name: entry.name.clone(),
            href: target::href(entry, &self.options),
        };

        Some(Pager {
            prev: index.checked_sub(1).map(|i| link(pages[i])),
            next: pages.get(index + 1).map(|entry| link(entry)),
        })
    }

    /// Route table of local pages in document order.
    ///
    /// External entries are excluded. When several entries link the same
    /// page the first one names the route.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        let mut seen = HashSet::new();
        let mut routes = Vec::new();

        for entry in self.pager_entries() {
            let key = page_key(&entry.path);
            if !seen.insert(key) {
                tracing::debug!(path = %entry.path, name = %entry.name, "Skipping duplicate route");
                continue;
            }
            let Some(source) = self.resolve(entry).source_file() else {
                continue;
            };
            routes.push(Route {
                path: key.to_owned(),
                source,
                name: entry.name.clone(),
            });
        }

        routes
    }

    /// Paths linked by more than one entry, in order of first repetition.
    #[must_use]
    pub fn duplicate_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in self.flatten() {
            let path = entry.path.as_str();
            if !seen.insert(path) && !duplicates.contains(&path) {
                duplicates.push(path);
            }
        }
        duplicates
    }
}
