//! Sidebar model handed to the renderer.

use serde::Serialize;

use crate::NavigationConfig;
use crate::nav::{NavEntry, NavNode};
use crate::target;

/// Sidebar contents for a site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// Site title shown above the links.
    pub title: String,
    /// Items in sidebar order.
    pub items: Vec<SidebarItem>,
}

/// Sidebar element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SidebarItem {
    /// Single link.
    Link {
        title: String,
        href: String,
        /// Opens outside the site.
        external: bool,
    },
    /// Collapsible group of links. May be empty.
    Group {
        title: String,
        /// Expanded on first render.
        open: bool,
        items: Vec<SidebarItem>,
    },
}

impl NavigationConfig {
    /// Build the sidebar, or `None` if the sidebar is turned off.
    #[must_use]
    pub fn sidebar(&self) -> Option<Sidebar> {
        if !self.options.sidebar {
            return None;
        }

        let items = self
            .navigation
            .iter()
            .map(|node| match node {
                NavNode::Page(entry) => self.link(entry),
                NavNode::Section(section) => SidebarItem::Group {
                    title: section.name.clone(),
                    open: section.open,
                    items: section.pages.iter().map(|entry| self.link(entry)).collect(),
                },
            })
            .collect();

        Some(Sidebar {
            title: self.title.clone(),
            items,
        })
    }

    fn link(&self, entry: &NavEntry) -> SidebarItem {
        SidebarItem::Link {
            title: entry.name.clone(),
            href: target::href(entry, &self.options),
            external: entry.is_external(),
        }
    }
}
