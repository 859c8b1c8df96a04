//! Navigation tree: sections and page entries.
//!
//! The declarative source is a list of records. A record with a nested
//! `pages` list is a section, anything else is a page entry. Records are
//! first deserialized into permissive raw structs (every field optional) and
//! then validated here, so that errors can name the offending item.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A single navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display label.
    pub name: String,
    /// Site-relative path (`/...`) or absolute `http(s)://` URL.
    pub path: String,
}

impl NavEntry {
    /// Whether the entry points outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        is_external_url(&self.path)
    }

    /// Whether the entry is resolved against the source root.
    #[must_use]
    pub fn is_local(&self) -> bool {
        !self.is_external()
    }
}

/// A named, collapsible group of entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// Section label.
    pub name: String,
    /// Whether the section is expanded by default.
    pub open: bool,
    /// Entries in sidebar order.
    pub pages: Vec<NavEntry>,
}

/// Top-level navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavNode {
    /// Group of pages.
    Section(NavSection),
    /// Page listed outside any section.
    Page(NavEntry),
}

impl NavNode {
    /// Display label of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Section(section) => &section.name,
            Self::Page(entry) => &entry.name,
        }
    }
}

/// Navigation record as written in the source, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawNavItem {
    name: Option<String>,
    path: Option<String>,
    open: Option<bool>,
    pages: Option<Vec<RawNavItem>>,
}

/// Validate raw top-level records into navigation nodes.
///
/// Fails on the first invalid record.
pub(crate) fn parse_nodes(items: Vec<RawNavItem>) -> Result<Vec<NavNode>, ConfigError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, i + 1))
        .collect()
}

fn parse_node(item: RawNavItem, position: usize) -> Result<NavNode, ConfigError> {
    let Some(pages) = item.pages else {
        let owner = format!("top-level entry #{position}");
        return parse_entry(item.name, item.path, &owner).map(NavNode::Page);
    };

    let name = require_name(item.name, || format!("section #{position}"))?;
    if item.path.is_some() {
        return Err(ConfigError::MalformedSource(format!(
            "section \"{name}\" cannot have a path; link a page inside it instead"
        )));
    }

    let pages = pages
        .into_iter()
        .enumerate()
        .map(|(i, child)| {
            if child.pages.is_some() {
                let child_name = child.name.as_deref().unwrap_or("<unnamed>");
                return Err(ConfigError::MalformedSource(format!(
                    "section \"{name}\" contains nested section \"{child_name}\"; sections may only contain pages"
                )));
            }
            let owner = format!("entry #{} in section \"{name}\"", i + 1);
            parse_entry(child.name, child.path, &owner)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NavNode::Section(NavSection {
        name,
        open: item.open.unwrap_or(true),
        pages,
    }))
}

fn parse_entry(
    name: Option<String>,
    path: Option<String>,
    owner: &str,
) -> Result<NavEntry, ConfigError> {
    let name = require_name(name, || owner.to_owned())?;
    let path = match path {
        Some(path) if !path.is_empty() => path,
        _ => {
            return Err(ConfigError::MissingField {
                field: "path",
                owner: format!("entry \"{name}\""),
            });
        }
    };
    validate_path(&name, &path)?;
    Ok(NavEntry { name, path })
}

fn require_name(name: Option<String>, owner: impl FnOnce() -> String) -> Result<String, ConfigError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ConfigError::MissingField {
            field: "name",
            owner: owner(),
        }),
    }
}

/// Check that `path` is site-relative or a well-formed http(s) URL.
fn validate_path(name: &str, path: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidPath {
        name: name.to_owned(),
        path: path.to_owned(),
    };

    if path.starts_with('/') {
        return Ok(());
    }
    if !is_external_url(path) {
        return Err(invalid());
    }
    let url = url::Url::parse(path).map_err(|_| invalid())?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

pub(crate) fn is_external_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}
