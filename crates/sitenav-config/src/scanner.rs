//! Filesystem helpers: page discovery and source checks.
//!
//! Discovery is used when a configuration does not list its pages: every
//! markdown page under the source root is listed alphabetically by path.
//! Hidden entries and entries starting with `_` are skipped, as is the root
//! `index.md` (the home page is not part of the sidebar list).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::NavigationConfig;
use crate::nav::{NavEntry, NavNode};

static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("H1 pattern is valid"));

/// Local page whose source file does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingSource {
    /// Display label of the entry.
    pub name: String,
    /// Site path of the entry.
    pub path: String,
    /// Expected markdown file.
    pub expected: PathBuf,
}

/// List markdown pages under `source_dir` as top-level navigation pages.
///
/// Returns an empty list if the directory does not exist.
#[must_use]
pub fn discover_pages(source_dir: &Path) -> Vec<NavNode> {
    let mut pages = Vec::new();
    if source_dir.is_dir() {
        scan_directory(source_dir, "", &mut pages);
    }
    pages.sort_by(|a, b| a.path.cmp(&b.path));
    pages.retain(|page| page.path != "/index");

    tracing::debug!(count = pages.len(), dir = %source_dir.display(), "Discovered pages");
    pages.into_iter().map(NavNode::Page).collect()
}

fn scan_directory(dir: &Path, url_prefix: &str, pages: &mut Vec<NavEntry>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') || file_name.starts_with('_') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &format!("{url_prefix}/{file_name}"), pages);
        } else if let Some(stem) = file_name.strip_suffix(".md") {
            pages.push(NavEntry {
                name: title_for(&path, stem),
                path: format!("{url_prefix}/{stem}"),
            });
        }
    }
}

/// First H1 heading of the page, or a title derived from the file stem.
///
/// Never empty: entry names are required, so a discovered page must load back.
fn title_for(file: &Path, stem: &str) -> String {
    let heading = fs::read_to_string(file)
        .inspect_err(|e| {
            tracing::warn!(path = %file.display(), error = %e, "Failed to read page, using file name");
        })
        .ok()
        .and_then(|content| {
            H1.captures_iter(&content)
                .map(|caps| caps[1].trim().to_owned())
                .find(|title| !title.is_empty())
        });

    match heading.unwrap_or_else(|| titlecase_from_slug(stem)) {
        title if title.is_empty() => "Untitled".to_owned(),
        title => title,
    }
}

/// `"es-risk_monitoring"` -> `"Es Risk Monitoring"`.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Local routes whose markdown source is absent under `base_dir`.
///
/// `base_dir` is the directory the source root is relative to, normally the
/// directory holding the configuration file. External entries are never
/// checked.
#[must_use]
pub fn missing_sources(config: &NavigationConfig, base_dir: &Path) -> Vec<MissingSource> {
    config
        .routes()
        .into_iter()
        .filter(|route| !base_dir.join(&route.source).is_file())
        .map(|route| MissingSource {
            name: route.name,
            path: route.path,
            expected: base_dir.join(route.source),
        })
        .collect()
}
