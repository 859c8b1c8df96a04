//! Mapping navigation entries to content locations and public URLs.

use std::path::PathBuf;

use serde::Serialize;

use crate::SiteOptions;
use crate::nav::NavEntry;

/// Concrete location a navigation entry points to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedTarget {
    /// True if the location is inside the source root.
    pub local: bool,
    /// Content location under the source root, or the external URL.
    pub location: String,
}

impl ResolvedTarget {
    /// Whether the target is outside the build.
    #[must_use]
    pub fn is_external(&self) -> bool {
        !self.local
    }

    /// Markdown file backing a local target.
    ///
    /// `src/a` maps to `src/a.md`, `src/a/` to `src/a/index.md`, and a
    /// trailing `.html` is replaced. External targets have no source file.
    #[must_use]
    pub fn source_file(&self) -> Option<PathBuf> {
        if !self.local {
            return None;
        }
        let location = &self.location;
        let file = if location.is_empty() || location.ends_with('/') {
            format!("{location}index.md")
        } else if let Some(stem) = location.strip_suffix(".html") {
            format!("{stem}.md")
        } else if location.ends_with(".md") {
            location.clone()
        } else {
            format!("{location}.md")
        };
        Some(PathBuf::from(file))
    }
}

/// Resolve an entry against the source root.
///
/// Local paths are appended to `source_root` with a single separator; any
/// query string or fragment is dropped since it does not name a file.
/// External URLs are returned unchanged.
#[must_use]
pub fn resolve_entry(entry: &NavEntry, source_root: &str) -> ResolvedTarget {
    if entry.is_external() {
        return ResolvedTarget {
            local: false,
            location: entry.path.clone(),
        };
    }

    let (path, _) = split_suffix(&entry.path);
    let root = source_root.trim_end_matches('/');
    let location = if root.is_empty() {
        path.trim_start_matches('/').to_owned()
    } else {
        format!("{root}{path}")
    };

    ResolvedTarget {
        local: true,
        location,
    }
}

/// Public URL of an entry as it appears in links.
///
/// External URLs are kept. Local paths lose `.html` unless
/// `preserve_extension` is set (which instead adds it to extensionless
/// pages) and lose a trailing `index` unless `preserve_index` is set.
#[must_use]
pub fn href(entry: &NavEntry, options: &SiteOptions) -> String {
    if entry.is_external() {
        return entry.path.clone();
    }

    let (path, suffix) = split_suffix(&entry.path);
    let mut path = path.strip_suffix(".html").unwrap_or(path).to_owned();

    if !options.preserve_index
        && let Some(dir) = path.strip_suffix("/index")
    {
        path = format!("{dir}/");
    }

    if options.preserve_extension && !path.ends_with('/') && !has_extension(&path) {
        path.push_str(".html");
    }

    path.push_str(suffix);
    path
}

/// Normalized local path used to match pages regardless of URL style.
pub(crate) fn page_key(path: &str) -> &str {
    let (path, _) = split_suffix(path);
    path.strip_suffix(".html").unwrap_or(path)
}

/// Split `path` into the part before `?`/`#` and the rest.
fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(i) => path.split_at(i),
        None => (path, ""),
    }
}

fn has_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}
