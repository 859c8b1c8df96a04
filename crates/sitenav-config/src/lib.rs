//! Site navigation configuration.
//!
//! Loads the declarative description of a dashboard site (title, head
//! markup, source root, display options and the sidebar tree) from
//! `sitenav.toml` or `sitenav.json`, validates it, and answers the questions
//! a site build asks of it:
//!
//! - [`NavigationConfig::resolve`]: where the content of an entry lives
//! - [`NavigationConfig::flatten`]: every entry in sidebar order
//! - [`NavigationConfig::pager`] and [`NavigationConfig::routes`]
//! - [`NavigationConfig::sidebar`]: the model a sidebar renderer consumes
//!
//! Loading is fail-fast: the first malformed item aborts the load. Duplicate
//! section names and duplicate paths are accepted.
//!
//! ## Source format
//!
//! ```toml
//! title = "Prototype"
//! head = '<link rel="icon" href="observable.png" type="image/png" sizes="32x32">'
//! root = "src"
//!
//! [[pages]]
//! name = "Overview"
//! open = true
//! [[pages.pages]]
//! name = "Portfolio Ranking Model"
//! path = "/risk/model"
//! ```
//!
//! A record with a nested `pages` list is a section; any other record is a
//! page. When `pages` is absent from a configuration file, pages are
//! discovered from the source root instead.
//!
//! ## Environment Variable Expansion
//!
//! `root` and `output` support `${VAR}` and `${VAR:-default}`.

mod expand;
mod head;
mod nav;
mod options;
mod scanner;
mod sidebar;
mod target;
mod walk;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use nav::{NavEntry, NavNode, NavSection};
pub use options::SiteOptions;
pub use scanner::{MissingSource, discover_pages, missing_sources};
pub use sidebar::{Sidebar, SidebarItem};
pub use target::{ResolvedTarget, href, resolve_entry};
pub use walk::{Entries, Pager, PagerLink, Route};

/// Configuration filenames searched for, in order of preference.
const CONFIG_FILENAMES: [&str; 2] = ["sitenav.toml", "sitenav.json"];

/// Default source root.
const DEFAULT_ROOT: &str = "src";

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct LoadSettings {
    /// Override the source root.
    pub root: Option<String>,
    /// Override the build output directory.
    pub output: Option<String>,
}

/// Declarative source syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Json,
}

impl SourceFormat {
    /// Format implied by a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The source cannot be parsed, or its structure is not a navigation tree.
    #[error("Malformed configuration: {0}")]
    MalformedSource(String),
    /// A required field is absent or empty.
    #[error("Missing field `{field}` in {owner}")]
    MissingField {
        /// Field name (`name` or `path`).
        field: &'static str,
        /// Item lacking the field (e.g. `entry "Model"`, `section #2`).
        owner: String,
    },
    /// A path is neither site-relative nor an http(s) URL.
    #[error("Invalid path \"{path}\" for entry \"{name}\": expected /path or http(s):// URL")]
    InvalidPath {
        /// Entry name.
        name: String,
        /// Offending path.
        path: String,
    },
    /// Head markup is not well-formed.
    #[error("Malformed head markup: {0}")]
    MalformedHead(String),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config key (e.g., "root").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
    /// The configuration could not be written back out.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::MalformedSource(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedSource(e.to_string())
    }
}

/// Configuration record as written in the source (every field optional).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    title: Option<String>,
    head: Option<String>,
    root: Option<String>,
    #[serde(flatten)]
    options: SiteOptions,
    pages: Option<Vec<nav::RawNavItem>>,
}

/// Validated site navigation configuration.
///
/// Immutable once loaded; share it behind an `Arc` across render workers.
/// Serializes back to the declarative source form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationConfig {
    /// Display name of the site.
    pub title: String,
    /// Opaque HTML injected into the document head.
    #[serde(rename = "head")]
    pub head_markup: String,
    /// Path under which content pages live.
    #[serde(rename = "root")]
    pub source_root: String,
    /// Display and build options.
    #[serde(flatten)]
    pub options: SiteOptions,
    /// Sidebar tree in display order.
    #[serde(rename = "pages")]
    pub navigation: Vec<NavNode>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            head_markup: String::new(),
            source_root: DEFAULT_ROOT.to_owned(),
            options: SiteOptions::default(),
            navigation: Vec::new(),
        }
    }
}

impl NavigationConfig {
    /// Parse and validate a configuration from source text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MalformedSource` if the text cannot be parsed,
    /// `ConfigError::MissingField` / `ConfigError::InvalidPath` for invalid
    /// navigation items, and `ConfigError::MalformedHead` /
    /// `ConfigError::Validation` for invalid site-level values.
    pub fn parse(source: &str, format: SourceFormat) -> Result<Self, ConfigError> {
        let raw = Self::parse_raw(source, format)?;
        Self::from_raw(raw, None)
    }

    /// Parse a TOML configuration.
    ///
    /// # Errors
    ///
    /// See [`NavigationConfig::parse`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source, SourceFormat::Toml)
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// See [`NavigationConfig::parse`].
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source, SourceFormat::Json)
    }

    /// Load configuration from file with optional override settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `sitenav.toml` / `sitenav.json` in the current directory and its
    /// parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no configuration file exists, and
    /// any error [`NavigationConfig::parse`] reports.
    pub fn load(
        config_path: Option<&Path>,
        settings: Option<&LoadSettings>,
    ) -> Result<Self, ConfigError> {
        let path = Self::locate(config_path)?;
        Self::load_from_file(&path, settings)
    }

    /// Find the configuration file to load.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the explicit path does not exist or
    /// discovery finds nothing.
    pub fn locate(config_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match config_path {
            Some(path) if path.exists() => Ok(path.to_path_buf()),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf())),
            None => {
                let cwd = std::env::current_dir()?;
                Self::discover_config(&cwd)
                    .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAMES[0])))
            }
        }
    }

    /// Load configuration from a specific file.
    ///
    /// Relative source roots are interpreted against the file's directory.
    /// When the file has no `pages` key the navigation is discovered from
    /// the source root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an unknown file extension, and
    /// any I/O or parse error.
    pub fn load_from_file(
        path: &Path,
        settings: Option<&LoadSettings>,
    ) -> Result<Self, ConfigError> {
        let format = SourceFormat::from_path(path).ok_or_else(|| {
            ConfigError::Validation(format!(
                "unsupported configuration format: {} (expected .toml or .json)",
                path.display()
            ))
        })?;
        let content = std::fs::read_to_string(path)?;
        let raw = Self::parse_raw(&content, format)?;
        let discover = raw.pages.is_none();

        let mut config = Self::from_raw(raw, settings)?;

        if discover {
            let config_dir = path.parent().unwrap_or(Path::new("."));
            let source_dir = config_dir.join(&config.source_root);
            config.navigation = discover_pages(&source_dir);
            tracing::info!(
                dir = %source_dir.display(),
                pages = config.navigation.len(),
                "No pages listed, using discovered pages"
            );
        }

        tracing::info!(
            path = %path.display(),
            entries = config.flatten().count(),
            "Loaded navigation configuration"
        );
        Ok(config)
    }

    /// Resolve an entry against this configuration's source root.
    #[must_use]
    pub fn resolve(&self, entry: &NavEntry) -> ResolvedTarget {
        resolve_entry(entry, &self.source_root)
    }

    /// Sections of the navigation tree, skipping top-level pages.
    pub fn sections(&self) -> impl Iterator<Item = &NavSection> {
        self.navigation.iter().filter_map(|node| match node {
            NavNode::Section(section) => Some(section),
            NavNode::Page(_) => None,
        })
    }

    /// Serialize back to TOML source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if TOML cannot represent the value.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Serialize back to pretty-printed JSON source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` on serializer failure.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Search for a config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            if let Some(found) = CONFIG_FILENAMES
                .iter()
                .map(|name| current.join(name))
                .find(|candidate| candidate.is_file())
            {
                return Some(found);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn parse_raw(source: &str, format: SourceFormat) -> Result<RawConfig, ConfigError> {
        Ok(match format {
            SourceFormat::Toml => toml::from_str(source)?,
            SourceFormat::Json => serde_json::from_str(source)?,
        })
    }

    /// Validate a raw record, applying overrides and env expansion first.
    fn from_raw(raw: RawConfig, settings: Option<&LoadSettings>) -> Result<Self, ConfigError> {
        let mut config = Self {
            title: raw.title.unwrap_or_default(),
            head_markup: raw.head.unwrap_or_default(),
            source_root: raw.root.unwrap_or_else(|| DEFAULT_ROOT.to_owned()),
            options: raw.options,
            navigation: nav::parse_nodes(raw.pages.unwrap_or_default())?,
        };

        if let Some(settings) = settings {
            config.apply_settings(settings);
        }
        config.expand_env_vars()?;
        config.validate()?;

        tracing::debug!(
            sections = config.sections().count(),
            entries = config.flatten().count(),
            "Parsed navigation"
        );
        for path in config.duplicate_paths() {
            tracing::debug!(path, "Path linked from several entries");
        }

        Ok(config)
    }

    fn apply_settings(&mut self, settings: &LoadSettings) {
        if let Some(root) = &settings.root {
            self.source_root.clone_from(root);
        }
        if let Some(output) = &settings.output {
            self.options.output.clone_from(output);
        }
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.source_root = expand::expand_env(&self.source_root, "root")?;
        self.options.output = expand::expand_env(&self.options.output, "output")?;
        Ok(())
    }

    /// Validate site-level values.
    ///
    /// Navigation items are validated while parsing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MalformedHead` or `ConfigError::Validation`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        head::check_head_markup(&self.head_markup)?;
        if self.source_root.starts_with("http://") || self.source_root.starts_with("https://") {
            return Err(ConfigError::Validation(
                "root must be a filesystem path, not a URL".to_owned(),
            ));
        }
        self.options.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    static_assertions::assert_impl_all!(NavigationConfig: Send, Sync, Clone);

    const DASHBOARD: &str = r#"
title = "Prototype"
head = '<link rel="icon" href="observable.png" type="image/png" sizes="32x32">'
root = "src"

[[pages]]
name = "Visualizations"
open = true
[[pages.pages]]
name = "Commitments by Origination Office"
path = "/portfolio/commitments-by-origination-office"
[[pages.pages]]
name = "E&S -008 Portfolio Summary"
path = "/portfolio/008-data-summary"

[[pages]]
name = "Data Applications"
[[pages.pages]]
name = "Key Biodiversity Areas"
path = "https://s3.us-east-1.amazonaws.com/data.exchange/insight-explorer/external/key-biodiversity-areas/index.html"

[[pages]]
name = "Overview"
[[pages.pages]]
name = "Portfolio Ranking Model"
path = "/risk/model"

[[pages]]
name = "Assessment Tools & Methods"
pages = []

[[pages]]
name = "Indices & Metrics"
open = false
[[pages.pages]]
name = "Climate Risk Index"
path = "/indicies/climate-risk-index"
"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_dashboard() {
        let config = NavigationConfig::from_toml_str(DASHBOARD).unwrap();

        assert_eq!(config.title, "Prototype");
        assert!(config.head_markup.starts_with("<link rel=\"icon\""));
        assert_eq!(config.source_root, "src");
        assert_eq!(config.options, SiteOptions::default());

        let sections: Vec<(&str, bool, usize)> = config
            .sections()
            .map(|s| (s.name.as_str(), s.open, s.pages.len()))
            .collect();
        assert_eq!(
            sections,
            vec![
                ("Visualizations", true, 2),
                ("Data Applications", true, 1),
                ("Overview", true, 1),
                ("Assessment Tools & Methods", true, 0),
                ("Indices & Metrics", false, 1),
            ]
        );
    }

    #[test]
    fn test_parse_defaults() {
        let config = NavigationConfig::from_toml_str("").unwrap();
        assert_eq!(config, NavigationConfig::default());
        assert_eq!(config.source_root, "src");
    }

    #[test]
    fn test_resolve_overview_example() {
        let config = NavigationConfig::from_json_str(
            r#"{"root": "src", "pages": [{"name": "Overview", "pages": [{"name": "Model", "path": "/risk/model"}]}]}"#,
        )
        .unwrap();

        let entry = config.flatten().next().unwrap();
        assert_eq!(
            config.resolve(entry),
            ResolvedTarget {
                local: true,
                location: "src/risk/model".to_owned(),
            }
        );
    }

    #[test]
    fn test_external_entry_excluded_from_pager() {
        let config = NavigationConfig::from_json_str(
            r#"{"pages": [{"name": "Apps", "pages": [{"name": "KBA", "path": "https://example.com/kba/index.html"}]}]}"#,
        )
        .unwrap();

        let entry = config.flatten().next().unwrap();
        assert_eq!(
            config.resolve(entry),
            ResolvedTarget {
                local: false,
                location: "https://example.com/kba/index.html".to_owned(),
            }
        );
        assert_eq!(config.pager_entries().count(), 0);
        assert!(config.routes().is_empty());
    }

    #[test]
    fn test_missing_path_fails_naming_entry() {
        let err = NavigationConfig::from_json_str(
            r#"{"pages": [{"name": "Overview", "pages": [{"name": "Model"}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "path", .. }));
        assert_eq!(err.to_string(), "Missing field `path` in entry \"Model\"");
    }

    #[test]
    fn test_malformed_source() {
        let err = NavigationConfig::from_toml_str("pages = [").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSource(_)));

        let err = NavigationConfig::from_json_str(r#"{"pages": "nope"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSource(_)));
    }

    #[test]
    fn test_malformed_head_fails_load() {
        let err = NavigationConfig::from_toml_str(r#"head = '<link rel="icon"'"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedHead(_)));
    }

    #[test]
    fn test_url_root_rejected() {
        let err = NavigationConfig::from_toml_str(r#"root = "https://example.com""#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_options_parsed_at_top_level() {
        let config = NavigationConfig::from_json_str(
            r#"{"theme": "dark", "footer": "Built here.", "pager": false, "preserveIndex": true}"#,
        )
        .unwrap();
        assert_eq!(config.options.theme, "dark");
        assert_eq!(config.options.footer.as_deref(), Some("Built here."));
        assert!(!config.options.pager);
        assert!(config.options.preserve_index);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NavigationConfig::from_toml_str(DASHBOARD).unwrap();
        let source = config.to_toml_string().unwrap();
        let reloaded = NavigationConfig::from_toml_str(&source).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_json_round_trip_with_options_and_top_level_page() {
        let mut config = NavigationConfig::from_toml_str(DASHBOARD).unwrap();
        config.options.footer = Some("Built with care.".to_owned());
        config.options.preserve_extension = true;
        config.navigation.insert(
            0,
            NavNode::Page(NavEntry {
                name: "Home".to_owned(),
                path: "/index".to_owned(),
            }),
        );

        let source = config.to_json_string().unwrap();
        let reloaded = NavigationConfig::from_json_str(&source).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_from_file_with_settings() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "sitenav.toml", DASHBOARD);

        let settings = LoadSettings {
            root: Some("content".to_owned()),
            output: Some("public".to_owned()),
        };
        let config = NavigationConfig::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.source_root, "content");
        assert_eq!(config.options.output, "public");
        assert_eq!(config.sections().count(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("sitenav.toml");
        let err = NavigationConfig::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_unknown_extension() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "sitenav.yaml", "title: x");
        let err = NavigationConfig::load_from_file(&path, None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_json_file() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "sitenav.json",
            r#"{"title": "Json", "pages": [{"name": "Home", "path": "/index"}]}"#,
        );
        let config = NavigationConfig::load_from_file(&path, None).unwrap();
        assert_eq!(config.title, "Json");
        assert_eq!(config.flatten().count(), 1);
    }

    #[test]
    fn test_load_without_pages_discovers() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/index.md", "# Home");
        write(temp.path(), "src/risk/model.md", "# Portfolio Ranking Model");
        let path = write(temp.path(), "sitenav.toml", "title = \"Auto\"");

        let config = NavigationConfig::load_from_file(&path, None).unwrap();

        assert_eq!(
            config.navigation,
            vec![NavNode::Page(NavEntry {
                name: "Portfolio Ranking Model".to_owned(),
                path: "/risk/model".to_owned(),
            })]
        );
    }

    #[test]
    fn test_load_with_empty_pages_does_not_discover() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/risk/model.md", "# Model");
        let path = write(temp.path(), "sitenav.toml", "pages = []");

        let config = NavigationConfig::load_from_file(&path, None).unwrap();
        assert!(config.navigation.is_empty());
    }

    #[test]
    fn test_discovered_config_reloads_after_save() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/-.md", "no heading");
        write(temp.path(), "src/b.md", "#\nBody text");
        let path = write(temp.path(), "sitenav.toml", "title = \"Auto\"");

        let config = NavigationConfig::load_from_file(&path, None).unwrap();
        assert_eq!(config.flatten().count(), 2);

        let source = config.to_toml_string().unwrap();
        let reloaded = NavigationConfig::from_toml_str(&source).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "sitenav.json", "{}");
        let nested = temp.path().join("src/risk");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(NavigationConfig::discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_prefers_toml() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "sitenav.json", "{}");
        let toml_path = write(temp.path(), "sitenav.toml", "");

        assert_eq!(
            NavigationConfig::discover_config(temp.path()),
            Some(toml_path)
        );
    }

    #[test]
    fn test_expand_env_in_root() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITENAV_LIB_TEST_ROOT", "docs");
        }
        let config = NavigationConfig::from_toml_str(
            r#"
root = "${SITENAV_LIB_TEST_ROOT}/pages"
output = "${SITENAV_LIB_TEST_OUTPUT_UNSET:-dist}"
"#,
        )
        .unwrap();
        assert_eq!(config.source_root, "docs/pages");
        assert_eq!(config.options.output, "dist");
        unsafe {
            std::env::remove_var("SITENAV_LIB_TEST_ROOT");
        }
    }

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/sitenav.toml")),
            Some(SourceFormat::Toml)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("sitenav.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_path(Path::new("sitenav.js")), None);
        assert_eq!(SourceFormat::from_path(Path::new("sitenav")), None);
    }
}
