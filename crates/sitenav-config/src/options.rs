//! Site-level display and build options.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Options that sit next to `pages` in the configuration record.
///
/// Every field has a default, so an empty record is valid. Keys are written
/// in snake case; the camel-case spellings used by dashboard configs
/// (`preserveExtension`, `preserveIndex`) are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    /// Theme names, comma or space separated (e.g. `"light, wide"`).
    pub theme: String,
    /// HTML shown in the page header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// HTML shown in the page footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Whether to show the sidebar.
    pub sidebar: bool,
    /// Whether to show the table of contents.
    pub toc: bool,
    /// Whether to show previous/next links in the footer.
    pub pager: bool,
    /// Output directory of the site build.
    pub output: String,
    /// Whether to enable search.
    pub search: bool,
    /// Whether bare URLs in markdown become links.
    pub linkify: bool,
    /// Whether smart quotes and other typographic replacements apply.
    pub typographer: bool,
    /// Keep `.html` in page URLs.
    #[serde(alias = "preserveExtension")]
    pub preserve_extension: bool,
    /// Keep a trailing `/index` in page URLs.
    #[serde(alias = "preserveIndex")]
    pub preserve_index: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            theme: "default".to_owned(),
            header: None,
            footer: None,
            sidebar: true,
            toc: true,
            pager: true,
            output: "dist".to_owned(),
            search: false,
            linkify: true,
            typographer: false,
            preserve_extension: false,
            preserve_index: false,
        }
    }
}

impl SiteOptions {
    /// Individual theme names in declaration order.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.theme
            .split([',', ' '])
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Validate option values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `output` is empty or no theme is named.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output cannot be empty".to_owned()));
        }
        if self.theme_names().next().is_none() {
            return Err(ConfigError::Validation(
                "theme must name at least one theme".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_record_uses_defaults() {
        let options: SiteOptions = toml::from_str("").unwrap();
        assert_eq!(options, SiteOptions::default());
        assert!(options.sidebar);
        assert!(options.pager);
        assert!(!options.search);
        assert_eq!(options.output, "dist");
    }

    #[test]
    fn test_camel_case_aliases() {
        let options: SiteOptions =
            serde_json::from_str(r#"{"preserveExtension": true, "preserveIndex": true}"#).unwrap();
        assert!(options.preserve_extension);
        assert!(options.preserve_index);
    }

    #[test]
    fn test_theme_names_split() {
        let options = SiteOptions {
            theme: "light, wide".to_owned(),
            ..Default::default()
        };
        assert_eq!(options.theme_names().collect::<Vec<_>>(), vec!["light", "wide"]);
    }

    #[test]
    fn test_validate_empty_output() {
        let options = SiteOptions {
            output: String::new(),
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("output"));
    }

    #[test]
    fn test_validate_blank_theme() {
        let options = SiteOptions {
            theme: " , ".to_owned(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
