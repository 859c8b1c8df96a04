//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod pager;
pub(crate) mod routes;
pub(crate) mod sidebar;

use std::path::{Path, PathBuf};

use clap::Args;
use sitenav_config::{LoadSettings, NavigationConfig};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use pager::PagerArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use sidebar::SidebarArgs;

/// Configuration selection shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml or sitenav.json).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Source root (overrides config).
    #[arg(long)]
    root: Option<String>,
}

/// Loaded configuration together with the directory it was read from.
pub(crate) struct Loaded {
    pub(crate) config: NavigationConfig,
    pub(crate) path: PathBuf,
}

impl Loaded {
    /// Directory the source root is relative to.
    pub(crate) fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

impl ConfigArgs {
    /// Locate and load the configuration.
    pub(crate) fn load(&self) -> Result<Loaded, CliError> {
        let path = NavigationConfig::locate(self.config.as_deref())?;
        tracing::debug!(path = %path.display(), "Using configuration file");
        let settings = LoadSettings {
            root: self.root.clone(),
            output: None,
        };
        let config = NavigationConfig::load_from_file(&path, Some(&settings))?;
        Ok(Loaded { config, path })
    }
}
