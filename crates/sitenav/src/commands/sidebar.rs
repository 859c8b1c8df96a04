//! `sitenav sidebar` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.config.load()?;

        match loaded.config.sidebar() {
            Some(sidebar) => output.data(&serde_json::to_string_pretty(&sidebar)?),
            None => output.warning("Sidebar is disabled (sidebar = false)"),
        }
        Ok(())
    }
}
