//! `sitenav pager` command implementation.

use clap::Args;
use sitenav_config::{Pager, PagerLink};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pager command.
#[derive(Args)]
pub(crate) struct PagerArgs {
    /// Site path of the page (e.g. /risk/model).
    path: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl PagerArgs {
    /// Execute the pager command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the page is
    /// not in the navigation.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.config.load()?;

        if !loaded.config.options.pager {
            output.warning("Pager is disabled (pager = false)");
            return Ok(());
        }

        let pager = loaded.config.pager(&self.path).ok_or_else(|| {
            CliError::Validation(format!("{} is not a local page in the navigation", self.path))
        })?;

        for line in pager_lines(&pager) {
            output.data(&line);
        }
        Ok(())
    }
}

/// `prev` and `next` lines, `-` for a missing neighbour.
fn pager_lines(pager: &Pager) -> [String; 2] {
    let line = |label: &str, link: Option<&PagerLink>| match link {
        Some(link) => format!("{label}: {} ({})", link.name, link.href),
        None => format!("{label}: -"),
    };
    [
        line("prev", pager.prev.as_ref()),
        line("next", pager.next.as_ref()),
    ]
}
