//! `sitenav routes` command implementation.

use clap::Args;
use sitenav_config::Route;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print the route table as JSON.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.config.load()?;
        let routes = loaded.config.routes();

        if self.json {
            output.data(&serde_json::to_string_pretty(&routes)?);
            return Ok(());
        }

        for line in route_table(&routes) {
            output.data(&line);
        }
        Ok(())
    }
}

/// One `path  source` line per route, paths padded to a common width.
fn route_table(routes: &[Route]) -> Vec<String> {
    let width = routes.iter().map(|r| r.path.len()).max().unwrap_or(0);
    routes
        .iter()
        .map(|route| format!("{:width$}  {}", route.path, route.source.display()))
        .collect()
}
