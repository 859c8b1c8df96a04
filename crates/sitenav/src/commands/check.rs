//! `sitenav check` command implementation.

use clap::Args;
use sitenav_config::missing_sources;

use super::{ConfigArgs, Loaded};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Treat duplicate paths as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a local page has no
    /// source file, or `--strict` is set and a path is listed twice.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.config.load()?;

        output.info(&format!("Configuration: {}", loaded.path.display()));
        let problems = report(&loaded, self.strict, &output);

        if problems > 0 {
            return Err(CliError::Validation(format!(
                "{problems} problem(s) found"
            )));
        }
        output.success("Navigation OK");
        Ok(())
    }
}

/// Print findings and return the number of failures.
fn report(loaded: &Loaded, strict: bool, output: &Output) -> usize {
    let config = &loaded.config;
    let entries = config.flatten().count();
    let external = config.flatten().filter(|e| e.is_external()).count();
    output.info(&format!(
        "{} section(s), {entries} entries ({external} external)",
        config.sections().count()
    ));

    let mut problems = 0;

    for path in config.duplicate_paths() {
        let msg = format!("Path listed more than once: {path}");
        if strict {
            output.error(&msg);
            problems += 1;
        } else {
            output.warning(&msg);
        }
    }

    for missing in missing_sources(config, loaded.base_dir()) {
        output.error(&format!("Missing source for \"{}\" ({})", missing.name, missing.path));
        output.detail(&format!("  expected {}", missing.expected.display()));
        problems += 1;
    }

    problems
}
