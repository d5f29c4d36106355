//! `lawbook head` command implementation.

use clap::Args;
use lawbook_config::CliSettings;
use lawbook_site::{client_script, head_tags, render_head};

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the head command.
#[derive(Args)]
pub(crate) struct HeadArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Print the client module tracking page views on route changes instead.
    #[arg(long)]
    client: bool,
}

impl HeadArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.manifest.load(CliSettings::default())?;

        if self.client {
            let Some(script) = client_script(config.analytics.as_ref()) else {
                output.warning("No [analytics] section, nothing to track");
                return Ok(());
            };
            output.data(script.trim_end())?;
            return Ok(());
        }

        let tags = head_tags(&config.site, config.analytics.as_ref());
        if tags.is_empty() {
            output.warning("No head tags configured");
            return Ok(());
        }

        output.data(&render_head(&tags))?;
        if config.analytics.is_some() {
            output.info("Route-change tracking: run `lawbook head --client` for the client module");
        }
        Ok(())
    }
}
