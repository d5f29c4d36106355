//! `lawbook sidebar` command implementation.

use clap::Args;

use super::{ManifestArgs, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Route to look up, e.g. `/constitution/preamble.html`.
    route: String,

    #[command(flatten)]
    manifest: ManifestArgs,
}

impl SidebarArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.manifest.load_site()?;

        let sidebar = site.sidebar(&self.route).ok_or_else(|| {
            CliError::Validation(format!("No sidebar section matches {}", self.route))
        })?;

        output.highlight(&format!("{} ({})", sidebar.title, sidebar.prefix));
        if let Some(nav) = &sidebar.active_nav {
            output.info(&format!("Navbar: {nav}"));
        }
        let missing = sidebar.items.iter().filter(|item| !item.exists).count();
        if missing > 0 {
            output.warning(&format!("{missing} item(s) do not resolve"));
        }

        write_json(&output, &sidebar, None)
    }
}
