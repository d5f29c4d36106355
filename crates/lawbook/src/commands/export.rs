//! `lawbook export` command implementation.

use std::path::PathBuf;

use clap::Args;
use lawbook_site::GeneratorConfig;

use super::{ManifestArgs, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.manifest.load_site()?;

        let generator = GeneratorConfig::from_site(&site);
        write_json(&output, &generator, self.output.as_deref())
    }
}
