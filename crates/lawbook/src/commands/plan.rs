//! `lawbook plan` command implementation.

use std::path::PathBuf;

use clap::Args;
use lawbook_config::CliSettings;
use lawbook_intake::plan_from_config;

use super::{ManifestArgs, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the plan command.
#[derive(Args)]
pub(crate) struct PlanArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Official laws list in Markdown (overrides config).
    #[arg(long)]
    laws_list: Option<PathBuf>,

    /// Directory of converted law texts (overrides config).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Maximum number of laws to propose (overrides config).
    #[arg(long)]
    max: Option<usize>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl PlanArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.max == Some(0) {
            return Err(CliError::Validation(
                "--max must be greater than 0".to_owned(),
            ));
        }

        let settings = CliSettings {
            laws_list: self.laws_list,
            intake_dir: self.input_dir,
            max_count: self.max,
            ..CliSettings::default()
        };
        let config = self.manifest.load(settings)?;

        output.info(&format!(
            "Laws list: {}",
            config.intake_resolved.laws_list.display()
        ));
        output.info(&format!(
            "Input: {}",
            config.intake_resolved.input_dir.display()
        ));

        let entries = plan_from_config(&config)?;
        if entries.is_empty() {
            output.warning("No new laws to add");
        } else {
            output.highlight(&format!("{} law(s) planned", entries.len()));
        }

        write_json(&output, &entries, self.output.as_deref())
    }
}
