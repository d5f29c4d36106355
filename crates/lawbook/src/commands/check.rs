//! `lawbook check` command implementation.

use clap::Args;
use lawbook_site::{CheckReport, Severity};

use super::{ManifestArgs, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Fail when the report contains warnings.
    #[arg(long)]
    deny_warnings: bool,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.manifest.load_site()?;

        output.info(&format!("Docs: {}", site.source_dir().display()));
        let report = site.check();

        if self.json {
            write_json(&output, &report, None)?;
        } else {
            for diagnostic in report.diagnostics() {
                match diagnostic.severity {
                    Severity::Error => output.error(&diagnostic.to_string()),
                    Severity::Warning => output.warning(&diagnostic.to_string()),
                }
            }
        }

        let result = verdict(&report, self.deny_warnings);
        if result.is_ok() {
            if report.is_clean() {
                output.success("No problems found");
            } else {
                output.warning(&format!(
                    "{} warning(s)",
                    report.warnings().count()
                ));
            }
        }
        result
    }
}

/// Whether a report passes, given the warning policy.
fn verdict(report: &CheckReport, deny_warnings: bool) -> Result<(), CliError> {
    let errors = report.errors().count();
    let warnings = report.warnings().count();

    if errors > 0 || (deny_warnings && warnings > 0) {
        return Err(CliError::CheckFailed { errors, warnings });
    }
    Ok(())
}
