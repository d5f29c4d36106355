//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod head;
pub(crate) mod plan;
pub(crate) mod sidebar;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use lawbook_config::{CliSettings, Config};
use lawbook_site::Site;
use serde::Serialize;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use head::HeadArgs;
pub(crate) use plan::PlanArgs;
pub(crate) use sidebar::SidebarArgs;

use crate::error::CliError;
use crate::output::Output;

/// Manifest location shared by every command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Path to configuration file (default: auto-discover lawbook.toml).
    #[arg(short, long, env = "LAWBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl ManifestArgs {
    /// Load the manifest, merging `settings` with the source directory override.
    pub(crate) fn load(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }

    pub(crate) fn load_site(&self) -> Result<Site, CliError> {
        Ok(Site::new(self.load(CliSettings::default())?))
    }
}

/// Serialize `value` as pretty JSON and write it to `path`, or stdout.
pub(crate) fn write_json<T: Serialize>(
    output: &Output,
    value: &T,
    path: Option<&Path>,
) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            output.success(&format!("Wrote {}", path.display()));
        }
        None => output.data(&json)?,
    }
    Ok(())
}
