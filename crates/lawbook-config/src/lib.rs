//! Site manifest loading for Lawbook.
//!
//! Parses `lawbook.toml` with serde and provides auto-discovery of the
//! manifest in parent directories. The manifest declares:
//!
//! - `[site]`: language, title, description, logo and extra head tags
//! - `[theme]`: repository links and theme labels
//! - `[search]`: search index credentials and UI translations
//! - `[analytics]`: page-view tracking id
//! - `[[navbar]]` and `[[sidebar]]`: the navigation model
//! - `[docs]` and `[intake]`: local directories
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Credential and repository fields support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `search.app_id`
//! - `search.api_key`
//! - `search.index_name`
//! - `analytics.baidu_id`
//! - `theme.repo`
//! - `theme.docs_repo`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lawbook_nav::{NavEntry, SidebarMap};
use serde::{Deserialize, Serialize};

/// CLI settings that override manifest values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the laws list used by the intake planner.
    pub laws_list: Option<PathBuf>,
    /// Override the directory of converted law texts.
    pub intake_dir: Option<PathBuf>,
    /// Override the maximum number of planned laws.
    pub max_count: Option<usize>,
}

/// Manifest filename to search for.
const CONFIG_FILENAME: &str = "lawbook.toml";

/// Default number of laws the intake planner proposes at once.
const DEFAULT_MAX_COUNT: usize = 50;

/// Site manifest.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global site options.
    pub site: SiteOptions,
    /// Theme look-and-feel fields.
    pub theme: ThemeOptions,
    /// Search service settings (optional section).
    pub search: Option<SearchConfig>,
    /// Analytics settings (optional section).
    pub analytics: Option<AnalyticsConfig>,
    /// Top-level navigation bar.
    pub navbar: Vec<NavEntry>,
    /// Sidebar sections keyed by route prefix.
    pub sidebar: SidebarMap,
    /// Documentation directories (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Intake planner inputs (paths are relative strings from TOML).
    intake: IntakeConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved intake configuration (set after loading).
    #[serde(skip)]
    pub intake_resolved: IntakeConfig,
    /// Path to the manifest (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Global site options.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteOptions {
    /// Language tag of the site (e.g. `zh-CN`).
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Logo shown in the navbar; also used as favicon unless one is set.
    pub logo: Option<String>,
    /// Favicon href.
    pub favicon: Option<String>,
    /// Extra tags injected into every page head.
    pub head: Vec<HeadTag>,
}

impl SiteOptions {
    /// Favicon href, falling back to the logo.
    #[must_use]
    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref().or(self.logo.as_deref())
    }
}

/// One tag injected into the page head.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    /// Tag name (`link`, `meta`, `script`).
    pub tag: String,
    /// Tag attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inline content for non-void tags.
    pub content: Option<String>,
}

/// Theme look-and-feel fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOptions {
    /// Repository linked from the navbar.
    pub repo: Option<String>,
    /// Repository used for "edit this page" links.
    pub docs_repo: Option<String>,
    /// Branch used for "edit this page" links.
    pub docs_branch: Option<String>,
    /// Docs directory inside `docs_repo`.
    pub docs_dir: Option<String>,
    pub edit_link_text: Option<String>,
    /// Show the last-updated timestamp.
    pub last_updated: bool,
    pub last_updated_text: Option<String>,
    /// Show page contributors.
    pub contributors: bool,
    pub contributors_text: Option<String>,
    /// Messages picked at random on the 404 page.
    pub not_found: Vec<String>,
    pub back_to_home: Option<String>,
    pub toggle_color_mode: Option<String>,
    pub toggle_sidebar: Option<String>,
}

/// Search service settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Application id.
    pub app_id: String,
    /// Search-only API key.
    pub api_key: String,
    /// Index name.
    pub index_name: String,
    /// Snippet lengths per attribute (e.g. `content:25`).
    #[serde(default)]
    pub attributes_to_snippet: Vec<String>,
    /// UI strings per locale path (e.g. `/`).
    #[serde(default)]
    pub locales: BTreeMap<String, SearchLocale>,
}

impl SearchConfig {
    /// Validate that all credentials are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any credential is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.app_id, "search.app_id")?;
        require_non_empty(&self.api_key, "search.api_key")?;
        require_non_empty(&self.index_name, "search.index_name")?;
        Ok(())
    }
}

/// Search UI strings for one locale.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchLocale {
    /// Search box placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Nested translation table passed through to the search widget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<toml::Table>,
}

/// Analytics settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Baidu Tongji site id.
    pub baidu_id: String,
}

impl AnalyticsConfig {
    /// Validate the tracking id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the id is empty or not alphanumeric.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.baidu_id, "analytics.baidu_id")?;
        if !self.baidu_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(
                "analytics.baidu_id must be alphanumeric".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// Raw intake configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct IntakeConfigRaw {
    laws_list: Option<String>,
    input_dir: Option<String>,
    max_count: Option<usize>,
}

/// Resolved intake planner inputs.
#[derive(Debug)]
pub struct IntakeConfig {
    /// Official laws list in Markdown.
    pub laws_list: PathBuf,
    /// Directory of converted law texts.
    pub input_dir: PathBuf,
    /// Maximum number of laws per plan.
    pub max_count: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

impl IntakeConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            laws_list: base.join(".temp/laws-list.md"),
            input_dir: base.join(".temp/laws_md"),
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`search.api_key`").
        field: String,
        /// Error message (e.g., "${`DOCSEARCH_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load the manifest with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lawbook.toml` in current directory and parents.
    /// Without a manifest an empty site rooted at the current directory is used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::warn!("No {CONFIG_FILENAME} found, using an empty site");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse a manifest from a string, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(laws_list) = &settings.laws_list {
            self.intake_resolved.laws_list.clone_from(laws_list);
        }
        if let Some(intake_dir) = &settings.intake_dir {
            self.intake_resolved.input_dir.clone_from(intake_dir);
        }
        if let Some(max_count) = settings.max_count {
            self.intake_resolved.max_count = max_count;
        }
    }

    /// Search for the manifest in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteOptions::default(),
            theme: ThemeOptions::default(),
            search: None,
            analytics: None,
            navbar: Vec::new(),
            sidebar: SidebarMap::default(),
            docs: DocsConfigRaw::default(),
            intake: IntakeConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            intake_resolved: IntakeConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load the manifest from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading manifest");
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            navbar = config.navbar.len(),
            sidebar = config.sidebar.sections().len(),
            "Loaded manifest"
        );
        Ok(config)
    }

    /// Validate field shapes.
    ///
    /// Checks credentials and URLs. Whether the navigation resolves against
    /// the docs tree is checked separately by `lawbook-site`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(search) = &self.search {
            search.validate()?;
        }
        if let Some(analytics) = &self.analytics {
            analytics.validate()?;
        }
        self.validate_theme()?;
        if self.intake_resolved.max_count == 0 {
            return Err(ConfigError::Validation(
                "intake.max_count must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate theme repository links.
    fn validate_theme(&self) -> Result<(), ConfigError> {
        if let Some(repo) = &self.theme.repo {
            require_http_url(repo, "theme.repo")?;
        }
        if let Some(docs_repo) = &self.theme.docs_repo {
            require_http_url(docs_repo, "theme.docs_repo")?;
        }
        Ok(())
    }

    /// Expand environment variable references in manifest strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(search) = &mut self.search {
            search.app_id = expand::expand_env(&search.app_id, "search.app_id")?;
            search.api_key = expand::expand_env(&search.api_key, "search.api_key")?;
            search.index_name = expand::expand_env(&search.index_name, "search.index_name")?;
        }

        if let Some(analytics) = &mut self.analytics {
            analytics.baidu_id = expand::expand_env(&analytics.baidu_id, "analytics.baidu_id")?;
        }

        expand::expand_opt(&mut self.theme.repo, "theme.repo")?;
        expand::expand_opt(&mut self.theme.docs_repo, "theme.docs_repo")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on the manifest directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
        };
        self.intake_resolved = IntakeConfig {
            laws_list: resolve(self.intake.laws_list.as_deref(), ".temp/laws-list.md"),
            input_dir: resolve(self.intake.input_dir.as_deref(), ".temp/laws_md"),
            max_count: self.intake.max_count.unwrap_or(DEFAULT_MAX_COUNT),
        };
    }
}
