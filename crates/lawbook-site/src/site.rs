//! Manifest bound to a docs directory.

use std::fs;
use std::path::{Path, PathBuf};

use lawbook_config::Config;
use lawbook_nav::{ContentRef, NavEntry, NavLink, RefKind, route_for_file};
use serde::Serialize;

use crate::title::extract_title;

/// Outcome of resolving a content reference against the docs tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Link leaves the site; not checked.
    External,
    /// Backing file, relative to the docs directory.
    Local(PathBuf),
    /// No candidate file exists.
    Missing {
        /// Candidates looked up, relative to the docs directory.
        tried: Vec<PathBuf>,
    },
    /// Relative references cannot be resolved without a current page.
    Relative,
}

/// Sidebar shown for one route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedSidebar {
    /// Prefix of the matched section.
    pub prefix: String,
    /// Section heading.
    pub title: String,
    /// Label of the navbar link highlighted on this route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_nav: Option<String>,
    /// Items in manifest order.
    pub items: Vec<SidebarItem>,
}

/// One resolved sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Reference as written in the manifest.
    pub reference: String,
    /// Route the generator serves the document under.
    pub route: String,
    /// Page title, when the document exists and declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether the reference resolved to a file.
    pub exists: bool,
    /// Whether this item is the requested route.
    pub active: bool,
}

/// Loaded manifest and the docs tree it describes.
#[derive(Debug)]
pub struct Site {
    config: Config,
    source_dir: PathBuf,
}

impl Site {
    /// Bind a loaded manifest to its resolved docs directory.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let source_dir = config.docs_resolved.source_dir.clone();
        Self { config, source_dir }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Docs directory content references are resolved against.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve a content reference to its backing file.
    #[must_use]
    pub fn resolve(&self, reference: &ContentRef) -> Resolution {
        match reference.kind() {
            RefKind::External => return Resolution::External,
            RefKind::Relative => return Resolution::Relative,
            RefKind::Directory | RefKind::Page | RefKind::Bare => {}
        }

        let tried = reference.file_candidates();
        if let Some(found) = tried.iter().find(|c| self.source_dir.join(c).is_file()) {
            tracing::debug!(reference = %reference, file = %found.display(), "Resolved reference");
            return Resolution::Local(found.clone());
        }

        tracing::debug!(reference = %reference, "Reference does not resolve");
        Resolution::Missing { tried }
    }

    /// Whether `prefix` names a directory of the docs tree.
    #[must_use]
    pub fn has_directory(&self, prefix: &str) -> bool {
        self.source_dir.join(prefix.trim_matches('/')).is_dir()
    }

    /// Title of a page given relative to the docs directory.
    ///
    /// Returns `None` if the file cannot be read or declares no title.
    #[must_use]
    pub fn page_title(&self, rel_path: &Path) -> Option<String> {
        let content = fs::read_to_string(self.source_dir.join(rel_path))
            .inspect_err(|e| {
                tracing::warn!(path = %rel_path.display(), error = %e, "Failed to read page");
            })
            .ok()?;
        extract_title(&content)
    }

    /// Sidebar shown while `route` is displayed.
    ///
    /// Picks the section with the longest matching prefix and resolves each
    /// item. Missing documents stay in the list with `exists: false`.
    #[must_use]
    pub fn sidebar(&self, route: &str) -> Option<ResolvedSidebar> {
        let section = self.config.sidebar.resolve(route)?;

        let items = section
            .items
            .iter()
            .map(|item| {
                let reference = item.under(&section.path_prefix);
                let (item_route, title, exists) = match self.resolve(&reference) {
                    Resolution::Local(rel_path) => {
                        (route_for_file(&rel_path), self.page_title(&rel_path), true)
                    }
                    Resolution::External => (reference.route(), None, true),
                    Resolution::Missing { .. } | Resolution::Relative => {
                        (reference.route(), None, false)
                    }
                };
                SidebarItem {
                    reference: item.as_str().to_owned(),
                    active: item_route == route,
                    route: item_route,
                    title,
                    exists,
                }
            })
            .collect();

        Some(ResolvedSidebar {
            prefix: section.path_prefix.clone(),
            title: section.title.clone(),
            active_nav: self.active_nav(route).map(|link| link.text.clone()),
            items,
        })
    }

    /// First navbar link, in display order, highlighted while `route` is shown.
    ///
    /// Links with an invalid `active_match` never match.
    #[must_use]
    pub fn active_nav(&self, route: &str) -> Option<&NavLink> {
        self.config
            .navbar
            .iter()
            .flat_map(NavEntry::links)
            .find(|link| match link.is_active(route) {
                Ok(active) => active,
                Err(e) => {
                    tracing::debug!(link = %link.link, error = %e, "Skipping invalid active_match");
                    false
                }
            })
    }
}
