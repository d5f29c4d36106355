//! Integrity checks for the navigation and content map.
//!
//! Findings are collected rather than returned as errors: a broken reference
//! is an authoring mistake that shows up as a dead link, so one run reports
//! every problem of the manifest.

use std::fmt;

use lawbook_nav::{ContentRef, NavEntry, SidebarSection};
use serde::Serialize;

use crate::site::{Resolution, Site};

/// How serious a finding is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One finding with the manifest location it refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Manifest location, e.g. `navbar[2].children[0]`.
    pub location: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// All findings of one check run, in manifest order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CheckReport {
    diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, location.into(), message.into());
    }

    fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, location.into(), message.into());
    }

    fn push(&mut self, severity: Severity, location: String, message: String) {
        tracing::debug!(%severity, %location, %message, "Integrity finding");
        self.diagnostics.push(Diagnostic {
            severity,
            location,
            message,
        });
    }
}

impl Site {
    /// Check the manifest against the docs tree.
    ///
    /// Covers:
    /// - required site options are non-empty
    /// - navbar labels are non-empty, groups nest at most one level deep,
    ///   link targets resolve and `active_match` patterns compile
    /// - sidebar prefixes are unique, well-formed and name a directory
    /// - sidebar items resolve, stay under their prefix and are not repeated
    #[must_use]
    pub fn check(&self) -> CheckReport {
        let mut report = CheckReport::default();

        self.check_site_options(&mut report);
        for (idx, entry) in self.config().navbar.iter().enumerate() {
            self.check_nav_entry(entry, &format!("navbar[{idx}]"), &mut report);
        }
        self.check_sidebar(&mut report);

        tracing::info!(
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "Checked site"
        );
        report
    }

    fn check_site_options(&self, report: &mut CheckReport) {
        let site = &self.config().site;
        for (field, value) in [
            ("site.title", &site.title),
            ("site.description", &site.description),
            ("site.lang", &site.lang),
        ] {
            if value.trim().is_empty() {
                report.error(field, "required field is empty");
            }
        }
    }

    fn check_nav_entry(&self, entry: &NavEntry, location: &str, report: &mut CheckReport) {
        if entry.text().trim().is_empty() {
            report.error(location, "label is empty");
        }

        match entry {
            NavEntry::Link(link) => {
                self.check_reference(&link.link, location, report);
                if let Err(e) = link.active_pattern() {
                    report.error(location, format!("invalid active_match pattern: {e}"));
                }
            }
            NavEntry::Group(group) => {
                if group.children.is_empty() {
                    report.warning(location, "group has no children");
                }
                for (idx, child) in group.children.iter().enumerate() {
                    let child_location = format!("{location}.children[{idx}]");
                    if child.depth() > 0 {
                        report.error(&child_location, "groups nest at most one level deep");
                    }
                    self.check_nav_entry(child, &child_location, report);
                }
            }
        }
    }

    fn check_sidebar(&self, report: &mut CheckReport) {
        let sidebar = &self.config().sidebar;

        for prefix in sidebar.duplicate_prefixes() {
            let count = sidebar
                .sections()
                .iter()
                .filter(|s| s.path_prefix == prefix)
                .count();
            let first = sidebar
                .get(prefix)
                .map_or_else(String::new, |s| format!(", first as \"{}\"", s.title));
            report.error(
                format!("sidebar[{prefix}]"),
                format!("prefix declared {count} times{first}"),
            );
        }

        for section in sidebar.sections() {
            self.check_section(section, report);
        }
    }

    fn check_section(&self, section: &SidebarSection, report: &mut CheckReport) {
        let prefix = section.path_prefix.as_str();
        let location = format!("sidebar[{prefix}]");

        if !prefix.starts_with('/') || !prefix.ends_with('/') {
            report.error(&location, "prefix must start and end with /");
        } else if !self.has_directory(prefix) {
            report.error(
                &location,
                format!(
                    "prefix does not name a directory under {}",
                    self.source_dir().display()
                ),
            );
        }

        if section.title.trim().is_empty() {
            report.error(&location, "title is empty");
        }
        if section.items.is_empty() {
            report.warning(&location, "section has no items");
        }

        for (idx, item) in section.items.iter().enumerate() {
            let item_location = format!("{location}.items[{idx}]");
            let resolved = item.under(prefix);
            self.check_reference(&resolved, &item_location, report);

            if !resolved.is_external() && !resolved.path().starts_with(prefix) {
                report.warning(
                    &item_location,
                    format!("\"{item}\" lies outside the section prefix {prefix}"),
                );
            }
            if section.items[..idx].contains(item) {
                report.warning(&item_location, format!("\"{item}\" is listed twice"));
            }
        }
    }

    fn check_reference(&self, reference: &ContentRef, location: &str, report: &mut CheckReport) {
        match self.resolve(reference) {
            Resolution::External | Resolution::Local(_) => {}
            Resolution::Relative => report.error(
                location,
                format!("relative reference \"{reference}\" is not supported; start it with /"),
            ),
            Resolution::Missing { tried } => {
                let tried: Vec<_> = tried.iter().map(|p| p.display().to_string()).collect();
                report.error(
                    location,
                    format!(
                        "\"{reference}\" does not resolve to a file (tried {})",
                        tried.join(", ")
                    ),
                );
            }
        }
    }
}
