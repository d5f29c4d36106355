//! Manifest export in the static-site generator's configuration shape.
//!
//! Field names follow the generator's camelCase schema. Head tags are
//! encoded as `[tag, attrs]` or `[tag, attrs, content]` arrays.

use std::collections::BTreeMap;

use lawbook_config::{HeadTag, SearchConfig, SearchLocale, ThemeOptions};
use lawbook_nav::{ContentRef, NavEntry, SidebarMap};
use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::head::{client_script, head_tags};
use crate::site::Site;

/// Generator-facing site configuration.
#[derive(Debug, Serialize)]
pub struct GeneratorConfig<'a> {
    lang: &'a str,
    title: &'a str,
    description: &'a str,
    head: Vec<HeadEntry>,
    theme: ThemeExport<'a>,
    #[serde(skip_serializing_if = "PluginsExport::is_empty")]
    plugins: PluginsExport<'a>,
    /// Client module source, written by the generator next to its config.
    #[serde(rename = "clientScript", skip_serializing_if = "Option::is_none")]
    client_script: Option<String>,
}

#[derive(Debug)]
struct HeadEntry(HeadTag);

impl Serialize for HeadEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.0.content.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.0.tag)?;
        seq.serialize_element(&self.0.attrs)?;
        if let Some(content) = &self.0.content {
            seq.serialize_element(content)?;
        }
        seq.end()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
    navbar: Vec<NavItemExport<'a>>,
    sidebar: BTreeMap<&'a str, Vec<SidebarGroupExport<'a>>>,
    #[serde(flatten)]
    options: ThemeOptionsExport<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NavItemExport<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_match: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<NavItemExport<'a>>>,
}

impl<'a> From<&'a NavEntry> for NavItemExport<'a> {
    fn from(entry: &'a NavEntry) -> Self {
        match entry {
            NavEntry::Link(link) => Self {
                text: &link.text,
                link: Some(link.link.as_str()),
                active_match: link.active_match.as_deref(),
                children: None,
            },
            NavEntry::Group(group) => Self {
                text: &group.text,
                link: None,
                active_match: None,
                children: Some(group.children.iter().map(Self::from).collect()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SidebarGroupExport<'a> {
    text: &'a str,
    children: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeOptionsExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    repo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs_repo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs_branch: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs_dir: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_link_text: Option<&'a str>,
    last_updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_updated_text: Option<&'a str>,
    contributors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    contributors_text: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    not_found: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    back_to_home: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    toggle_color_mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    toggle_sidebar: Option<&'a str>,
}

impl<'a> From<&'a ThemeOptions> for ThemeOptionsExport<'a> {
    fn from(theme: &'a ThemeOptions) -> Self {
        Self {
            repo: theme.repo.as_deref(),
            docs_repo: theme.docs_repo.as_deref(),
            docs_branch: theme.docs_branch.as_deref(),
            docs_dir: theme.docs_dir.as_deref(),
            edit_link_text: theme.edit_link_text.as_deref(),
            last_updated: theme.last_updated,
            last_updated_text: theme.last_updated_text.as_deref(),
            contributors: theme.contributors,
            contributors_text: theme.contributors_text.as_deref(),
            not_found: &theme.not_found,
            back_to_home: theme.back_to_home.as_deref(),
            toggle_color_mode: theme.toggle_color_mode.as_deref(),
            toggle_sidebar: theme.toggle_sidebar.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PluginsExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    docsearch: Option<DocsearchExport<'a>>,
}

impl PluginsExport<'_> {
    fn is_empty(&self) -> bool {
        self.docsearch.is_none()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocsearchExport<'a> {
    app_id: &'a str,
    api_key: &'a str,
    index_name: &'a str,
    #[serde(skip_serializing_if = "SearchParameters::is_empty")]
    search_parameters: SearchParameters<'a>,
    #[serde(skip_serializing_if = "is_empty_map")]
    locales: &'a BTreeMap<String, SearchLocale>,
}

impl<'a> From<&'a SearchConfig> for DocsearchExport<'a> {
    fn from(search: &'a SearchConfig) -> Self {
        Self {
            app_id: &search.app_id,
            api_key: &search.api_key,
            index_name: &search.index_name,
            search_parameters: SearchParameters {
                attributes_to_snippet: &search.attributes_to_snippet,
            },
            locales: &search.locales,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchParameters<'a> {
    attributes_to_snippet: &'a [String],
}

impl SearchParameters<'_> {
    fn is_empty(&self) -> bool {
        self.attributes_to_snippet.is_empty()
    }
}

fn is_empty_slice(values: &&[String]) -> bool {
    values.is_empty()
}

fn is_empty_map(locales: &&BTreeMap<String, SearchLocale>) -> bool {
    locales.is_empty()
}

/// Group sidebar sections by prefix; repeated prefixes append groups.
fn sidebar_export(sidebar: &SidebarMap) -> BTreeMap<&str, Vec<SidebarGroupExport<'_>>> {
    let mut groups: BTreeMap<&str, Vec<SidebarGroupExport<'_>>> = BTreeMap::new();
    for section in sidebar.sections() {
        groups
            .entry(section.path_prefix.as_str())
            .or_default()
            .push(SidebarGroupExport {
                text: &section.title,
                children: section.items.iter().map(ContentRef::as_str).collect(),
            });
    }
    groups
}

impl<'a> GeneratorConfig<'a> {
    /// Build the generator configuration from a site.
    #[must_use]
    pub fn from_site(site: &'a Site) -> Self {
        let config = site.config();

        let head = head_tags(&config.site, config.analytics.as_ref())
            .into_iter()
            .map(HeadEntry)
            .collect();

        Self {
            lang: &config.site.lang,
            title: &config.site.title,
            description: &config.site.description,
            head,
            theme: ThemeExport {
                logo: config.site.logo.as_deref(),
                navbar: config.navbar.iter().map(NavItemExport::from).collect(),
                sidebar: sidebar_export(&config.sidebar),
                options: ThemeOptionsExport::from(&config.theme),
            },
            plugins: PluginsExport {
                docsearch: config.search.as_ref().map(DocsearchExport::from),
            },
            client_script: client_script(config.analytics.as_ref()),
        }
    }
}
