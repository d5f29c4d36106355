//! Navigation bar entries.

use regex::Regex;
use serde::Deserialize;

use crate::reference::{ContentRef, RefKind};

/// Error raised when a navbar entry is neither a link nor a group.
#[derive(Debug, thiserror::Error)]
pub enum NavEntryError {
    #[error("navbar entry \"{0}\" has both link and children")]
    Ambiguous(String),
    #[error("navbar entry \"{0}\" needs either link or children")]
    Empty(String),
    #[error("navbar entry \"{0}\" is a group; active_match is only allowed on links")]
    GroupActiveMatch(String),
}

/// One entry of the top-level navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NavEntryRaw")]
pub enum NavEntry {
    /// Direct link to a page.
    Link(NavLink),
    /// Labeled dropdown of child entries.
    Group(NavGroup),
}

/// Leaf navbar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Display label.
    pub text: String,
    /// Target route or external URL.
    pub link: ContentRef,
    /// Regex over the current route overriding the default active rule.
    pub active_match: Option<String>,
}

/// Labeled group of navbar entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    /// Display label.
    pub text: String,
    /// Child entries, rendered in order.
    pub children: Vec<NavEntry>,
}

/// Shape of a navbar entry as written in the manifest.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NavEntryRaw {
    text: String,
    link: Option<String>,
    active_match: Option<String>,
    children: Option<Vec<NavEntry>>,
}

impl TryFrom<NavEntryRaw> for NavEntry {
    type Error = NavEntryError;

    fn try_from(raw: NavEntryRaw) -> Result<Self, Self::Error> {
        match (raw.link, raw.children) {
            (Some(_), Some(_)) => Err(NavEntryError::Ambiguous(raw.text)),
            (None, None) => Err(NavEntryError::Empty(raw.text)),
            (Some(link), None) => Ok(Self::Link(NavLink {
                text: raw.text,
                link: ContentRef::new(link),
                active_match: raw.active_match,
            })),
            (None, Some(_)) if raw.active_match.is_some() => {
                Err(NavEntryError::GroupActiveMatch(raw.text))
            }
            (None, Some(children)) => Ok(Self::Group(NavGroup {
                text: raw.text,
                children,
            })),
        }
    }
}

impl NavEntry {
    /// Display label of the entry.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Group(group) => &group.text,
        }
    }

    /// Nesting depth: 0 for a link, 1 + deepest child for a group.
    ///
    /// A well-formed navbar has no entry deeper than 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Link(_) => 0,
            Self::Group(group) => 1 + group.children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// All leaf links under this entry, in display order.
    #[must_use]
    pub fn links(&self) -> Vec<&NavLink> {
        match self {
            Self::Link(link) => vec![link],
            Self::Group(group) => group.children.iter().flat_map(Self::links).collect(),
        }
    }
}

impl NavLink {
    /// Compiled `active_match` pattern, if one is set.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `active_match` is not a valid pattern.
    pub fn active_pattern(&self) -> Result<Option<Regex>, regex::Error> {
        self.active_match.as_deref().map(Regex::new).transpose()
    }

    /// Whether this link is highlighted while `route` is displayed.
    ///
    /// With `active_match` set the pattern decides. Otherwise the root link
    /// `/` is active only on `/`, any other directory target is active for
    /// every route below it and a page target only for its own route.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `active_match` is not a valid pattern.
    pub fn is_active(&self, route: &str) -> Result<bool, regex::Error> {
        if let Some(pattern) = self.active_pattern()? {
            return Ok(pattern.is_match(route));
        }
        let target = self.link.path();
        let active = match self.link.kind() {
            RefKind::External => false,
            RefKind::Directory if target == "/" => route == "/",
            RefKind::Directory => route.starts_with(target),
            _ => route == target || route == self.link.route(),
        };
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct Doc {
        navbar: Vec<NavEntry>,
    }

    fn parse(toml: &str) -> Result<Vec<NavEntry>, toml::de::Error> {
        toml::from_str::<Doc>(toml).map(|doc| doc.navbar)
    }

    fn link(text: &str, target: &str) -> NavEntry {
        NavEntry::Link(NavLink {
            text: text.to_owned(),
            link: ContentRef::new(target),
            active_match: None,
        })
    }

    #[test]
    fn test_parse_link_and_group() {
        let navbar = parse(
            r#"
[[navbar]]
text = "全部类别"
link = "/category/"

[[navbar]]
text = "宪法"

[[navbar.children]]
text = "宪法"
link = "/constitution/"
active_match = "/constitution/[^(amendment)]"

[[navbar.children]]
text = "宪法修正案"
link = "/constitution/amendment/"
"#,
        )
        .unwrap();

        assert_eq!(navbar.len(), 2);
        assert_eq!(navbar[0], link("全部类别", "/category/"));
        let NavEntry::Group(group) = &navbar[1] else {
            panic!("expected group, got {:?}", navbar[1]);
        };
        assert_eq!(group.text, "宪法");
        assert_eq!(group.children.len(), 2);
        assert_eq!(group.children[1], link("宪法修正案", "/constitution/amendment/"));
    }

    #[test]
    fn test_entry_with_link_and_children_rejected() {
        let err = parse(
            r#"
[[navbar]]
text = "Both"
link = "/both/"
children = []
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("has both link and children"));
    }

    #[test]
    fn test_entry_without_target_rejected() {
        let err = parse(
            r#"
[[navbar]]
text = "Nothing"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("needs either link or children"));
    }

    #[test]
    fn test_group_with_active_match_rejected() {
        let err = parse(
            r#"
[[navbar]]
text = "Group"
active_match = "/x/"
children = []
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("active_match"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = parse(
            r#"
[[navbar]]
text = "Typo"
lnk = "/x/"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_depth() {
        let flat = link("A", "/a/");
        let group = NavEntry::Group(NavGroup {
            text: "G".to_owned(),
            children: vec![link("A", "/a/")],
        });
        let nested = NavEntry::Group(NavGroup {
            text: "Outer".to_owned(),
            children: vec![group.clone()],
        });
        let empty = NavEntry::Group(NavGroup {
            text: "Empty".to_owned(),
            children: Vec::new(),
        });

        assert_eq!(flat.depth(), 0);
        assert_eq!(group.depth(), 1);
        assert_eq!(nested.depth(), 2);
        assert_eq!(empty.depth(), 1);
    }

    #[test]
    fn test_links_flattens_in_order() {
        let entry = NavEntry::Group(NavGroup {
            text: "刑法".to_owned(),
            children: vec![
                link("刑法", "/criminal-law/criminal-law/"),
                link("刑法修正案", "/criminal-law/amendment/"),
            ],
        });

        let targets: Vec<_> = entry.links().iter().map(|l| l.link.as_str()).collect();
        assert_eq!(
            targets,
            vec!["/criminal-law/criminal-law/", "/criminal-law/amendment/"]
        );
    }

    #[test]
    fn test_is_active_directory_prefix() {
        let NavEntry::Link(nav) = link("宪法", "/constitution/") else {
            unreachable!()
        };
        assert!(nav.is_active("/constitution/").unwrap());
        assert!(nav.is_active("/constitution/preamble.html").unwrap());
        assert!(!nav.is_active("/category/").unwrap());
    }

    #[test]
    fn test_root_link_active_only_on_home() {
        let NavEntry::Link(nav) = link("首页", "/") else {
            unreachable!()
        };
        assert!(nav.is_active("/").unwrap());
        assert!(!nav.is_active("/constitution/").unwrap());
        assert!(!nav.is_active("/category/economic.html").unwrap());
    }

    #[test]
    fn test_active_pattern() {
        let NavEntry::Link(plain) = link("宪法", "/constitution/") else {
            unreachable!()
        };
        assert!(plain.active_pattern().unwrap().is_none());

        let nav = NavLink {
            text: "宪法".to_owned(),
            link: ContentRef::new("/constitution/"),
            active_match: Some("^/constitution/".to_owned()),
        };
        assert!(nav.active_pattern().unwrap().is_some());
    }

    #[test]
    fn test_is_active_with_pattern() {
        let nav = NavLink {
            text: "宪法".to_owned(),
            link: ContentRef::new("/constitution/"),
            active_match: Some("^/constitution/[^a]".to_owned()),
        };
        assert!(nav.is_active("/constitution/preamble.html").unwrap());
        assert!(!nav.is_active("/constitution/amendment/").unwrap());
    }

    #[test]
    fn test_is_active_invalid_pattern() {
        let nav = NavLink {
            text: "Bad".to_owned(),
            link: ContentRef::new("/x/"),
            active_match: Some("(".to_owned()),
        };
        assert!(nav.is_active("/x/").is_err());
    }

    #[test]
    fn test_is_active_page_link() {
        let NavEntry::Link(nav) = link("Economic", "/category/economic") else {
            unreachable!()
        };
        assert!(nav.is_active("/category/economic").unwrap());
        assert!(nav.is_active("/category/economic.html").unwrap());
        assert!(!nav.is_active("/category/economic-other.html").unwrap());
    }
}
