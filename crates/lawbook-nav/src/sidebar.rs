//! Sidebar sections keyed by URL path prefix.

use serde::Deserialize;

use crate::reference::ContentRef;

/// Ordered content list shown in the sidebar under one route prefix.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarSection {
    /// Routing prefix the generator looks this section up under.
    #[serde(rename = "prefix")]
    pub path_prefix: String,
    /// Section heading.
    pub title: String,
    /// Documents in chapter order.
    #[serde(default)]
    pub items: Vec<ContentRef>,
}

impl SidebarSection {
    pub fn new(path_prefix: &str, title: &str, items: Vec<ContentRef>) -> Self {
        Self {
            path_prefix: path_prefix.to_owned(),
            title: title.to_owned(),
            items,
        }
    }
}

/// All sidebar sections, in manifest order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SidebarMap(Vec<SidebarSection>);

impl SidebarMap {
    #[must_use]
    pub fn new(sections: Vec<SidebarSection>) -> Self {
        Self(sections)
    }

    #[must_use]
    pub fn sections(&self) -> &[SidebarSection] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First section declared under exactly `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&SidebarSection> {
        self.0.iter().find(|s| s.path_prefix == prefix)
    }

    /// Section shown for `route`: the one with the longest prefix of it.
    ///
    /// Ties keep manifest order.
    #[must_use]
    pub fn resolve(&self, route: &str) -> Option<&SidebarSection> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, s)| route.starts_with(&s.path_prefix))
            .max_by(|(ia, a), (ib, b)| {
                a.path_prefix
                    .len()
                    .cmp(&b.path_prefix.len())
                    .then(ib.cmp(ia))
            })
            .map(|(_, s)| s)
    }

    /// Prefixes declared more than once, each reported once in order of
    /// first appearance.
    #[must_use]
    pub fn duplicate_prefixes(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (idx, section) in self.0.iter().enumerate() {
            let prefix = section.path_prefix.as_str();
            let seen_before = self.0[..idx].iter().any(|s| s.path_prefix == prefix);
            if seen_before && !duplicates.contains(&prefix) {
                duplicates.push(prefix);
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn refs(items: &[&str]) -> Vec<ContentRef> {
        items.iter().map(|i| ContentRef::new(*i)).collect()
    }

    fn sample() -> SidebarMap {
        SidebarMap::new(vec![
            SidebarSection::new("/category/", "类别", refs(&["/category/economic"])),
            SidebarSection::new("/criminal-law/criminal-law/", "中华人民共和国刑法", vec![]),
            SidebarSection::new("/criminal-law/amendment/", "目录", vec![]),
            SidebarSection::new("/criminal-law/", "刑法", vec![]),
        ])
    }

    #[test]
    fn test_parse_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            sidebar: SidebarMap,
        }

        let doc: Doc = toml::from_str(
            r#"
[[sidebar]]
prefix = "/constitution/"
title = "中华人民共和国宪法"
items = [
    "/constitution/preamble.md",
    "/constitution/01-general-principles.md",
]
"#,
        )
        .unwrap();

        let section = &doc.sidebar.sections()[0];
        assert_eq!(section.path_prefix, "/constitution/");
        assert_eq!(section.title, "中华人民共和国宪法");
        assert_eq!(
            section.items,
            refs(&[
                "/constitution/preamble.md",
                "/constitution/01-general-principles.md"
            ])
        );
    }

    #[test]
    fn test_resolve_longest_prefix_wins() {
        let map = sample();

        let section = map.resolve("/criminal-law/amendment/criminal-law-amendment-x.html");
        assert_eq!(section.unwrap().title, "目录");

        let section = map.resolve("/criminal-law/anti-organized-crime-law/");
        assert_eq!(section.unwrap().title, "刑法");
    }

    #[test]
    fn test_resolve_no_match() {
        assert!(sample().resolve("/constitution/").is_none());
    }

    #[test]
    fn test_resolve_tie_keeps_first() {
        let map = SidebarMap::new(vec![
            SidebarSection::new("/a/", "first", vec![]),
            SidebarSection::new("/a/", "second", vec![]),
        ]);
        assert_eq!(map.resolve("/a/x.html").unwrap().title, "first");
    }

    #[test]
    fn test_duplicate_prefixes() {
        let map = SidebarMap::new(vec![
            SidebarSection::new("/a/", "A", vec![]),
            SidebarSection::new("/b/", "B", vec![]),
            SidebarSection::new("/a/", "A again", vec![]),
            SidebarSection::new("/a/", "A third", vec![]),
        ]);
        assert_eq!(map.duplicate_prefixes(), vec!["/a/"]);
        assert!(sample().duplicate_prefixes().is_empty());
    }

    #[test]
    fn test_items_keep_order() {
        let map = SidebarMap::new(vec![SidebarSection::new(
            "/civil-and-commercial/civil-code/",
            "中华人民共和国民法典",
            refs(&[
                "/civil-and-commercial/civil-code/07-tort-liability.md",
                "/civil-and-commercial/civil-code/00-supplementary.md",
            ]),
        )]);

        let items: Vec<_> = map.sections()[0]
            .items
            .iter()
            .map(ContentRef::as_str)
            .collect();
        assert_eq!(
            items,
            vec![
                "/civil-and-commercial/civil-code/07-tort-liability.md",
                "/civil-and-commercial/civil-code/00-supplementary.md",
            ]
        );
    }
}
