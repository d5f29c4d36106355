//! Content references and routing rules.
//!
//! A content reference is the string an author writes in the navbar or the
//! sidebar, e.g. `/constitution/preamble.md`, `/category/economic` or
//! `/constitution/`. The generator maps each reference to a route and to a
//! source file under the docs directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory index filenames, in lookup order.
const INDEX_FILES: [&str; 2] = ["README.md", "index.md"];

/// Schemes treated as links leaving the site.
const EXTERNAL_PREFIXES: [&str; 4] = ["http://", "https://", "mailto:", "//"];

/// Syntactic kind of a content reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefKind {
    /// Points outside the site (`https://...`).
    External,
    /// Does not start with `/`.
    Relative,
    /// Ends with `/`, served by the directory's index file.
    Directory,
    /// Names a page file (`.md` or `.html`).
    Page,
    /// No extension and no trailing slash (`/category/economic`).
    Bare,
}

/// A path identifying one document to be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Create a reference from its raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The reference exactly as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path part, without `#fragment` or `?query`.
    #[must_use]
    pub fn path(&self) -> &str {
        let end = self.0.find(['#', '?']).unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// Classify the reference.
    #[must_use]
    pub fn kind(&self) -> RefKind {
        let path = self.path();
        if EXTERNAL_PREFIXES.iter().any(|p| self.0.starts_with(p)) {
            RefKind::External
        } else if !path.starts_with('/') {
            RefKind::Relative
        } else if path.ends_with('/') {
            RefKind::Directory
        } else if path.ends_with(".md") || path.ends_with(".html") {
            RefKind::Page
        } else {
            RefKind::Bare
        }
    }

    /// Whether the reference leaves the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.kind() == RefKind::External
    }

    /// This reference as listed in a sidebar section under `prefix`.
    ///
    /// Relative references are joined onto the prefix (a leading `./` is
    /// dropped). Every other kind is returned unchanged.
    #[must_use]
    pub fn under(&self, prefix: &str) -> Self {
        if self.kind() != RefKind::Relative {
            return self.clone();
        }
        let relative = self.0.strip_prefix("./").unwrap_or(&self.0);
        if prefix.ends_with('/') {
            Self(format!("{prefix}{relative}"))
        } else {
            Self(format!("{prefix}/{relative}"))
        }
    }

    /// Source files that may back this reference, relative to the docs
    /// directory, in lookup order.
    ///
    /// External and relative references have no candidates.
    #[must_use]
    pub fn file_candidates(&self) -> Vec<PathBuf> {
        let trimmed = self.path().trim_start_matches('/');
        match self.kind() {
            RefKind::External | RefKind::Relative => Vec::new(),
            RefKind::Directory => INDEX_FILES
                .iter()
                .map(|index| Path::new(trimmed).join(index))
                .collect(),
            RefKind::Page => {
                let file = match trimmed.strip_suffix(".html") {
                    Some(stem) => format!("{stem}.md"),
                    None => trimmed.to_owned(),
                };
                vec![PathBuf::from(file)]
            }
            RefKind::Bare => {
                let mut candidates = vec![PathBuf::from(format!("{trimmed}.md"))];
                candidates.extend(INDEX_FILES.iter().map(|index| Path::new(trimmed).join(index)));
                candidates
            }
        }
    }

    /// Route the generator serves this reference under.
    ///
    /// Uses syntax only. A bare reference is assumed to name a page file; use
    /// [`route_for_file`] once the backing file is known.
    #[must_use]
    pub fn route(&self) -> String {
        let path = self.path();
        match self.kind() {
            RefKind::External | RefKind::Relative | RefKind::Directory => path.to_owned(),
            RefKind::Page if path.ends_with(".html") => path.to_owned(),
            RefKind::Page => route_for_file(Path::new(path.trim_start_matches('/'))),
            RefKind::Bare => format!("{path}.html"),
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentRef {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Route of a source file given relative to the docs directory.
///
/// `README.md` and `index.md` map to their directory (`/dir/`), any other
/// `x.md` maps to `/x.html`.
#[must_use]
pub fn route_for_file(rel_path: &Path) -> String {
    let normalized: Vec<String> = rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let Some((file_name, dirs)) = normalized.split_last() else {
        return "/".to_owned();
    };

    let mut route = String::from("/");
    for dir in dirs {
        route.push_str(dir);
        route.push('/');
    }

    let is_index = INDEX_FILES
        .iter()
        .any(|index| file_name.eq_ignore_ascii_case(index));
    if !is_index {
        let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
        route.push_str(stem);
        route.push_str(".html");
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_classification() {
        assert_eq!(ContentRef::new("https://github.com/x").kind(), RefKind::External);
        assert_eq!(ContentRef::new("mailto:a@b.c").kind(), RefKind::External);
        assert_eq!(ContentRef::new("preamble.md").kind(), RefKind::Relative);
        assert_eq!(ContentRef::new("/constitution/").kind(), RefKind::Directory);
        assert_eq!(
            ContentRef::new("/constitution/preamble.md").kind(),
            RefKind::Page
        );
        assert_eq!(ContentRef::new("/guide.html").kind(), RefKind::Page);
        assert_eq!(ContentRef::new("/category/economic").kind(), RefKind::Bare);
    }

    #[test]
    fn test_path_strips_fragment_and_query() {
        let reference = ContentRef::new("/constitution/preamble.md#section-2");
        assert_eq!(reference.path(), "/constitution/preamble.md");
        assert_eq!(reference.kind(), RefKind::Page);

        let reference = ContentRef::new("/constitution/?tab=1");
        assert_eq!(reference.path(), "/constitution/");
        assert_eq!(reference.kind(), RefKind::Directory);
    }

    #[test]
    fn test_directory_candidates() {
        let reference = ContentRef::new("/constitution/amendment/");
        assert_eq!(
            reference.file_candidates(),
            vec![
                PathBuf::from("constitution/amendment/README.md"),
                PathBuf::from("constitution/amendment/index.md"),
            ]
        );
    }

    #[test]
    fn test_root_directory_candidates() {
        let reference = ContentRef::new("/");
        assert_eq!(
            reference.file_candidates(),
            vec![PathBuf::from("README.md"), PathBuf::from("index.md")]
        );
    }

    #[test]
    fn test_page_candidates() {
        assert_eq!(
            ContentRef::new("/civil-and-commercial/civil-code/03-contracts.md").file_candidates(),
            vec![PathBuf::from("civil-and-commercial/civil-code/03-contracts.md")]
        );
        assert_eq!(
            ContentRef::new("/guide.html").file_candidates(),
            vec![PathBuf::from("guide.md")]
        );
    }

    #[test]
    fn test_bare_candidates_try_file_then_index() {
        assert_eq!(
            ContentRef::new("/category/economic").file_candidates(),
            vec![
                PathBuf::from("category/economic.md"),
                PathBuf::from("category/economic/README.md"),
                PathBuf::from("category/economic/index.md"),
            ]
        );
    }

    #[test]
    fn test_external_and_relative_have_no_candidates() {
        assert!(ContentRef::new("https://example.com").file_candidates().is_empty());
        assert!(ContentRef::new("guide.md").file_candidates().is_empty());
    }

    #[test]
    fn test_relative_reference_under_prefix() {
        assert_eq!(
            ContentRef::new("preamble.md").under("/constitution/"),
            ContentRef::new("/constitution/preamble.md")
        );
        assert_eq!(
            ContentRef::new("./amendment/").under("/constitution"),
            ContentRef::new("/constitution/amendment/")
        );
        assert_eq!(
            ContentRef::new("/category/economic").under("/constitution/"),
            ContentRef::new("/category/economic")
        );
        assert_eq!(
            ContentRef::new("https://github.com/x").under("/constitution/"),
            ContentRef::new("https://github.com/x")
        );
    }

    #[test]
    fn test_route_of_reference() {
        assert_eq!(
            ContentRef::new("/constitution/preamble.md").route(),
            "/constitution/preamble.html"
        );
        assert_eq!(ContentRef::new("/constitution/").route(), "/constitution/");
        assert_eq!(
            ContentRef::new("/constitution/README.md").route(),
            "/constitution/"
        );
        assert_eq!(
            ContentRef::new("/category/economic").route(),
            "/category/economic.html"
        );
        assert_eq!(
            ContentRef::new("https://github.com/x").route(),
            "https://github.com/x"
        );
    }

    #[test]
    fn test_route_for_file() {
        assert_eq!(route_for_file(Path::new("README.md")), "/");
        assert_eq!(route_for_file(Path::new("category/index.md")), "/category/");
        assert_eq!(
            route_for_file(Path::new("category/economic.md")),
            "/category/economic.html"
        );
        assert_eq!(
            route_for_file(Path::new("constitution/readme.md")),
            "/constitution/"
        );
    }

    #[test]
    fn test_deserialize_transparent() {
        #[derive(Deserialize)]
        struct Doc {
            items: Vec<ContentRef>,
        }

        let doc: Doc = toml::from_str(r#"items = ["/a.md", "/b/"]"#).unwrap();
        assert_eq!(doc.items, vec![ContentRef::new("/a.md"), ContentRef::new("/b/")]);
    }
}
