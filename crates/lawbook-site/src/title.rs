//! Page title extraction.
//!
//! A page title comes from the YAML front matter `title` field when present,
//! otherwise from the first level-1 heading.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)(?:[ \t]+#+)?[ \t\r]*$").unwrap());

/// Fields read from front matter.
#[derive(Deserialize)]
struct FrontMatter {
    title: Option<String>,
}

/// Split `---` delimited front matter from the body.
///
/// Returns `(None, content)` when the page has no front matter.
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Extract the title of a Markdown page.
pub(crate) fn extract_title(content: &str) -> Option<String> {
    let (front_matter, body) = split_front_matter(content);

    if let Some(yaml) = front_matter.filter(|y| !y.trim().is_empty()) {
        match serde_yaml::from_str::<FrontMatter>(yaml) {
            Ok(FrontMatter { title: Some(title) }) if !title.trim().is_empty() => {
                return Some(title.trim().to_owned());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Invalid front matter, falling back to heading"),
        }
    }

    H1_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}
