//! Intake plan generation.

use std::fs;
use std::path::{Path, PathBuf};

use lawbook_config::Config;
use lawbook_nav::NavEntry;
use serde::Serialize;

use crate::IntakeError;
use crate::laws_list::{CategoryMapping, category_dir};
use crate::naming::{english_slug, law_name_from_stem, short_name};

/// One law proposed for inclusion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Full law name.
    pub law_name: String,
    /// Category label from the laws list.
    pub category: String,
    /// Docs directory of the category.
    pub category_dir: String,
    /// Converted Markdown source.
    pub md_file: PathBuf,
    /// Proposed directory slug.
    pub english_name: String,
}

/// Whether a law is already linked from the site.
///
/// True when the short name (without the state prefix) appears in any
/// navbar label or sidebar title.
#[must_use]
pub fn is_included(law_name: &str, config: &Config) -> bool {
    let short = short_name(law_name);

    let in_navbar = config
        .navbar
        .iter()
        .any(|entry| label_contains(entry, &short));
    let in_sidebar = config
        .sidebar
        .sections()
        .iter()
        .any(|section| section.title.contains(&short));

    in_navbar || in_sidebar
}

fn label_contains(entry: &NavEntry, needle: &str) -> bool {
    if entry.text().contains(needle) {
        return true;
    }
    match entry {
        NavEntry::Link(_) => false,
        NavEntry::Group(group) => group.children.iter().any(|c| label_contains(c, needle)),
    }
}

/// Converted law files in `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if `dir` does not exist or cannot be listed.
pub fn discover_law_files(dir: &Path) -> Result<Vec<PathBuf>, IntakeError> {
    if !dir.is_dir() {
        return Err(IntakeError::MissingInput(dir.to_path_buf()));
    }
    let dir_str = dir
        .to_str()
        .ok_or_else(|| IntakeError::NonUtf8Path(dir.to_path_buf()))?;
    let pattern = format!("{}/*.md", glob::Pattern::escape(dir_str));

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(dir = %dir.display(), count = files.len(), "Discovered law files");
    Ok(files)
}

/// Propose up to `max_count` laws to add.
///
/// Walks `files` in order and keeps those whose law has a category with a
/// known docs directory and is not yet included in the site.
#[must_use]
pub fn plan(
    files: &[PathBuf],
    mapping: &CategoryMapping,
    config: &Config,
    max_count: usize,
) -> Vec<PlanEntry> {
    let mut entries = Vec::new();

    for file in files {
        if entries.len() >= max_count {
            break;
        }
        let Some(stem) = file.file_stem().map(|s| s.to_string_lossy()) else {
            continue;
        };
        let law_name = law_name_from_stem(&stem);

        let Some(category) = mapping.category_of(law_name) else {
            tracing::debug!(law = law_name, "No category, skipping");
            continue;
        };
        let Some(dir) = category_dir(category) else {
            tracing::debug!(law = law_name, category, "Category has no directory, skipping");
            continue;
        };
        if is_included(law_name, config) {
            tracing::debug!(law = law_name, "Already included, skipping");
            continue;
        }

        entries.push(PlanEntry {
            law_name: law_name.to_owned(),
            category: category.to_owned(),
            category_dir: dir.to_owned(),
            md_file: file.clone(),
            english_name: english_slug(law_name),
        });
    }

    entries
}

/// Build a plan from the intake inputs of the manifest.
///
/// # Errors
///
/// Returns an error if the laws list or the input directory cannot be read.
pub fn plan_from_config(config: &Config) -> Result<Vec<PlanEntry>, IntakeError> {
    let intake = &config.intake_resolved;

    let list = fs::read_to_string(&intake.laws_list).map_err(|source| IntakeError::Io {
        path: intake.laws_list.clone(),
        source,
    })?;
    let mapping = CategoryMapping::parse(&list);
    let files = discover_law_files(&intake.input_dir)?;

    let entries = plan(&files, &mapping, config, intake.max_count);
    tracing::info!(
        files = files.len(),
        planned = entries.len(),
        "Generated intake plan"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LAWS_LIST: &str = "\
## 宪法相关法（52件）
1. 中华人民共和国反分裂国家法（2005年3月14日通过）
2. 中华人民共和国民族区域自治法（1984年5月31日通过）

## 刑法（3件）
1. 中华人民共和国刑法（2020年12月26日修正）
2. 中华人民共和国反有组织犯罪法（2021年12月24日通过）

## 军事法（20件）
1. 中华人民共和国国防法（2020年12月26日修订）
";

    const MANIFEST: &str = r#"
[[navbar]]
text = "宪法相关法"
children = [
    { text = "民族区域自治法", link = "/constitutional-relevance/law-on-regional-national-autonomy/" },
]

[[sidebar]]
prefix = "/criminal-law/criminal-law/"
title = "中华人民共和国刑法"
items = []
"#;

    fn config(root: &Path) -> Config {
        Config::from_toml(MANIFEST, root).unwrap()
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "# law\n").unwrap();
        path
    }

    #[test]
    fn test_is_included_by_navbar_label() {
        let config = config(Path::new("/site"));
        assert!(is_included("中华人民共和国民族区域自治法", &config));
    }

    #[test]
    fn test_is_included_by_sidebar_title() {
        let config = config(Path::new("/site"));
        assert!(is_included("中华人民共和国刑法", &config));
    }

    #[test]
    fn test_not_included() {
        let config = config(Path::new("/site"));
        assert!(!is_included("中华人民共和国反分裂国家法", &config));
    }

    #[test]
    fn test_plan_filters_and_describes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mapping = CategoryMapping::parse(LAWS_LIST);
        let files = vec![
            touch(dir.path(), "中华人民共和国反分裂国家法_20050314.md"),
            touch(dir.path(), "中华人民共和国民族区域自治法_20010228.md"),
            touch(dir.path(), "中华人民共和国刑法_20201226.md"),
            touch(dir.path(), "中华人民共和国国防法_20201226.md"),
            touch(dir.path(), "未知法律_20200101.md"),
            touch(dir.path(), "中华人民共和国反有组织犯罪法_20211224.md"),
        ];

        let entries = plan(&files, &mapping, &config, 50);

        assert_eq!(
            entries,
            vec![
                PlanEntry {
                    law_name: "中华人民共和国反分裂国家法".to_owned(),
                    category: "宪法相关法".to_owned(),
                    category_dir: "constitutional-relevance".to_owned(),
                    md_file: files[0].clone(),
                    english_name: "anti-secession-law".to_owned(),
                },
                PlanEntry {
                    law_name: "中华人民共和国反有组织犯罪法".to_owned(),
                    category: "刑法".to_owned(),
                    category_dir: "criminal-law".to_owned(),
                    md_file: files[5].clone(),
                    english_name: "反有组织犯罪法".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_plan_respects_max_count() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mapping = CategoryMapping::parse(LAWS_LIST);
        let files = vec![
            touch(dir.path(), "中华人民共和国反分裂国家法_20050314.md"),
            touch(dir.path(), "中华人民共和国反有组织犯罪法_20211224.md"),
        ];

        let entries = plan(&files, &mapping, &config, 1);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].law_name, "中华人民共和国反分裂国家法");
    }

    #[test]
    fn test_discover_sorted_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b_20200101.md");
        touch(dir.path(), "a_20200101.md");
        touch(dir.path(), "notes.txt");
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let files = discover_law_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_20200101.md", "b_20200101.md"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let result = discover_law_files(Path::new("/nonexistent/laws_md"));
        assert!(matches!(result, Err(IntakeError::MissingInput(_))));
    }

    #[test]
    fn test_plan_from_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("laws-list.md"), LAWS_LIST).unwrap();
        let input = dir.path().join("converted");
        fs::create_dir(&input).unwrap();
        touch(&input, "中华人民共和国反分裂国家法_20050314.md");
        let manifest = format!(
            "{MANIFEST}\n[intake]\nlaws_list = \"laws-list.md\"\ninput_dir = \"converted\"\n"
        );
        let config = Config::from_toml(&manifest, dir.path()).unwrap();

        let entries = plan_from_config(&config).unwrap();

        assert_eq!(entries.len(), 1);
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["category_dir"], "constitutional-relevance");
        assert_eq!(json["english_name"], "anti-secession-law");
    }

    #[test]
    fn test_plan_from_config_missing_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml("", dir.path()).unwrap();

        let err = plan_from_config(&config).unwrap_err();

        assert!(matches!(err, IntakeError::Io { .. }));
        assert!(err.to_string().contains("laws-list.md"));
    }
}
