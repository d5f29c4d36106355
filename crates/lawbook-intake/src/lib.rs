//! Planner for adding converted law texts to Lawbook.
//!
//! Law texts arrive as Markdown files named `<law name>_<YYYYMMDD>.md`. The
//! official laws list assigns each law to one of seven categories. The
//! planner proposes the next batch of laws that have a known category and are
//! not yet linked from the navbar or the sidebar.
//!
//! # Example
//!
//! ```
//! use lawbook_intake::{CategoryMapping, english_slug, law_name_from_stem};
//!
//! let mapping = CategoryMapping::parse("## 刑法（3件）\n1. 中华人民共和国刑法（2020年12月26日修正）\n");
//! assert_eq!(mapping.category_of("中华人民共和国刑法"), Some("刑法"));
//!
//! assert_eq!(law_name_from_stem("中华人民共和国反分裂国家法_20050314"), "中华人民共和国反分裂国家法");
//! assert_eq!(english_slug("中华人民共和国反分裂国家法"), "anti-secession-law");
//! ```

mod laws_list;
mod naming;
mod plan;

use std::path::PathBuf;

pub use laws_list::{CategoryMapping, category_dir};
pub use naming::{english_slug, law_name_from_stem};
pub use plan::{PlanEntry, discover_law_files, is_included, plan, plan_from_config};

/// Intake planner error.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// Input file or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Directory of converted law texts does not exist.
    #[error("Input directory not found: {}", .0.display())]
    MissingInput(PathBuf),
    /// Input directory is not valid UTF-8 and cannot form a glob pattern.
    #[error("Input directory is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    /// Glob pattern error.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Error while walking matched files.
    #[error("Failed to list law files: {0}")]
    Glob(#[from] glob::GlobError),
}
