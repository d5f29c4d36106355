//! Docs tree binding, integrity checks and export for Lawbook.
//!
//! This crate provides:
//! - [`Site`]: a loaded manifest paired with its docs directory, resolving
//!   content references to files and sidebars to titled items
//! - [`CheckReport`]: integrity findings for the navbar, sidebar and site options
//! - [`head_tags`] / [`render_head`]: tags injected into every page head, and
//!   [`client_script`]: page-view tracking on client-side navigation
//! - [`GeneratorConfig`]: the manifest in the static-site generator's shape
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use lawbook_config::Config;
//! use lawbook_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let site = Site::new(config);
//!
//! let report = site.check();
//! for diagnostic in report.diagnostics() {
//!     eprintln!("{diagnostic}");
//! }
//!
//! let sidebar = site.sidebar("/constitution/preamble.html");
//! # Ok(())
//! # }
//! ```

mod check;
mod export;
mod head;
mod site;
mod title;

pub use check::{CheckReport, Diagnostic, Severity};
pub use export::GeneratorConfig;
pub use head::{client_script, head_tags, render_head};
pub use site::{Resolution, ResolvedSidebar, Site, SidebarItem};
