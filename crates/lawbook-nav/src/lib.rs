//! Navigation bar and sidebar model for Lawbook.
//!
//! This crate holds the static data the site generator consumes:
//! - [`NavEntry`]: top-level navigation bar entries (links and one-level groups)
//! - [`SidebarMap`]: ordered sidebar sections keyed by URL path prefix
//! - [`ContentRef`]: a path identifying one document, with the routing rules
//!   used to map it to a route and to candidate source files
//!
//! Nothing here touches the filesystem. Resolution against a docs tree lives
//! in `lawbook-site`.
//!
//! # Example
//!
//! ```
//! use lawbook_nav::{ContentRef, SidebarMap, SidebarSection};
//!
//! let map = SidebarMap::new(vec![
//!     SidebarSection::new("/criminal-law/", "Criminal Law", vec![]),
//!     SidebarSection::new(
//!         "/criminal-law/amendment/",
//!         "Amendments",
//!         vec![ContentRef::new("/criminal-law/amendment/criminal-law-amendment-i.md")],
//!     ),
//! ]);
//!
//! let section = map.resolve("/criminal-law/amendment/criminal-law-amendment-i.html");
//! assert_eq!(section.map(|s| s.title.as_str()), Some("Amendments"));
//! ```

mod navbar;
mod reference;
mod sidebar;

pub use navbar::{NavEntry, NavEntryError, NavGroup, NavLink};
pub use reference::{ContentRef, RefKind, route_for_file};
pub use sidebar::{SidebarMap, SidebarSection};
