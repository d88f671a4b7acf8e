//! Region editing.
//!
//! This module applies change tokens to the regions of a [`Wad`](crate::Wad):
//! - Deleting regions by name, group or pattern
//! - Replacing payloads with literal text or file contents
//! - Touching regions without changing them
//! - Adding new lumps at the end
//!
//! # Example
//!
//! ```rust,ignore
//! use wadlump::Wad;
//! use wadlump::edit::{EditOptions, EditableWad};
//!
//! let mut wad = Wad::open_path("e1m1.wad")?;
//!
//! let mut editor = wad.edit().with_options(EditOptions::new().invert(true));
//! editor.change("_standard_")?;
//! let result = editor.apply()?;
//!
//! println!("Kept {} regions, deleted {}",
//!          result.total_regions(),
//!          result.regions_deleted);
//! ```
//!
//! # Implementation Notes
//!
//! The editor works by:
//! 1. Parsing every token up front (group names, patterns and source files)
//! 2. Rejecting literal targets named twice
//! 3. Expanding each group or pattern against the names still alive
//! 4. Marking, replacing or keeping the matches in token order
//! 5. Dropping deleted regions and appending added lumps

mod editor;
pub mod group;
mod operation;

pub use editor::{EditOptions, EditResult, EditableWad, Editor};
pub use group::Rule;
pub use operation::{Action, Directive, Target};
