//! Page metadata pipeline: merge overrides into base config, sanitize
//! user-authored strings, render the head tag fragment.

pub mod merge;
pub mod sanitize;
pub mod tags;

pub use merge::{MetadataOverrides, merge_metadata};
pub use sanitize::{sanitize_description, sanitize_title};
pub use tags::{render_head_tags, resolve_metadata};
