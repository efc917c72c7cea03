//! PHPDoc block parsing.
//!
//! This module finds the `/** ... */` comment belonging to a declaration
//! and extracts the alternatives of its `@return` tag.  No other tags are
//! interpreted.
//!
//! # Submodules
//!
//! - [`tags`]: docblock text retrieval and `@return` extraction.

mod tags;

pub use tags::{RETURN_TAG_MARKER, get_docblock_text_for_node, parse_return_types};
