//! linefind - find the line of a document that best matches a query phrase
//!
//! Each document line is fingerprinted once (`WordSet`: word and character
//! frequency tables plus a break-collapsed form of the line). A query is
//! fingerprinted the same way and scored against every line by containment,
//! which tolerates typos, reordering and partial phrasing.
//!
//! ```
//! use linefind::Document;
//!
//! let document = Document::build(["The quick brown fox", "jumps over", "the lazy dog"]);
//! assert_eq!(document.fuzzy_find("quick fox").unwrap(), 0);
//! ```

pub mod config;
pub mod document;
pub mod interface;
pub mod loader;
pub mod similarity;
pub mod word_set;

pub use document::Document;
pub use interface::*;
pub use word_set::WordSet;
