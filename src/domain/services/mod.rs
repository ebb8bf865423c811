//! Pure domain logic: URL codec, list parsing and link matching.

pub mod link_matcher;
pub mod list_parser;
pub mod url_codec;

pub use link_matcher::extract_entity_ref;
pub use list_parser::{ListRecord, parse_records, populate};
pub use url_codec::{DEFAULT_CDN_BASE, UrlCodec};
