//! Recover human readable names from OpenType `name` tables.
//!
//! Many fonts, CJK ones in particular, store names in a charset other than
//! the one their platform and encoding IDs declare. Each record is decoded
//! by trying candidate charsets picked from the record IDs and its bytes,
//! the result carries an `IssueLevel` telling how much it can be trusted.
//!
//! `get_display_name()` composes the best name of each writing system,
//! `Selector` configures which names are used and how they are joined.
//! Module `font` reads records from font files and collections.
#![deny(clippy::dbg_macro)]
mod charset;
pub mod font;
mod heuristics;
pub mod record;
mod score;
mod select;

pub use charset::{is_anomaly, try_decode, Charset, Decoded, Framing};
pub use font::{FontError, Result};
pub use heuristics::{candidates_for, candidates_for_record, declared_charset, Candidate, Source};
pub use record::{NameRecord, WritingSystem};
pub use score::{decode_name, score, DecodeResult, IssueLevel};
pub use select::{
    get_display_name, NameClass, Selector, DEFAULT_PREFERENCE, DEFAULT_SEPARATOR,
};
