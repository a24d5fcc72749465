//! Whole-document utilities.
//!
//! - **File**: read a document from a path or stdin, atomic rewrite
//! - **Hashing**: SHA256 fingerprint of the canonical encoding
//! - **Stats**: per-kind counts for reporting
//!
//! # Example
//!
//! ```ignore
//! use tj::codec::Codec;
//! use tj::document::{content_hash, read_document, Stats};
//!
//! let text = read_document(Some(path))?;
//! let doc = Codec::default().parse(&text)?;
//! let stats = Stats::of(&doc);
//! println!("{} entries, {}", stats.total(), content_hash(&doc)?);
//! ```

mod file;
mod hash;
mod stats;

pub use file::{atomic_write, read_document};
pub use hash::content_hash;
pub use stats::Stats;
