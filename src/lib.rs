//! things-json - wire codec for to-do documents
//!
//! This crate encodes and decodes JSON documents made of typed envelopes
//! (`{"type", "operation", "id", "attributes"}`) describing to-dos, projects,
//! headings and checklist items, and provides the `tj` CLI on top.
//!
//! # Architecture
//!
//! - [`codec`] - Envelope codec, field tables, variant selection, date policies
//! - [`model`] - Record types (Todo, Project, Heading, `ChecklistItem`, Container)
//! - [`validate`] - Advisory checks on decoded documents
//! - [`document`] - File I/O, content hashing, statistics
//! - [`config`] - Settings resolution
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod validate;

pub use codec::{Codec, CodecError};
pub use error::{Error, Result};
