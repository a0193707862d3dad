//! # Annotome Core Library
//!
//! Hierarchical protein annotations: a proteome of proteins, each carrying
//! interval annotations (domains) and point annotations (sites), with a tolerant
//! delimited-text interchange format for loading and saving them in bulk.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Data models that enforce annotation bounds on
//!   insertion, the Domains/Sites readers and writers, the `key:value` attribute
//!   parser and the FASTA proteome source.
//!
//! - **[`engine`]: The Loading Logic.** Applies a [`engine::config::LoadPolicy`]
//!   while attaching parsed records to proteins, producing a per-record outcome
//!   and a report of what was added or skipped.
//!
//! - **[`workflows`]: The Public API.** File- and table-level entry points such as
//!   [`workflows::domains::add_domains_from_file`] and
//!   [`workflows::sites::write_sites`].

pub mod core;
pub mod engine;
pub mod workflows;
