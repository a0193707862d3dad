//! # Core Models Module
//!
//! Data structures for proteins and their sequence annotations.
//!
//! ## Key Components
//!
//! - [`proteome`] - A collection of proteins keyed by unique identifier
//! - [`protein`] - One sequence and the domains and sites attached to it
//! - [`domain`] - Interval annotations and their loader records
//! - [`site`] - Point annotations and their loader records
//! - [`attributes`] - Open-ended key/value metadata shared by all annotations
//! - [`ids`] - Stable keys for proteins, domains and sites
//! - [`error`] - Invariant violations raised at insertion time
//!
//! ## Usage
//!
//! ```ignore
//! use annotome::core::models::{domain::DomainRecord, protein::{InsertOptions, Protein}};
//!
//! let mut protein = Protein::new("P1", "example", "MKVLAAGILLLALA");
//! protein.add_domain(DomainRecord::new(2, 8, "IDR"), InsertOptions::default())?;
//! ```

pub mod attributes;
pub mod domain;
pub mod error;
pub mod ids;
pub mod protein;
pub mod proteome;
pub mod site;
