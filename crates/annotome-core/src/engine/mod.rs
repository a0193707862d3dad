//! # Engine Module
//!
//! Attaches parsed annotation records to the proteins of a proteome under a
//! partial-failure policy.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - The `safe`/`skip_bad`/`verbose`/`autoname` load policy
//! - **Outcomes** ([`outcome`]) - What happened to each record
//! - **Loading** ([`loader`]) - The generic bulk loader and its report
//! - **Error Handling** ([`error`]) - Errors that abort a load

pub mod config;
pub mod error;
pub mod loader;
pub mod outcome;
