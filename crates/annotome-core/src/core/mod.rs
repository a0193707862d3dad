//! # Core Module
//!
//! Data models for proteins and their annotations, the interchange formats that
//! carry annotations in and out of them, and the diagnostics both report.
//!
//! - **Models** ([`models`]) - `Proteome`, `Protein`, `Domain`, `Site` and attribute values
//! - **File I/O** ([`io`]) - Domains/Sites delimited files and FASTA proteomes
//! - **Diagnostics** ([`diagnostics`]) - Recoverable problems collected during reads and loads

pub mod diagnostics;
pub mod io;
pub mod models;
