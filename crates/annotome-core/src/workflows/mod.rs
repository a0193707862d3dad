//! File- and table-level entry points for loading and saving annotations.
//!
//! Each annotation kind offers the same three operations: load from a file,
//! load from an already-parsed table, and write a proteome back out.

pub mod domains;
pub mod sites;
