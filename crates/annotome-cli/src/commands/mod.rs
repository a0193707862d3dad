pub mod annotate;
pub mod check;
