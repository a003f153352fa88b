//! Core math modules.

pub mod growth;
pub mod sum;
