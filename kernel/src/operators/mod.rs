//! Operators module: the operation catalog and the `apply()` entry point.
//!
//! Depends on `carrier`. Does not import from `proof`.

pub mod apply;
pub mod operator_catalog;
