//! Carrier module: the payload representation shared by every layer.
//!
//! Depends on nothing internal.

pub mod value_key;
