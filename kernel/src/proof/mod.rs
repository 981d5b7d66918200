//! Proof module: canonical JSON, content hashing, chain replay.
//!
//! Depends on `carrier` and `operators`. `operators` uses `canon` and `hash`
//! for catalog digests; `replay` is the only part that depends back on
//! `operators`.

pub mod canon;
pub mod hash;
pub mod hash_domain;
pub mod replay;
