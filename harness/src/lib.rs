//! Emplaka Harness: build, persist and query the plate-puzzle graph.
//!
//! The harness owns everything outside the graph itself: the snapshot
//! directory on disk, plate parsing, answer rendering and the two binaries
//! (`emplaka-build`, `emplaka`). Graph semantics live in `emplaka_search`;
//! the harness only orchestrates.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph_dir;
pub mod plate;
pub mod render;
pub mod runner;
