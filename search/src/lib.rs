//! Emplaka Search: reachability graph over the plate-puzzle operations.
//!
//! This crate builds the graph and answers puzzle queries. It depends only on
//! `emplaka_kernel`; it does NOT depend on `emplaka_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! emplaka_kernel  ←  emplaka_search  ←  emplaka_harness
//! (payload, ops)     (graph, closure)    (snapshot dir, CLI)
//! ```
//!
//! # Key types
//!
//! - [`NodeRegistry`] -- interning arena; one node per payload
//! - [`expansion::expand_to_fixed_point`] -- grows the graph from the kernel
//! - [`closure::close_node`] -- transitive closure with one chain per target
//! - [`SolutionFinder`] -- intersects two kernel closures
//! - [`snapshot`] -- canonical JSON form of a finished graph
//! - [`EnginePolicyV1`] -- expansion budgets

#![forbid(unsafe_code)]

pub mod closure;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod node;
pub mod policy;
pub mod registry;
pub mod snapshot;
pub mod solution;

pub use error::GraphError;
pub use node::{Node, NodeId};
pub use policy::EnginePolicyV1;
pub use registry::NodeRegistry;
pub use solution::{Solution, SolutionFinder};
