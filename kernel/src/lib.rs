//! Emplaka Kernel: the arithmetic core of the plate-puzzle engine.
//!
//! # API Surface
//!
//! The kernel exposes exactly three entry points:
//!
//! - [`carrier::value_key::ValueKey`] -- the 1- or 2-integer payload that identifies a node
//! - [`operators::apply::apply`] -- apply one catalog operation to a payload
//! - [`proof::replay::verify_chain`] -- verify that an operation chain reproduces a target payload
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `operators` ← `proof::replay`
//!
//! `carrier` depends on nothing internal. `operators` additionally uses
//! `proof::canon` and `proof::hash` to digest a catalog; those two depend on
//! nothing else in the crate.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
