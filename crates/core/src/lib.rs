//! Domain types, errors and pure validation for the research board.
//!
//! This crate has no internal dependencies so it can be shared by the data
//! layer, the HTTP transport and any future tooling.

#[macro_use]
mod macros;

pub mod audit;
pub mod error;
pub mod normalize;
pub mod roles;
pub mod status;
pub mod types;
