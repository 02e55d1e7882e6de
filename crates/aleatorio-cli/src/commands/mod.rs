//! CLI command implementations.

pub mod common;
pub mod demo;
pub mod evolve;
pub mod inspect;
pub mod seed;
