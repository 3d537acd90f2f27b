//! Command implementations.
//!
//! Shikaka has a single command; it lives in [`build`].

pub mod build;
pub(crate) mod utils;

pub use build::execute as build_execute;
