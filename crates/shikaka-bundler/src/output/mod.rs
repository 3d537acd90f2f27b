//! Artifact emission.

pub mod writer;

pub use writer::{WrittenFile, apply_addons, write_bundle_to};
