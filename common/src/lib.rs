//! # Assay Common
//!
//! Shared vocabulary of the workspace: the [`asset::AssetType`] set, the pure
//! string classifiers in [`classify`], and the runtime [`config::Config`].
//!
//! Nothing in this crate performs I/O.

pub mod asset;
pub mod classify;
pub mod config;
