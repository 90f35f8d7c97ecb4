//! AssetGuard CLI library.
//!
//! This crate provides the command implementations behind the `assetguard`
//! binary: project scans, configuration scaffolding and pattern listing.

pub mod commands;
pub mod logging;
