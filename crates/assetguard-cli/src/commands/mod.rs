//! Command implementations for the AssetGuard CLI

pub mod init;
pub mod patterns;
pub mod scan;
