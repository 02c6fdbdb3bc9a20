//! Compile-time embedded templates for project scaffolding.
//!
//! Paths are relative to this source file
//! (`crates/solforge-core/src/templates/embedded.rs`). Moving a template without
//! updating its `include_str!` path fails the build.

/// ERC-721 starter contract written to `templates/EthTemplate.sol` by `solforge init`.
pub const ETH_TEMPLATE: &str = include_str!("../../../../templates/contracts/EthTemplate.sol");
