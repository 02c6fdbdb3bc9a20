//! Core library for the solforge toolkit.
//!
//! Turns a single Solidity source template into deployable artifacts (ABI and
//! bytecode) by delegating compilation to an external Solidity compiler:
//!
//! ```text
//! TemplateStore -> TemplateRenderer -> compiler::invoke (+ ImportResolver) -> artifact::extract
//! ```
//!
//! The compiler itself sits behind the [`compiler::SolidityCompiler`] trait. The
//! `solc` binary driver lives in its own crate:
//! - [`solforge_solc`](https://docs.rs/solforge-solc): `solc --standard-json`
//!
//! [`invocation::handle`] wraps the whole pipeline and maps every failure to a
//! status code and an error-kind-tagged body.

pub mod artifact;
pub mod compiler;
pub mod config;
pub mod error;
pub mod invocation;
pub mod pipeline;
pub mod project;
pub mod resolver;
pub mod store;
pub mod templates;
pub mod version;
