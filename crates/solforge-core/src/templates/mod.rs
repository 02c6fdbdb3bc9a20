//! Template system for solforge.
//!
//! A Solidity template is rendered with [Handlebars](https://handlebarsjs.com/) via
//! [`renderer::TemplateRenderer`] before compilation. Rendering is plain substitution:
//! nothing inside a template is ever executed.
//!
//! ## Template variables
//!
//! The data context is fixed and enumerable:
//! - `{{template_name}}`: template file name (e.g., `EthTemplate.sol`)
//! - `{{contract_name}}`: contract extracted after compilation (e.g., `StonerSharks`)
//! - every key of the `variables` section of `solforge.config.json`
//!
//! The [`embedded`] module carries the starter template written by `solforge init`.
//!
//! **Warning**: the starter template in `templates/` and the defaults in
//! [`crate::config::ForgeConfig`] must stay in sync. Strict mode turns a variable
//! the config does not define into a render error.

pub mod embedded;
pub mod renderer;
