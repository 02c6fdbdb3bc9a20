//! Handlebars-based renderer that turns a stored template into compilable source.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled and HTML
//! escaping disabled. Strict mode makes any `{{variable}}` missing from the data
//! context a render error instead of an empty string; escaping is off because the
//! output is Solidity, where `&`, `<` and `"` are meaningful.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "contract_name": "StonerSharks", "max_supply": 4200 });
//! let source = renderer.render(embedded::ETH_TEMPLATE, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::error::{ForgeError, Result};
use crate::store::Template;

/// Final Solidity source for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Same as the template name; used as the source key when compiling and extracting.
    pub name: String,
    pub content: String,
}

/// Template renderer using Handlebars in strict mode.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| ForgeError::ContentEvaluation(e.to_string()))
    }

    /// Render a stored template into the source handed to the compiler.
    ///
    /// The context is `variables` plus the built-ins `template_name` and
    /// `contract_name`; built-ins take precedence over same-named variables.
    pub fn resolve(
        &self,
        template: &Template,
        variables: &Map<String, Value>,
        contract_name: &str,
    ) -> Result<ResolvedSource> {
        let mut data = variables.clone();
        data.insert("template_name".into(), Value::String(template.name.clone()));
        data.insert("contract_name".into(), Value::String(contract_name.to_string()));

        let content = self.render(&template.text, &Value::Object(data))?;
        tracing::info!(
            template = %template.name,
            bytes = content.len(),
            "rendered template"
        );
        Ok(ResolvedSource {
            name: template.name.clone(),
            content,
        })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForgeConfig;
    use crate::templates::embedded;

    fn template(text: &str) -> Template {
        Template {
            name: "EthTemplate.sol".into(),
            text: text.into(),
        }
    }

    #[test]
    fn test_render_substitutes_variables() {
        let renderer = TemplateRenderer::new();
        let data = serde_json::json!({ "contract_name": "StonerSharks" });
        let out = renderer.render("contract {{contract_name}} {}", &data).unwrap();
        assert_eq!(out, "contract StonerSharks {}");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render("contract {{contract_name}} {}", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, ForgeError::ContentEvaluation(_)));
    }

    #[test]
    fn test_malformed_template_is_content_error() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render("contract {{#if}} {}", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, ForgeError::ContentEvaluation(_)));
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let renderer = TemplateRenderer::new();
        let data = serde_json::json!({ "uri": "ipfs://x?a=1&b=<2>" });
        let out = renderer.render(r#"string s = "{{uri}}";"#, &data).unwrap();
        assert_eq!(out, r#"string s = "ipfs://x?a=1&b=<2>";"#);
    }

    #[test]
    fn test_plain_solidity_passes_through() {
        let renderer = TemplateRenderer::new();
        let source = "contract A { function f() public { if (true) { } } }";
        assert_eq!(renderer.render(source, &serde_json::json!({})).unwrap(), source);
    }

    #[test]
    fn test_resolve_keeps_template_name_and_injects_builtins() {
        let renderer = TemplateRenderer::new();
        let resolved = renderer
            .resolve(
                &template("// {{template_name}}\ncontract {{contract_name}} {}"),
                &Map::new(),
                "StonerSharks",
            )
            .unwrap();
        assert_eq!(resolved.name, "EthTemplate.sol");
        assert_eq!(resolved.content, "// EthTemplate.sol\ncontract StonerSharks {}");
    }

    #[test]
    fn test_builtins_override_variables() {
        let renderer = TemplateRenderer::new();
        let mut vars = Map::new();
        vars.insert("contract_name".into(), Value::String("Shadowed".into()));
        let resolved = renderer
            .resolve(&template("contract {{contract_name}} {}"), &vars, "StonerSharks")
            .unwrap();
        assert_eq!(resolved.content, "contract StonerSharks {}");
    }

    #[test]
    fn test_embedded_template_renders_with_default_config() {
        let config = ForgeConfig::default();
        let renderer = TemplateRenderer::new();
        let resolved = renderer
            .resolve(
                &template(embedded::ETH_TEMPLATE),
                &config.variables,
                &config.template.contract,
            )
            .unwrap();
        assert!(resolved.content.contains("contract StonerSharks is ERC721, Ownable"));
        assert!(resolved.content.contains("MAX_SUPPLY = 4200;"));
        assert!(resolved.content.contains(r#"ERC721("Stoner Sharks", "SHARK")"#));
        assert!(!resolved.content.contains("{{"));
    }
}
