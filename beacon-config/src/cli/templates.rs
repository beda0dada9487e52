//! Starter config file layouts, one per format.
//!
//! Values are substituted verbatim; callers that need escaping should not
//! route arbitrary input through here. A project name that breaks the target
//! syntax is caught by the post-write validation step instead.

use crate::loader::ConfigFormat;

/// Values substituted into a starter config file.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// Project name, already trimmed.
    pub name: &'a str,
    /// Project secret.
    pub secret: &'a str,
}

/// Render the starter config for `format`. Always emits exactly one project.
pub fn render(format: ConfigFormat, ctx: &TemplateContext<'_>) -> String {
    match format {
        ConfigFormat::Json => render_json(ctx),
        ConfigFormat::Toml => render_toml(ctx),
        ConfigFormat::Yaml => render_yaml(ctx),
    }
}

fn render_json(ctx: &TemplateContext<'_>) -> String {
    format!(
        "\
{{
  \"projects\": [
    {{
      \"name\": \"{name}\",
      \"secret\": \"{secret}\"
    }}
  ]
}}
",
        name = ctx.name,
        secret = ctx.secret,
    )
}

fn render_toml(ctx: &TemplateContext<'_>) -> String {
    format!(
        "\
[[projects]]
    name = \"{name}\"
    secret = \"{secret}\"
",
        name = ctx.name,
        secret = ctx.secret,
    )
}

fn render_yaml(ctx: &TemplateContext<'_>) -> String {
    format!(
        "\
projects:
  - name: {name}
    secret: {secret}
",
        name = ctx.name,
        secret = ctx.secret,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: TemplateContext<'static> = TemplateContext {
        name: "chat",
        secret: "0d9e3b6c-52a4-4b8e-9f0e-2c4f1a7d8e90",
    };

    #[test]
    fn json_layout() {
        assert_eq!(
            render(ConfigFormat::Json, &CTX),
            r#"{
  "projects": [
    {
      "name": "chat",
      "secret": "0d9e3b6c-52a4-4b8e-9f0e-2c4f1a7d8e90"
    }
  ]
}
"#
        );
    }

    #[test]
    fn toml_layout_quotes_values() {
        assert_eq!(
            render(ConfigFormat::Toml, &CTX),
            "[[projects]]\n    name = \"chat\"\n    secret = \"0d9e3b6c-52a4-4b8e-9f0e-2c4f1a7d8e90\"\n"
        );
    }

    #[test]
    fn yaml_layout() {
        assert_eq!(
            render(ConfigFormat::Yaml, &CTX),
            "projects:\n  - name: chat\n    secret: 0d9e3b6c-52a4-4b8e-9f0e-2c4f1a7d8e90\n"
        );
    }

    #[test]
    fn substitution_is_literal() {
        let ctx = TemplateContext {
            name: "has \"quotes\"",
            secret: "s",
        };
        let rendered = render(ConfigFormat::Json, &ctx);
        assert!(rendered.contains(r#""name": "has "quotes"""#));
    }
}
