//! Composed scaffold component wrapping every usage.

use super::templates::TemplateEngine;
use crate::error::Result;
use serde::Serialize;

const SCAFFOLD: &str = "scaffold";

const SCAFFOLD_TEMPLATE: &str = "{{imports_block}}const {{pascal_case name}} = () => {
  return (
    <{{wrapper}}>
{{indent usages 6}}
    </{{wrapper}}>
  );
};

export default {{pascal_case name}};";

#[derive(Serialize)]
struct ScaffoldData<'s> {
    name: &'s str,
    wrapper: &'s str,
    imports_block: String,
    usages: &'s str,
}

/// Renders the scaffold template.
pub struct ScaffoldGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> ScaffoldGenerator<'a> {
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        engine.register_template(SCAFFOLD, SCAFFOLD_TEMPLATE)?;
        Ok(Self { engine })
    }

    /// Render a component named `name`, in PascalCase, whose body is
    /// `usages` inside `wrapper`.
    pub fn render(&self, name: &str, wrapper: &str, imports: &[String], usages: &str) -> Result<String> {
        let imports_block = if imports.is_empty() {
            String::new()
        } else {
            format!("{}\n\n", imports.join("\n"))
        };
        self.engine.render(
            SCAFFOLD,
            &ScaffoldData {
                name,
                wrapper,
                imports_block,
                usages,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scaffold() {
        let scaffold = ScaffoldGenerator::new().unwrap();
        let code = scaffold
            .render(
                "LoginForm",
                "form",
                &["import { Button } from '@acme/ui/Button';".to_string()],
                "<Input type=\"email\" />\n<Button variant=\"primary\" />",
            )
            .unwrap();

        insta::assert_snapshot!(code, @r###"
        import { Button } from '@acme/ui/Button';

        const LoginForm = () => {
          return (
            <form>
              <Input type="email" />
              <Button variant="primary" />
            </form>
          );
        };

        export default LoginForm;
        "###);
    }

    #[test]
    fn test_render_without_imports() {
        let scaffold = ScaffoldGenerator::new().unwrap();
        let code = scaffold.render("Page", "div", &[], "<Card />").unwrap();
        assert!(code.starts_with("const Page = () => {"));
        assert!(code.contains("      <Card />\n"));
    }

    #[test]
    fn test_component_name_is_pascal_cased() {
        let scaffold = ScaffoldGenerator::new().unwrap();
        let code = scaffold.render("login_form", "div", &[], "<Card />").unwrap();
        assert!(code.starts_with("const LoginForm = () => {"));
        assert!(code.ends_with("export default LoginForm;"));
    }
}
