//! Text templates embedded in the binary
//!
//! Templates live in `templates/` at the root of the crate and are rendered with tera.
use anyhow::{Context as _, Result};
use rust_embed::RustEmbed;
use tera::Tera;

#[derive(RustEmbed)]
#[folder = "templates"]
struct TemplateFiles;

pub struct Templates;

impl Templates {
    /// Renders an embedded template by its file name, i.e. `summary.txt`
    pub fn render(name: &str, context: &tera::Context) -> Result<String> {
        let tera = Self::load()?;

        tera.render(name, context)
            .with_context(|| format!("Failed to render template {name}"))
    }

    fn load() -> Result<Tera> {
        let mut tera = Tera::default();

        for name in TemplateFiles::iter() {
            let file = TemplateFiles::get(&name)
                .with_context(|| format!("Embedded template {name} disappeared"))?;
            let content = std::str::from_utf8(file.data.as_ref())
                .with_context(|| format!("Template {name} is not valid utf-8"))?;

            tera.add_raw_template(&name, content)
                .with_context(|| format!("Failed to parse template {name}"))?;
        }

        Ok(tera)
    }
}
