//! Document render command.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tessera_markup::{Renderer, Value};

use crate::config::ConfigFile;

const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// Load an element document, choosing the format by file extension.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let json: serde_json::Value = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        other => bail!("Unsupported document type '{}': {}", other, path.display()),
    };

    Ok(Value::from(json))
}

/// Render a loaded document with the configured renderer.
pub fn render_document(config: &ConfigFile, document: &Value, doctype: bool) -> Result<String> {
    let renderer = Renderer::new(config.render.clone());
    let markup = renderer.render(document)?;

    if doctype {
        Ok(format!("{DOCTYPE}{markup}"))
    } else {
        Ok(markup)
    }
}

/// Run the render command.
pub fn run(
    config: &ConfigFile,
    input: &Path,
    output: Option<PathBuf>,
    doctype: Option<bool>,
) -> Result<()> {
    let start = Instant::now();

    let document = load_document(input)?;
    let html = render_document(config, &document, doctype.unwrap_or(config.output.doctype))
        .with_context(|| format!("Failed to render {}", input.display()))?;

    match output {
        Some(path) => {
            fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                "Rendered {} to {} in {}ms",
                input.display(),
                path.display(),
                start.elapsed().as_millis()
            );
        }
        None => println!("{html}"),
    }

    Ok(())
}
