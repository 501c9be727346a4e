//! One-shot analysis.

use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result, bail};
use archgo_core::vault::derive_title;
use archgo_infrastructure::attachment::load_attachment;
use colored::Colorize;
use std::path::Path;

pub async fn run(
    ctx: &AppContext,
    image: Option<&Path>,
    text: Option<&str>,
    save: bool,
    title: Option<&str>,
) -> Result<()> {
    let text = text.unwrap_or_default();
    if image.is_none() && text.trim().is_empty() {
        bail!("Provide --image, --context, or both");
    }

    let preview = match image {
        Some(path) => {
            let (file, preview) = load_attachment(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            println!("{}", format!("Attached {} ({})", file.name, file.mime_type).bright_black());
            Some(preview)
        }
        None => None,
    };

    let request = archgo_interaction::build_request(preview.as_deref(), text)?;
    let backend = ctx.backend()?;

    println!("{}", "Analyzing architecture...".bright_black());
    let result = backend.analyze(&request).await.map_err(|e| {
        tracing::error!("[Analyze] {}", e);
        anyhow::anyhow!(e.user_message())
    })?;

    render::print_result(&result);

    if save {
        let title = match title {
            Some(t) => t.to_string(),
            None => derive_title(text),
        };
        let entry = ctx.vault_store()?.save(result, Some(&title))?;
        println!();
        println!("{}", format!("Saved to vault as {} ({})", entry.title, entry.id).green());
    }

    Ok(())
}
