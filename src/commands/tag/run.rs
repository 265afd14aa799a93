use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::TagArgs;
use crate::commands::{default_geometry_path, load_geometry};
use crate::grammar::GrammarProfile;
use crate::model::Document;
use crate::util::{ensure_directory, read_json};

use super::tagger::tag_document;

pub fn run(args: TagArgs) -> Result<()> {
    let geometry_path = args
        .geometry_path
        .unwrap_or_else(|| default_geometry_path(&args.cache_root, args.jurisdiction));
    let geometry = load_geometry(&geometry_path)?;
    let profile = GrammarProfile::for_jurisdiction(args.jurisdiction, geometry)?;

    let document: Document = read_json(&args.document)?;
    let tagged = tag_document(&document, &profile);

    let output_path = args
        .output_path
        .unwrap_or_else(|| args.document.with_extension("tagged.txt"));
    if let Some(parent) = output_path.parent() {
        ensure_directory(parent)?;
    }

    let mut rendered = tagged.render();
    rendered.push('\n');
    fs::write(&output_path, rendered)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    info!(
        path = %output_path.display(),
        lines = tagged.lines.len(),
        fragments = tagged.stats.fragments_seen,
        headers_dropped = tagged.stats.header_fragments_dropped,
        skipped = tagged.stats.fragments_skipped,
        interjections = tagged.stats.interjection_spans,
        indentations = tagged.stats.indentation_spans,
        "wrote tagged document"
    );

    Ok(())
}
