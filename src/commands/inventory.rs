use std::path::Path;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::{InventoryArgs, Jurisdiction};
use crate::commands::{document_dir, inventory_manifest_path};
use crate::grammar::FilenamePattern;
use crate::model::{DocumentEntry, DocumentInventoryManifest, RejectedDocument};
use crate::util::{
    discover_json_files, file_name_string, now_utc_string, sha256_file, write_json_pretty,
};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.cache_root, args.jurisdiction)?;

    for rejected in &manifest.rejected {
        warn!(file = %rejected.filename, reason = %rejected.reason, "document rejected");
    }

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            rejected = manifest.rejected.len(),
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| inventory_manifest_path(&args.cache_root, args.jurisdiction));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(
        document_count = manifest.document_count,
        rejected = manifest.rejected.len(),
        "inventory completed"
    );

    Ok(())
}

pub fn build_manifest(
    cache_root: &Path,
    jurisdiction: Jurisdiction,
) -> Result<DocumentInventoryManifest> {
    let source_dir = document_dir(cache_root, jurisdiction);
    let pattern = FilenamePattern::for_jurisdiction(jurisdiction)?;

    let paths = discover_json_files(&source_dir)?;
    if paths.is_empty() {
        bail!("no session documents found in {}", source_dir.display());
    }

    let mut documents = Vec::with_capacity(paths.len());
    let mut rejected = Vec::new();
    for path in paths {
        let filename = file_name_string(&path)?;

        let meta = match pattern.extract(&filename) {
            Ok(meta) => meta,
            Err(err) => {
                rejected.push(RejectedDocument {
                    filename,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let sha256 = sha256_file(&path)?;

        documents.push(DocumentEntry {
            filename,
            legislative_period: meta.legislative_period,
            session_number: meta.session_number,
            sha256,
        });
    }

    documents.sort_by(|a, b| {
        a.legislative_period
            .cmp(&b.legislative_period)
            .then(a.session_number.cmp(&b.session_number))
            .then(a.filename.cmp(&b.filename))
    });

    Ok(DocumentInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        jurisdiction,
        source_directory: source_dir.display().to_string(),
        document_count: documents.len(),
        documents,
        rejected,
    })
}
