use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::{Jurisdiction, StatusArgs};
use crate::commands::segment::SEGMENT_RUN_PREFIX;
use crate::commands::{default_geometry_path, inventory_manifest_path, manifest_dir};
use crate::model::{DocumentInventoryManifest, GeometryThresholds, SegmentRunManifest};
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let jurisdiction = args.jurisdiction;
    let inventory_path = inventory_manifest_path(&args.cache_root, jurisdiction);
    let geometry_path = default_geometry_path(&args.cache_root, jurisdiction);

    info!(
        cache_root = %args.cache_root.display(),
        jurisdiction = jurisdiction.code(),
        "status requested"
    );

    if inventory_path.exists() {
        let inventory: DocumentInventoryManifest = read_json(&inventory_path)?;
        info!(
            generated_at = %inventory.generated_at,
            document_count = inventory.document_count,
            rejected = inventory.rejected.len(),
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    if geometry_path.exists() {
        let geometry: GeometryThresholds = read_json(&geometry_path)?;
        info!(
            header_bound = geometry.header_bound,
            indent_left = geometry.indent_left,
            indent_right = geometry.indent_right,
            "loaded geometry thresholds"
        );
    } else {
        warn!(path = %geometry_path.display(), "geometry thresholds missing");
    }

    match latest_run_manifest(&manifest_dir(&args.cache_root), jurisdiction)? {
        Some(path) => {
            let run: SegmentRunManifest = read_json(&path)?;
            let warnings = run
                .sessions
                .iter()
                .map(|session| session.warnings.len())
                .sum::<usize>();
            info!(
                run_id = %run.run_id,
                status = %run.status,
                updated_at = %run.updated_at,
                processed = run.processed_count,
                failed = run.failed_count,
                segments = run.segment_count,
                warnings,
                "loaded latest segment run"
            );
        }
        None => warn!("no segment run recorded yet"),
    }

    Ok(())
}

fn latest_run_manifest(dir: &Path, jurisdiction: Jurisdiction) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }

    let prefix = format!("{SEGMENT_RUN_PREFIX}{}_", jurisdiction.dir_name());
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".json") {
            candidates.push(entry.path());
        }
    }

    candidates.sort();
    Ok(candidates.pop())
}
