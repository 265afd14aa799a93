use anyhow::{Result, bail};
use chrono::Utc;
use tracing::info;

use crate::cli::ProfileArgs;
use crate::commands::{default_geometry_path, document_dir, manifest_dir};
use crate::grammar::LayoutMarkers;
use crate::model::{Document, ProfileManifest};
use crate::util::{
    discover_json_files, file_name_string, now_utc_string, read_json, utc_compact_string,
    write_json_pretty,
};

use super::layout::{profile_layout, select_sample};

pub fn run(args: ProfileArgs) -> Result<()> {
    let jurisdiction = args.jurisdiction;
    let source_dir = document_dir(&args.cache_root, jurisdiction);

    let files = discover_json_files(&source_dir)?;
    if files.is_empty() {
        bail!("no session documents found in {}", source_dir.display());
    }

    let sample = select_sample(&files, args.sample_size);
    info!(
        jurisdiction = jurisdiction.code(),
        available = files.len(),
        sampled = sample.len(),
        "profiling layout"
    );

    let mut documents = Vec::with_capacity(sample.len());
    let mut sample_files = Vec::with_capacity(sample.len());
    for path in &sample {
        documents.push(read_json::<Document>(path)?);
        sample_files.push(file_name_string(path)?);
    }

    let markers = LayoutMarkers::for_jurisdiction(jurisdiction)?;
    let profile = profile_layout(&documents, &markers)?;

    if !profile.discarded_left.is_empty() || !profile.discarded_right.is_empty() {
        info!(
            left = ?profile.discarded_left,
            right = ?profile.discarded_right,
            "discarded one-off applause offsets"
        );
    }

    let geometry_path = args
        .geometry_path
        .unwrap_or_else(|| default_geometry_path(&args.cache_root, jurisdiction));
    write_json_pretty(&geometry_path, &profile.geometry)?;

    let manifest = ProfileManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        jurisdiction,
        sample_files,
        header_observations: profile.header_observations,
        applause_observations: profile.applause_observations,
        discarded_left_margins: profile.discarded_left,
        discarded_right_margins: profile.discarded_right,
        geometry: profile.geometry,
    };
    let manifest_path = manifest_dir(&args.cache_root).join(format!(
        "profile_{}_{}.json",
        jurisdiction.dir_name(),
        utc_compact_string(Utc::now())
    ));
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        header_bound = profile.geometry.header_bound,
        indent_left = profile.geometry.indent_left,
        indent_right = profile.geometry.indent_right,
        path = %geometry_path.display(),
        "wrote geometry thresholds"
    );
    info!(path = %manifest_path.display(), "wrote profile manifest");

    Ok(())
}
