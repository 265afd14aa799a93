use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::cli::SegmentArgs;
use crate::commands::tag::tag_document;
use crate::commands::{
    default_geometry_path, document_dir, jurisdiction_dir, load_geometry, manifest_dir,
};
use crate::grammar::{GrammarProfile, SanityFloors};
use crate::model::{
    Document, DocumentEntry, FileFailure, SegmentRunManifest, SegmentRunPaths, SessionReport,
    SpeechSegment,
};
use crate::util::{
    discover_json_files, file_name_string, now_utc_string, read_json, sha256_file,
    utc_compact_string, write_json_pretty,
};

use super::engine::segment_document;

pub(crate) const SEGMENT_RUN_PREFIX: &str = "segment_run_";

struct ProcessedSession {
    source: DocumentEntry,
    report: SessionReport,
    segments: Vec<SpeechSegment>,
}

pub fn run(args: SegmentArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));
    let jurisdiction = args.jurisdiction;

    let source_dir = document_dir(&args.cache_root, jurisdiction);
    let geometry_path = args
        .geometry_path
        .clone()
        .unwrap_or_else(|| default_geometry_path(&args.cache_root, jurisdiction));
    let output_path = args.output_path.clone().unwrap_or_else(|| {
        jurisdiction_dir(&args.cache_root, jurisdiction).join(format!("segments_{run_id}.json"))
    });
    let run_manifest_path = args.run_manifest_path.clone().unwrap_or_else(|| {
        manifest_dir(&args.cache_root).join(format!(
            "{SEGMENT_RUN_PREFIX}{}_{run_id}.json",
            jurisdiction.dir_name()
        ))
    });

    let geometry = load_geometry(&geometry_path)?;
    let defaults = SanityFloors::default();
    let sanity = SanityFloors {
        min_interjections: args.min_interjections.unwrap_or(defaults.min_interjections),
        min_turns: args.min_turns.unwrap_or(defaults.min_turns),
    };
    let profile = GrammarProfile::for_jurisdiction(jurisdiction, geometry)?.with_sanity(sanity);

    let files = discover_json_files(&source_dir)?;
    if files.is_empty() {
        bail!("no session documents found in {}", source_dir.display());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .context("failed to build segmentation thread pool")?;
    let timeout = Duration::from_millis(args.timeout_ms);

    info!(
        jurisdiction = jurisdiction.code(),
        documents = files.len(),
        threads = pool.current_num_threads(),
        "segmentation started"
    );

    let results = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path, segment_file(path, &profile, timeout)))
            .collect::<Vec<(&PathBuf, Result<ProcessedSession>)>>()
    });

    let mut processed = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(session) => processed.push(session),
            Err(err) => {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                warn!(file = %filename, error = %format!("{err:#}"), "session failed");
                failures.push(FileFailure {
                    filename,
                    error: format!("{err:#}"),
                });
            }
        }
    }

    processed.sort_by(|a, b| {
        a.report
            .legislative_period
            .cmp(&b.report.legislative_period)
            .then(a.report.session_number.cmp(&b.report.session_number))
            .then(a.report.filename.cmp(&b.report.filename))
    });

    let mut segments = Vec::new();
    let mut sessions = Vec::with_capacity(processed.len());
    let mut source_hashes = Vec::with_capacity(processed.len());
    for session in processed {
        segments.extend(session.segments);
        sessions.push(session.report);
        source_hashes.push(session.source);
    }

    write_json_pretty(&output_path, &segments)?;
    info!(path = %output_path.display(), segments = segments.len(), "wrote speech segments");

    let manifest = SegmentRunManifest {
        manifest_version: 1,
        run_id,
        jurisdiction,
        status: if failures.is_empty() {
            "completed".to_string()
        } else {
            "completed_with_failures".to_string()
        },
        started_at,
        updated_at: now_utc_string(),
        command: render_segment_command(&args),
        paths: SegmentRunPaths {
            cache_root: args.cache_root.display().to_string(),
            document_dir: source_dir.display().to_string(),
            geometry_path: geometry_path.display().to_string(),
            output_path: output_path.display().to_string(),
        },
        geometry,
        document_count: files.len(),
        processed_count: sessions.len(),
        failed_count: failures.len(),
        segment_count: segments.len(),
        sessions,
        failures,
        source_hashes,
    };

    write_json_pretty(&run_manifest_path, &manifest)?;

    info!(path = %run_manifest_path.display(), "wrote segment run manifest");
    info!(
        processed = manifest.processed_count,
        failed = manifest.failed_count,
        segments = manifest.segment_count,
        "segmentation completed"
    );

    Ok(())
}

fn segment_file(
    path: &Path,
    profile: &GrammarProfile,
    timeout: Duration,
) -> Result<ProcessedSession> {
    let filename = file_name_string(path)?;
    let meta = profile.filename.extract(&filename)?;
    let sha256 = sha256_file(path)?;
    let document: Document = read_json(path)?;

    let tagged = tag_document(&document, profile);
    let outcome = segment_document(profile, meta, &tagged.lines, Some(timeout))
        .with_context(|| format!("failed to segment {filename}"))?;

    for warning in &outcome.warnings {
        warn!(
            jurisdiction = profile.jurisdiction.code(),
            file = %filename,
            kind = ?warning.kind,
            message = %warning.message,
            "segmentation warning"
        );
    }

    let report = SessionReport {
        filename: filename.clone(),
        legislative_period: meta.legislative_period,
        session_number: meta.session_number,
        date: outcome.date.format("%Y-%m-%d").to_string(),
        segment_count: outcome.segments.len(),
        turn_count: outcome.turn_count(),
        interjection_count: outcome.interjection_count(),
        dropped_interjections: outcome.dropped_interjections,
        tagging: tagged.stats,
        warnings: outcome.warnings,
    };

    Ok(ProcessedSession {
        source: DocumentEntry {
            filename,
            legislative_period: meta.legislative_period,
            session_number: meta.session_number,
            sha256,
        },
        report,
        segments: outcome.segments,
    })
}

pub(super) fn render_segment_command(args: &SegmentArgs) -> String {
    let mut command = vec![
        "plenary".to_string(),
        "segment".to_string(),
        "--cache-root".to_string(),
        args.cache_root.display().to_string(),
        "--jurisdiction".to_string(),
        args.jurisdiction.dir_name().to_string(),
    ];

    if let Some(path) = &args.geometry_path {
        command.push("--geometry-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.output_path {
        command.push("--output-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.run_manifest_path {
        command.push("--run-manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(jobs) = args.jobs {
        command.push("--jobs".to_string());
        command.push(jobs.to_string());
    }
    command.push("--timeout-ms".to_string());
    command.push(args.timeout_ms.to_string());
    if let Some(floor) = args.min_interjections {
        command.push("--min-interjections".to_string());
        command.push(floor.to_string());
    }
    if let Some(floor) = args.min_turns {
        command.push("--min-turns".to_string());
        command.push(floor.to_string());
    }

    command.join(" ")
}
