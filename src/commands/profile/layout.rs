use std::path::PathBuf;

use crate::error::PipelineError;
use crate::grammar::LayoutMarkers;
use crate::model::{Document, GeometryThresholds};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProfile {
    pub geometry: GeometryThresholds,
    pub header_observations: usize,
    pub applause_observations: usize,
    pub discarded_left: Vec<f64>,
    pub discarded_right: Vec<f64>,
}

pub fn profile_layout<'a, I>(
    documents: I,
    markers: &LayoutMarkers,
) -> Result<LayoutProfile, PipelineError>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut header_tops = Vec::new();
    let mut applause_lefts = Vec::new();

    for document in documents {
        for (page_index, page) in document.pages.iter().enumerate() {
            for fragment in &page.fragments {
                let Some(bbox) = fragment.bbox else {
                    continue;
                };
                let text = fragment.text.trim();

                // the first page carries the title block instead of a running header
                if page_index > 0 && markers.header_line.is_match(text) {
                    header_tops.push(bbox.top);
                }
                if text.contains(markers.applause_marker) {
                    applause_lefts.push(bbox.left);
                }
            }
        }
    }

    let header_bound = header_tops
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or_else(|| {
            PipelineError::Profiling(
                "no page header found outside the first page of any sampled document".to_string(),
            )
        })?;

    let Some(widest) = applause_lefts.iter().copied().reduce(f64::max) else {
        return Err(PipelineError::Profiling(format!(
            "no fragment contains {:?} in any sampled document",
            markers.applause_marker
        )));
    };

    let (right, left): (Vec<f64>, Vec<f64>) = applause_lefts
        .iter()
        .copied()
        .partition(|left| *left > widest / 2.0);

    let (indent_left, discarded_left) = settle_margin(left, "left")?;
    let (indent_right, discarded_right) = settle_margin(right, "right")?;

    Ok(LayoutProfile {
        geometry: GeometryThresholds {
            header_bound,
            indent_left,
            indent_right,
        },
        header_observations: header_tops.len(),
        applause_observations: applause_lefts.len(),
        discarded_left,
        discarded_right,
    })
}

fn settle_margin(
    mut offsets: Vec<f64>,
    column: &str,
) -> Result<(f64, Vec<f64>), PipelineError> {
    offsets.sort_by(f64::total_cmp);

    let mut discarded = Vec::new();
    let mut start = 0;
    while start < offsets.len() {
        let minimum = offsets[start];
        let count = offsets[start..]
            .iter()
            .take_while(|offset| **offset == minimum)
            .count();

        if count >= 2 {
            return Ok((minimum, discarded));
        }
        discarded.push(minimum);
        start += count;
    }

    Err(PipelineError::Profiling(format!(
        "no recurring applause offset in the {column} column ({} discarded)",
        discarded.len()
    )))
}

pub fn select_sample(files: &[PathBuf], sample_size: usize) -> Vec<PathBuf> {
    if sample_size == 0 || sample_size >= files.len() {
        return files.to_vec();
    }

    (0..sample_size)
        .map(|index| files[index * files.len() / sample_size].clone())
        .collect()
}
