use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::grammar::GrammarProfile;
use crate::grammar::markup::{
    EMPHASIS_BEGIN, EMPHASIS_END, INDENTATION_BEGIN, INDENTATION_END, INTERJECTION_BEGIN,
    INTERJECTION_END,
};
use crate::model::{BoundingBox, Document, GeometryThresholds, PositionedFragment, TaggingStats};

pub const COLUMN_OFFSET: f64 = 2000.0;
const COLUMN_GAP: f64 = 50.0;
const EDGE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedLine {
    pub page: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct TaggedDocument {
    pub lines: Vec<TaggedLine>,
    pub stats: TaggingStats,
}

impl TaggedDocument {
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<&str>>()
            .join("\n\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Body,
    Interjection,
    Indentation,
}

#[derive(Debug)]
struct TaggedFragment {
    text: String,
    span: Span,
    sort_key: f64,
}

pub fn tag_document(document: &Document, profile: &GrammarProfile) -> TaggedDocument {
    let mut tagged = TaggedDocument::default();

    for (page_index, page) in document.pages.iter().enumerate() {
        let mut placed = Vec::with_capacity(page.fragments.len());

        for (fragment_index, fragment) in page.fragments.iter().enumerate() {
            tagged.stats.fragments_seen += 1;

            match tag_fragment(fragment, page_index, fragment_index, profile) {
                Ok(Some(fragment)) => {
                    match fragment.span {
                        Span::Interjection => tagged.stats.interjection_spans += 1,
                        Span::Indentation => tagged.stats.indentation_spans += 1,
                        Span::Body => {}
                    }
                    placed.push(fragment);
                }
                Ok(None) => {
                    tagged.stats.header_fragments_dropped += 1;
                    debug!(
                        page = page_index,
                        fragment = fragment_index,
                        "dropped header fragment"
                    );
                }
                Err(err) => {
                    tagged.stats.fragments_skipped += 1;
                    warn!(error = %err, "skipping fragment");
                }
            }
        }

        // stable: fragments with equal keys keep their extraction order
        placed.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));

        tagged.lines.extend(
            placed
                .into_iter()
                .filter(|fragment| !fragment.text.is_empty())
                .map(|fragment| TaggedLine {
                    page: page_index,
                    text: fragment.text,
                }),
        );
    }

    tagged
}

fn tag_fragment(
    fragment: &PositionedFragment,
    page_index: usize,
    fragment_index: usize,
    profile: &GrammarProfile,
) -> Result<Option<TaggedFragment>, PipelineError> {
    let failure = |reason: &str| PipelineError::Tagging {
        page: page_index,
        fragment: fragment_index,
        reason: reason.to_string(),
    };

    let bbox = fragment.bbox.ok_or_else(|| failure("missing bounding box"))?;
    if ![bbox.left, bbox.top, bbox.right, bbox.bottom]
        .iter()
        .all(|value| value.is_finite())
    {
        return Err(failure("non-finite bounding box"));
    }

    let geometry = &profile.geometry;
    if page_index > 0 && bbox.top > geometry.header_bound - EDGE_TOLERANCE {
        return Ok(None);
    }

    let text = normalize_spacing(&mark_emphasis(&fragment.text, &fragment.emphasis));

    let span = if text.is_empty() {
        Span::Body
    } else if in_marginal_band(&bbox, geometry) {
        let plain = fragment.text.trim();
        if plain.starts_with('(') && !profile.non_interjection.is_match(plain) {
            Span::Interjection
        } else {
            Span::Indentation
        }
    } else {
        Span::Body
    };

    let text = match span {
        Span::Body => text,
        Span::Interjection => format!("{INTERJECTION_BEGIN}{text}{INTERJECTION_END}"),
        Span::Indentation => format!("{INDENTATION_BEGIN}{text}{INDENTATION_END}"),
    };

    Ok(Some(TaggedFragment {
        text,
        span,
        sort_key: sort_key(&bbox, geometry),
    }))
}

fn in_marginal_band(bbox: &BoundingBox, geometry: &GeometryThresholds) -> bool {
    let left_margin = geometry.indent_left - EDGE_TOLERANCE;
    let right_margin = geometry.indent_right - EDGE_TOLERANCE;

    (bbox.left > left_margin && bbox.left < right_margin - COLUMN_GAP) || bbox.left > right_margin
}

fn sort_key(bbox: &BoundingBox, geometry: &GeometryThresholds) -> f64 {
    let second_column = bbox.left >= geometry.indent_right - EDGE_TOLERANCE - COLUMN_GAP;
    let offset = if second_column { COLUMN_OFFSET } else { 0.0 };
    offset - bbox.top
}

fn mark_emphasis(text: &str, emphasis: &[bool]) -> String {
    let mut marked = String::with_capacity(text.len() + 2 * EMPHASIS_BEGIN.len());
    let mut open = false;

    for (index, ch) in text.chars().enumerate() {
        if !ch.is_whitespace() {
            let emphasized = emphasis.get(index).copied().unwrap_or(false);
            if emphasized && !open {
                marked.push_str(EMPHASIS_BEGIN);
                open = true;
            } else if !emphasized && open {
                close_emphasis(&mut marked);
                open = false;
            }
        }
        marked.push(ch);
    }

    if open {
        close_emphasis(&mut marked);
    }
    marked
}

fn close_emphasis(marked: &mut String) {
    // close before trailing whitespace so the marker never starts the next line
    let content_end = marked.trim_end().len();
    marked.insert_str(content_end, EMPHASIS_END);
}

fn normalize_spacing(text: &str) -> String {
    text.replace('\t', " ")
        .lines()
        .map(|line| {
            line.split(' ')
                .filter(|part| !part.is_empty())
                .collect::<Vec<&str>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
        .trim()
        .to_string()
}
