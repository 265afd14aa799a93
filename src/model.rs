use serde::{Deserialize, Serialize};

use crate::cli::Jurisdiction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionedFragment {
    pub bbox: Option<BoundingBox>,
    pub text: String,
    #[serde(default)]
    pub emphasis: Vec<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub fragments: Vec<PositionedFragment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryThresholds {
    pub header_bound: f64,
    pub indent_left: f64,
    pub indent_right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Chair,
    Executive,
    Servant,
    MemberOfParliament,
    Commissioner,
    ConstitutionalCourtPresident,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Chair => "chair",
            Role::Executive => "executive",
            Role::Servant => "servant",
            Role::MemberOfParliament => "member_of_parliament",
            Role::Commissioner => "commissioner",
            Role::ConstitutionalCourtPresident => "constitutional_court_president",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    pub speaker: String,
    pub party: Option<String>,
    pub role: Role,
    pub text: String,
    pub seq: u32,
    pub sub: u32,
    pub is_interjection: bool,
    pub jurisdiction: Jurisdiction,
    pub legislative_period: u32,
    pub session_number: u32,
    pub date: String,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub filename: String,
    pub legislative_period: u32,
    pub session_number: u32,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedDocument {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub jurisdiction: Jurisdiction,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<DocumentEntry>,
    #[serde(default)]
    pub rejected: Vec<RejectedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub jurisdiction: Jurisdiction,
    pub sample_files: Vec<String>,
    pub header_observations: usize,
    pub applause_observations: usize,
    pub discarded_left_margins: Vec<f64>,
    pub discarded_right_margins: Vec<f64>,
    pub geometry: GeometryThresholds,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggingStats {
    pub fragments_seen: usize,
    pub header_fragments_dropped: usize,
    pub fragments_skipped: usize,
    pub interjection_spans: usize,
    pub indentation_spans: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    MissingBeginMarker,
    MissingEndMarker,
    BelowSanityFloor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationWarning {
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub filename: String,
    pub legislative_period: u32,
    pub session_number: u32,
    pub date: String,
    pub segment_count: usize,
    pub turn_count: usize,
    pub interjection_count: usize,
    pub dropped_interjections: usize,
    pub tagging: TaggingStats,
    pub warnings: Vec<SegmentationWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub filename: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRunPaths {
    pub cache_root: String,
    pub document_dir: String,
    pub geometry_path: String,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub jurisdiction: Jurisdiction,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: SegmentRunPaths,
    pub geometry: GeometryThresholds,
    pub document_count: usize,
    pub processed_count: usize,
    pub failed_count: usize,
    pub segment_count: usize,
    pub sessions: Vec<SessionReport>,
    pub failures: Vec<FileFailure>,
    pub source_hashes: Vec<DocumentEntry>,
}
