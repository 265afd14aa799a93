use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::cli::Jurisdiction;
use crate::error::PipelineError;
use crate::model::{GeometryThresholds, Role};

mod dates;
mod hh;
pub mod markup;
mod nrw;
mod sn;


use markup::{collapse_whitespace, expand_placeholders, strip_markup};

const HEADER_LINE: &str =
    r"^(?:Plenarprotokoll\s+[0-9]{2}/[0-9]{1,3}|\d{1,3}\.\s+Wahlperiode\s+\W\s+\d{1,3})";
const APPLAUSE_MARKER: &str = "(Beifall";
const NON_INTERJECTION: &str =
    r"^\(?(?:Beginn der Sitzung|Beginn|Schluss|Ende):\s+\d{1,2}[.:]\d\d\s+Uhr";
const SPEAKER_ANNOTATIONS: [&str; 2] = ["(fortfahrend)", "(unterbrechend)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Assign(Role),
    Resume,
}

#[derive(Debug, Clone, Copy)]
struct RolePattern {
    kind: RuleKind,
    pattern: &'static str,
    name_group: usize,
    party_group: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerMode {
    SingleSpan,
    CarryOver,
    Bracketed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanityFloors {
    pub min_interjections: usize,
    pub min_turns: usize,
}

impl Default for SanityFloors {
    fn default() -> Self {
        Self {
            min_interjections: 50,
            min_turns: 20,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GrammarTables {
    session_begin: &'static str,
    session_end: &'static str,
    interjection_start: &'static str,
    interjection_rejects_emphasis: bool,
    date_capture: &'static str,
    date_formats: &'static [&'static str],
    filename: &'static str,
    role_rules: &'static [RolePattern],
    party_aliases: &'static [(&'static str, &'static str)],
    speaker_repairs: &'static [(&'static str, &'static str)],
    banner_mode: BannerMode,
    skip_page_numbers: bool,
}

fn tables_for(jurisdiction: Jurisdiction) -> GrammarTables {
    match jurisdiction {
        Jurisdiction::Nrw => nrw::TABLES,
        Jurisdiction::Sn => sn::TABLES,
        Jurisdiction::Hh => hh::TABLES,
    }
}

fn compile(pattern: &str, label: &str) -> Result<Regex> {
    Regex::new(&expand_placeholders(pattern))
        .with_context(|| format!("failed to compile {label} regex"))
}

#[derive(Debug)]
pub struct LayoutMarkers {
    pub header_line: Regex,
    pub applause_marker: &'static str,
}

impl LayoutMarkers {
    pub fn for_jurisdiction(_jurisdiction: Jurisdiction) -> Result<Self> {
        Ok(Self {
            header_line: compile(HEADER_LINE, "page header")?,
            applause_marker: APPLAUSE_MARKER,
        })
    }
}

#[derive(Debug)]
pub struct RoleRule {
    pub kind: RuleKind,
    pattern: Regex,
    name_group: usize,
    party_group: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMatch {
    pub kind: RuleKind,
    pub name: String,
    pub party: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PartyAliases {
    aliases: Vec<(String, String)>,
}

impl PartyAliases {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            aliases: pairs
                .iter()
                .map(|(alias, canonical)| (collapse_whitespace(alias), canonical.to_string()))
                .collect(),
        }
    }

    pub fn normalize(&self, label: &str) -> String {
        let label = collapse_whitespace(&strip_markup(label));
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == label)
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or(label)
    }
}

#[derive(Debug)]
pub struct DateFormats {
    capture: Regex,
    formats: &'static [&'static str],
}

impl DateFormats {
    pub fn parse_line(&self, line: &str) -> Option<NaiveDate> {
        self.capture
            .captures_iter(line)
            .filter_map(|captures| captures.get(1))
            .find_map(|captured| dates::parse_with_formats(captured.as_str(), self.formats))
    }

    pub fn describe(&self) -> String {
        self.formats.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionMeta {
    pub jurisdiction: Jurisdiction,
    pub legislative_period: u32,
    pub session_number: u32,
}

#[derive(Debug)]
pub struct FilenamePattern {
    jurisdiction: Jurisdiction,
    pattern: Regex,
}

impl FilenamePattern {
    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> Result<Self> {
        Ok(Self {
            jurisdiction,
            pattern: compile(tables_for(jurisdiction).filename, "session filename")?,
        })
    }

    pub fn extract(&self, filename: &str) -> Result<SessionMeta, PipelineError> {
        let failure = |reason: &str| PipelineError::MetadataExtraction {
            filename: filename.to_string(),
            reason: reason.to_string(),
        };

        let captures = self
            .pattern
            .captures(filename)
            .ok_or_else(|| failure("name does not carry period and session tokens"))?;

        let legislative_period = captures
            .get(1)
            .and_then(|value| value.as_str().parse::<u32>().ok())
            .ok_or_else(|| failure("invalid legislative period token"))?;
        let session_number = captures
            .get(2)
            .and_then(|value| value.as_str().parse::<u32>().ok())
            .ok_or_else(|| failure("invalid session number token"))?;

        Ok(SessionMeta {
            jurisdiction: self.jurisdiction,
            legislative_period,
            session_number,
        })
    }
}

#[derive(Debug)]
pub struct GrammarProfile {
    pub jurisdiction: Jurisdiction,
    pub geometry: GeometryThresholds,
    pub non_interjection: Regex,
    pub session_begin: Regex,
    pub session_end: Regex,
    pub interjection_start: Regex,
    pub interjection_rejects_emphasis: bool,
    pub dates: DateFormats,
    pub filename: FilenamePattern,
    pub role_rules: Vec<RoleRule>,
    pub parties: PartyAliases,
    pub speaker_repairs: &'static [(&'static str, &'static str)],
    pub banner_mode: BannerMode,
    pub skip_page_numbers: bool,
    pub sanity: SanityFloors,
}

impl GrammarProfile {
    pub fn for_jurisdiction(
        jurisdiction: Jurisdiction,
        geometry: GeometryThresholds,
    ) -> Result<Self> {
        let tables = tables_for(jurisdiction);

        let role_rules = tables
            .role_rules
            .iter()
            .map(|entry| {
                Ok(RoleRule {
                    kind: entry.kind,
                    pattern: compile(entry.pattern, "role detection")?,
                    name_group: entry.name_group,
                    party_group: entry.party_group,
                })
            })
            .collect::<Result<Vec<RoleRule>>>()?;

        Ok(Self {
            jurisdiction,
            geometry,
            non_interjection: compile(NON_INTERJECTION, "non-interjection exception")?,
            session_begin: compile(tables.session_begin, "session begin")?,
            session_end: compile(tables.session_end, "session end")?,
            interjection_start: compile(tables.interjection_start, "interjection start")?,
            interjection_rejects_emphasis: tables.interjection_rejects_emphasis,
            dates: DateFormats {
                capture: compile(tables.date_capture, "date capture")?,
                formats: tables.date_formats,
            },
            filename: FilenamePattern::for_jurisdiction(jurisdiction)?,
            role_rules,
            parties: PartyAliases::new(tables.party_aliases),
            speaker_repairs: tables.speaker_repairs,
            banner_mode: tables.banner_mode,
            skip_page_numbers: tables.skip_page_numbers,
            sanity: SanityFloors::default(),
        })
    }

    pub fn with_sanity(mut self, sanity: SanityFloors) -> Self {
        self.sanity = sanity;
        self
    }

    pub fn detect_role(&self, line: &str) -> Option<RoleMatch> {
        self.role_rules.iter().find_map(|rule| {
            let captures = rule.pattern.captures(line)?;
            let raw_name = captures.get(rule.name_group)?.as_str();
            let name = self.clean_speaker_name(raw_name);
            if name.is_empty() {
                return None;
            }

            let party = rule
                .party_group
                .and_then(|group| captures.get(group))
                .map(|value| self.parties.normalize(value.as_str()))
                .filter(|value| !value.is_empty());

            Some(RoleMatch {
                kind: rule.kind,
                name,
                party,
            })
        })
    }

    pub fn clean_speaker_name(&self, raw: &str) -> String {
        let mut name = strip_markup(raw);
        if let Some((head, _)) = name.split_once(':') {
            name = head.to_string();
        }
        for annotation in SPEAKER_ANNOTATIONS {
            name = name.replace(annotation, "");
        }
        name = name.replace('*', "");
        for (broken, repaired) in self.speaker_repairs {
            if name.contains(broken) {
                name = name.replace(broken, repaired);
            }
        }

        collapse_whitespace(&name)
            .trim_end_matches(['(', ')', ',', ' '])
            .to_string()
    }
}
