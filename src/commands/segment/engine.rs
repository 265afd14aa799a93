use std::collections::{BTreeSet, HashMap};
use std::mem;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::commands::tag::TaggedLine;
use crate::error::PipelineError;
use crate::grammar::markup::{
    EMPHASIS_BEGIN, EMPHASIS_END, INTERJECTION_END, clean_text, join_repairing_hyphens,
    strip_emphasis, strip_indentation, strip_markup,
};
use crate::grammar::{BannerMode, GrammarProfile, RoleMatch, RuleKind, SessionMeta};
use crate::model::{Role, SegmentationWarning, SpeechSegment, WarningKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub name: String,
    pub role: Role,
    pub party: Option<String>,
}

#[derive(Debug)]
enum State {
    AwaitingDate,
    AwaitingSessionStart,
    InSession,
    InSpeech(Speaker),
    InInterjection {
        interrupted: Option<Speaker>,
        lines: Vec<String>,
    },
    Ended,
}

#[derive(Debug, Default)]
enum Banner {
    #[default]
    Idle,
    Open(Vec<String>),
    Carrying,
}

#[derive(Debug)]
pub struct SegmentationOutcome {
    pub date: NaiveDate,
    pub segments: Vec<SpeechSegment>,
    pub warnings: Vec<SegmentationWarning>,
    pub dropped_interjections: usize,
}

impl SegmentationOutcome {
    pub fn turn_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| segment.seq)
            .collect::<BTreeSet<u32>>()
            .len()
    }

    pub fn interjection_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| segment.is_interjection)
            .count()
    }
}

pub struct Segmenter<'p> {
    profile: &'p GrammarProfile,
    meta: SessionMeta,
    deadline: Option<(Instant, Duration)>,
    lines_seen: usize,
    state: State,
    date: Option<NaiveDate>,
    date_label: String,
    buffer: Vec<String>,
    banner: Banner,
    issue: Option<String>,
    registry: HashMap<String, Speaker>,
    interrupted: Option<Speaker>,
    seq: u32,
    sub: u32,
    segments: Vec<SpeechSegment>,
    dropped_interjections: usize,
}

impl<'p> Segmenter<'p> {
    pub fn new(profile: &'p GrammarProfile, meta: SessionMeta) -> Self {
        Self {
            profile,
            meta,
            deadline: None,
            lines_seen: 0,
            state: State::AwaitingDate,
            date: None,
            date_label: String::new(),
            buffer: Vec::new(),
            banner: Banner::Idle,
            issue: None,
            registry: HashMap::new(),
            interrupted: None,
            seq: 0,
            sub: 0,
            segments: Vec::new(),
            dropped_interjections: 0,
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.deadline = Some((Instant::now(), limit));
        self
    }

    pub fn feed(&mut self, raw: &str) -> Result<(), PipelineError> {
        self.lines_seen += 1;
        self.check_deadline()?;

        let line = raw.trim_start();
        match self.state {
            State::Ended => {}
            State::AwaitingDate => self.await_date(line),
            State::AwaitingSessionStart => {
                if self.profile.session_begin.is_match(&strip_indentation(line)) {
                    debug!(line = self.lines_seen, "session start marker found");
                    self.state = State::InSession;
                }
            }
            _ => self.feed_session_line(line),
        }

        Ok(())
    }

    pub fn finish(mut self) -> Result<SegmentationOutcome, PipelineError> {
        let Some(date) = self.date else {
            return Err(PipelineError::DateParse {
                formats: self.profile.dates.describe(),
            });
        };

        let mut warnings = Vec::new();
        match self.state {
            State::Ended => {}
            State::AwaitingDate | State::AwaitingSessionStart => {
                warnings.push(SegmentationWarning {
                    kind: WarningKind::MissingBeginMarker,
                    message: "input ended before the session start marker".to_string(),
                });
            }
            State::InSession | State::InSpeech(_) | State::InInterjection { .. } => {
                self.close_interjection();
                self.close_turn();
                warnings.push(SegmentationWarning {
                    kind: WarningKind::MissingEndMarker,
                    message: "input ended before the session end marker".to_string(),
                });
            }
        }

        let mut outcome = SegmentationOutcome {
            date,
            segments: self.segments,
            warnings,
            dropped_interjections: self.dropped_interjections,
        };

        let floors = self.profile.sanity;
        let turns = outcome.turn_count();
        let interjections = outcome.interjection_count();
        if interjections < floors.min_interjections || turns < floors.min_turns {
            outcome.warnings.push(SegmentationWarning {
                kind: WarningKind::BelowSanityFloor,
                message: format!(
                    "{turns} turns and {interjections} interjections, expected at least {} and {}",
                    floors.min_turns, floors.min_interjections
                ),
            });
        }

        Ok(outcome)
    }

    fn check_deadline(&self) -> Result<(), PipelineError> {
        match self.deadline {
            Some((started, limit)) if started.elapsed() >= limit => {
                Err(PipelineError::SegmentationTimeout {
                    limit,
                    lines: self.lines_seen,
                })
            }
            _ => Ok(()),
        }
    }

    fn await_date(&mut self, line: &str) {
        if let Some(date) = self.profile.dates.parse_line(line) {
            debug!(%date, line = self.lines_seen, "session date found");
            self.date = Some(date);
            self.date_label = date.format("%Y-%m-%d").to_string();
            self.state = State::AwaitingSessionStart;
        }
    }

    fn feed_session_line(&mut self, line: &str) {
        if self.profile.skip_page_numbers && is_page_number(line) {
            return;
        }

        if self
            .profile
            .session_end
            .is_match(&strip_emphasis(&strip_indentation(line)))
        {
            self.close_interjection();
            self.close_turn();
            self.state = State::Ended;
            debug!(
                line = self.lines_seen,
                segments = self.segments.len(),
                "session end marker found"
            );
            return;
        }

        if matches!(self.state, State::InInterjection { .. }) {
            self.push_interjection_line(line);
            return;
        }

        let reopened = self.speaker_inside_banner(line);
        if reopened.is_some() {
            self.banner = Banner::Idle;
        }
        let line = reopened.as_deref().unwrap_or(line);

        if self.continue_banner(line) {
            return;
        }

        if line.starts_with(EMPHASIS_BEGIN) {
            if let Some(detected) = self.profile.detect_role(line) {
                self.switch_speaker(detected, line);
                return;
            }
            if self.open_banner(line) {
                return;
            }
        }

        if self.starts_interjection(line) {
            let interrupted = self.suspend_speech();
            self.state = State::InInterjection {
                interrupted,
                lines: Vec::new(),
            };
            self.push_interjection_line(line);
            return;
        }

        if matches!(self.state, State::InSpeech(_)) {
            self.buffer.push(line.to_string());
        } else if !line.is_empty() {
            trace!(line, "text outside any speech");
        }
    }

    fn starts_interjection(&self, line: &str) -> bool {
        self.profile.interjection_start.is_match(line)
            && !(self.profile.interjection_rejects_emphasis && line.contains(EMPHASIS_BEGIN))
    }

    fn push_interjection_line(&mut self, line: &str) {
        let State::InInterjection { lines, .. } = &mut self.state else {
            return;
        };
        lines.push(line.to_string());
        if line.contains(INTERJECTION_END) {
            self.close_interjection();
        }
    }

    fn close_interjection(&mut self) {
        if !matches!(self.state, State::InInterjection { .. }) {
            return;
        }
        let State::InInterjection { interrupted, lines } =
            mem::replace(&mut self.state, State::InSession)
        else {
            return;
        };

        let text = interjection_text(&lines);
        match interrupted {
            Some(speaker) => {
                if !text.is_empty() {
                    self.emit(&speaker, text, true);
                }
                self.state = State::InSpeech(speaker);
            }
            None => {
                self.dropped_interjections += 1;
                debug!(%text, "dropped interjection outside any speech");
            }
        }
    }

    fn suspend_speech(&mut self) -> Option<Speaker> {
        match mem::replace(&mut self.state, State::InSession) {
            State::InSpeech(speaker) => {
                self.flush_speech(&speaker);
                Some(speaker)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    fn switch_speaker(&mut self, detected: RoleMatch, line: &str) {
        let speaker = self.resolve_speaker(detected);
        self.banner = Banner::Idle;

        let same_speaker =
            matches!(&self.state, State::InSpeech(current) if current.name == speaker.name);
        if !same_speaker {
            self.close_turn();
            debug!(
                speaker = %speaker.name,
                role = speaker.role.as_str(),
                seq = self.seq,
                "speaker change"
            );
            self.state = State::InSpeech(speaker.clone());
        }
        self.registry.insert(speaker.name.clone(), speaker);

        let lead = speaker_lead(line);
        if !lead.is_empty() {
            self.buffer.push(lead);
        }
    }

    fn resolve_speaker(&self, detected: RoleMatch) -> Speaker {
        let RoleMatch { kind, name, party } = detected;

        match kind {
            RuleKind::Assign(role) => {
                let party = party.or_else(|| {
                    if role == Role::MemberOfParliament {
                        self.registry.get(&name).and_then(|known| known.party.clone())
                    } else {
                        None
                    }
                });
                Speaker { name, role, party }
            }
            RuleKind::Resume => self
                .registry
                .get(&name)
                .cloned()
                .or_else(|| self.interrupted.clone())
                .unwrap_or(Speaker {
                    name,
                    role: Role::MemberOfParliament,
                    party: None,
                }),
        }
    }

    fn close_turn(&mut self) {
        if let State::InSpeech(speaker) = mem::replace(&mut self.state, State::InSession) {
            self.flush_speech(&speaker);
            self.interrupted = Some(speaker);
        }
        self.buffer.clear();

        // turns that emitted nothing keep their seq
        if self.sub > 0 {
            self.seq += 1;
        }
        self.sub = 0;
    }

    fn flush_speech(&mut self, speaker: &Speaker) {
        let text = clean_text(&self.buffer.join(" "));
        self.buffer.clear();
        if !text.is_empty() {
            self.emit(speaker, text, false);
        }
    }

    fn emit(&mut self, speaker: &Speaker, text: String, is_interjection: bool) {
        self.segments.push(SpeechSegment {
            speaker: speaker.name.clone(),
            party: speaker.party.clone(),
            role: speaker.role,
            text,
            seq: self.seq,
            sub: self.sub,
            is_interjection,
            jurisdiction: self.meta.jurisdiction,
            legislative_period: self.meta.legislative_period,
            session_number: self.meta.session_number,
            date: self.date_label.clone(),
            issue: self.issue.clone(),
        });
        self.sub += 1;
    }

    fn speaker_inside_banner(&self, line: &str) -> Option<String> {
        if !matches!(self.banner, Banner::Open(_))
            || self.profile.banner_mode == BannerMode::Bracketed
            || line.contains(EMPHASIS_BEGIN)
        {
            return None;
        }

        let probe = format!("{EMPHASIS_BEGIN}{line}");
        self.profile.detect_role(&probe).map(|_| probe)
    }

    fn continue_banner(&mut self, line: &str) -> bool {
        match &mut self.banner {
            Banner::Idle => false,
            Banner::Carrying => {
                if !line.is_empty() && !line.contains(EMPHASIS_END) {
                    self.banner = Banner::Idle;
                }
                false
            }
            Banner::Open(_) if line.is_empty() => {
                // headings never span fragments
                self.banner = Banner::Idle;
                true
            }
            Banner::Open(parts) => {
                let (closed, tail) = match line.split_once(EMPHASIS_END) {
                    Some((head, tail)) => {
                        parts.push(head.to_string());
                        (true, clean_text(tail))
                    }
                    None => {
                        parts.push(line.to_string());
                        (false, String::new())
                    }
                };
                self.issue = Some(join_repairing_hyphens(parts.iter().map(String::as_str)));
                if closed {
                    self.banner = Banner::Idle;
                    if !tail.is_empty() && matches!(self.state, State::InSpeech(_)) {
                        self.buffer.push(tail);
                    }
                }
                true
            }
        }
    }

    fn open_banner(&mut self, line: &str) -> bool {
        let mode = self.profile.banner_mode;
        if mode == BannerMode::Bracketed && !strip_emphasis(line).trim_start().starts_with('[') {
            return false;
        }

        let blank_heading = line
            .split_once(EMPHASIS_END)
            .is_some_and(|(head, _)| clean_text(head).is_empty());
        if blank_heading {
            return false;
        }

        // bold words leading a line of running speech
        let inline = line
            .split_once(EMPHASIS_END)
            .is_some_and(|(_, tail)| !clean_text(tail).is_empty());
        if inline && matches!(self.state, State::InSpeech(_)) {
            self.banner = Banner::Idle;
            return false;
        }

        // a heading ends whatever was said before it
        if let State::InSpeech(speaker) = &self.state {
            let speaker = speaker.clone();
            self.flush_speech(&speaker);
        }

        match line.split_once(EMPHASIS_END) {
            Some((head, _)) => {
                let heading = clean_text(head);

                let carried = match (&self.banner, self.issue.take()) {
                    (Banner::Carrying, Some(previous)) => format!("{previous} {heading}"),
                    _ => heading,
                };
                self.issue = Some(carried);
                self.banner = if mode == BannerMode::CarryOver {
                    Banner::Carrying
                } else {
                    Banner::Idle
                };
            }
            None => {
                self.issue = Some(clean_text(line));
                self.banner = Banner::Open(vec![line.to_string()]);
            }
        }

        debug!(issue = self.issue.as_deref().unwrap_or_default(), "agenda heading");
        true
    }
}

pub fn segment_document(
    profile: &GrammarProfile,
    meta: SessionMeta,
    lines: &[TaggedLine],
    timeout: Option<Duration>,
) -> Result<SegmentationOutcome, PipelineError> {
    let mut segmenter = Segmenter::new(profile, meta);
    if let Some(limit) = timeout {
        segmenter = segmenter.with_timeout(limit);
    }

    for tagged in lines {
        for line in tagged.text.lines() {
            segmenter.feed(line)?;
        }
        segmenter.feed("")?;
    }

    segmenter.finish()
}

fn is_page_number(line: &str) -> bool {
    let plain = strip_markup(line);
    let plain = plain.trim();
    !plain.is_empty() && plain.chars().all(|ch| ch.is_ascii_digit())
}

fn speaker_lead(line: &str) -> String {
    let rest = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line
            .split_once(EMPHASIS_END)
            .map_or("", |(_, rest)| rest),
    };

    clean_text(rest).trim_start_matches('*').trim_start().to_string()
}

fn interjection_text(lines: &[String]) -> String {
    let joined = join_repairing_hyphens(lines.iter().map(String::as_str));
    let inner = joined.strip_prefix('(').unwrap_or(&joined);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    inner.trim().to_string()
}
