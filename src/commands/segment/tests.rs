use std::path::PathBuf;
use std::time::Duration;

use super::engine::*;
use super::run::render_segment_command;
use crate::cli::{Jurisdiction, SegmentArgs};
use crate::commands::tag::{TaggedLine, tag_document};
use crate::error::PipelineError;
use crate::grammar::{GrammarProfile, SanityFloors, SessionMeta};
use crate::model::{
    BoundingBox, Document, GeometryThresholds, Page, PositionedFragment, Role, SpeechSegment,
    WarningKind,
};

const GEOMETRY: GeometryThresholds = GeometryThresholds {
    header_bound: 780.0,
    indent_left: 85.0,
    indent_right: 340.0,
};

const NO_FLOORS: SanityFloors = SanityFloors {
    min_interjections: 0,
    min_turns: 0,
};

fn profile(jurisdiction: Jurisdiction) -> GrammarProfile {
    GrammarProfile::for_jurisdiction(jurisdiction, GEOMETRY)
        .expect("grammar compiles")
        .with_sanity(NO_FLOORS)
}

fn meta(jurisdiction: Jurisdiction) -> SessionMeta {
    SessionMeta {
        jurisdiction,
        legislative_period: 17,
        session_number: 85,
    }
}

fn segment(profile: &GrammarProfile, lines: &[&str]) -> Result<SegmentationOutcome, PipelineError> {
    let mut segmenter = Segmenter::new(profile, meta(profile.jurisdiction));
    for line in lines {
        segmenter.feed(line)?;
    }
    segmenter.finish()
}

fn summary(segments: &[SpeechSegment]) -> Vec<(&str, &str, u32, u32, bool)> {
    segments
        .iter()
        .map(|segment| {
            (
                segment.speaker.as_str(),
                segment.text.as_str(),
                segment.seq,
                segment.sub,
                segment.is_interjection,
            )
        })
        .collect()
}

fn assert_gapless(segments: &[SpeechSegment]) {
    if let Some(first) = segments.first() {
        assert_eq!((first.seq, first.sub), (0, 0));
    }
    for pair in segments.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        let same_turn = next.seq == previous.seq && next.sub == previous.sub + 1;
        let next_turn = next.seq == previous.seq + 1 && next.sub == 0;
        assert!(
            same_turn || next_turn,
            "gap between {:?} and {:?}",
            (previous.seq, previous.sub),
            (next.seq, next.sub)
        );
    }
}

const NRW_OPENING: [&str; 3] = [
    "Landtag Nordrhein-Westfalen",
    "Plenarprotokoll 17/85 11.03.2020",
    "<emphasis_begin>Beginn: 10:02 Uhr<emphasis_end>",
];

fn nrw_session(body: &[&str]) -> Vec<String> {
    NRW_OPENING
        .iter()
        .chain(body)
        .map(|line| line.to_string())
        .collect()
}

fn segment_nrw(body: &[&str]) -> SegmentationOutcome {
    let lines = nrw_session(body);
    let lines = lines.iter().map(String::as_str).collect::<Vec<&str>>();
    segment(&profile(Jurisdiction::Nrw), &lines).expect("segmentation")
}

#[test]
fn interjection_splits_a_speech_into_three_segments() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Text one",
        "<interjection_begin>(Beifall)<interjection_end>",
        "Text two",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("André Kuper", "Text one", 0, 0, false),
            ("André Kuper", "Beifall", 0, 1, true),
            ("André Kuper", "Text two", 0, 2, false),
        ]
    );
    let first = &outcome.segments[0];
    assert_eq!(first.role, Role::Chair);
    assert_eq!(first.party, None);
    assert_eq!(first.date, "2020-03-11");
    assert_eq!(first.jurisdiction, Jurisdiction::Nrw);
    assert_eq!(first.legislative_period, 17);
    assert_eq!(first.session_number, 85);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn speaker_change_starts_a_new_turn() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Das Wort hat",
        "Herr Hovenjürgen.",
        "<emphasis_begin>Josef Hovenjürgen<emphasis_end> (CDU): Herr Präsident!",
        "Meine Damen und Herren!",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("André Kuper", "Das Wort hat Herr Hovenjürgen.", 0, 0, false),
            (
                "Josef Hovenjürgen",
                "Herr Präsident! Meine Damen und Herren!",
                1,
                0,
                false
            ),
        ]
    );
    assert_eq!(outcome.segments[1].role, Role::MemberOfParliament);
    assert_eq!(outcome.segments[1].party.as_deref(), Some("CDU"));
    assert_eq!(outcome.turn_count(), 2);
}

#[test]
fn speaker_without_text_consumes_no_sequence_number() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end>",
        "<emphasis_begin>Josef Hovenjürgen<emphasis_end> (CDU): Danke.",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![("Josef Hovenjürgen", "Danke.", 0, 0, false)]
    );
}

#[test]
fn repeated_lead_of_the_same_speaker_continues_the_turn() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Erstens.",
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Zweitens.",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![("André Kuper", "Erstens. Zweitens.", 0, 0, false)]
    );
}

#[test]
fn text_before_the_session_start_is_ignored() {
    let outcome = segment(
        &profile(Jurisdiction::Nrw),
        &[
            "Plenarprotokoll 17/85 11.03.2020",
            "<emphasis_begin>Präsident André Kuper:<emphasis_end> Inhaltsverzeichnis",
            "<emphasis_begin>Beginn: 10:02 Uhr<emphasis_end>",
            "<emphasis_begin>Präsident André Kuper:<emphasis_end> Guten Morgen.",
            "Schluss: 17:16 Uhr",
            "<emphasis_begin>Präsident André Kuper:<emphasis_end> Anlage",
        ],
    )
    .expect("segmentation");

    assert_eq!(
        summary(&outcome.segments),
        vec![("André Kuper", "Guten Morgen.", 0, 0, false)]
    );
}

#[test]
fn end_marker_inside_indentation_closes_the_session() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Die Sitzung ist geschlossen.",
        "<indentation_begin>Schluss: 17:16 Uhr<indentation_end>",
        "Nachtrag",
    ]);

    assert_eq!(outcome.segments.len(), 1);
    assert_eq!(outcome.segments[0].text, "Die Sitzung ist geschlossen.");
    assert!(outcome.warnings.is_empty());
}

#[test]
fn missing_end_marker_flushes_and_warns() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Letzter Satz.",
        "<interjection_begin>(Beifall<interjection_end>",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("André Kuper", "Letzter Satz.", 0, 0, false),
            ("André Kuper", "Beifall", 0, 1, true),
        ]
    );
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::MissingEndMarker);
}

#[test]
fn missing_begin_marker_yields_no_segments() {
    let outcome = segment(
        &profile(Jurisdiction::Nrw),
        &[
            "Plenarprotokoll 17/85 11.03.2020",
            "<emphasis_begin>Präsident André Kuper:<emphasis_end> Guten Morgen.",
        ],
    )
    .expect("segmentation");

    assert!(outcome.segments.is_empty());
    assert_eq!(outcome.warnings[0].kind, WarningKind::MissingBeginMarker);
}

#[test]
fn missing_date_is_an_error() {
    let err = segment(
        &profile(Jurisdiction::Nrw),
        &[
            "Landtag Nordrhein-Westfalen",
            "<emphasis_begin>Beginn: 10:02 Uhr<emphasis_end>",
            "<emphasis_begin>Präsident André Kuper:<emphasis_end> Guten Morgen.",
        ],
    )
    .expect_err("no date");

    assert!(matches!(err, PipelineError::DateParse { .. }));
    assert!(err.to_string().contains("%d.%m.%Y"));
}

#[test]
fn exhausted_time_budget_fails_the_session() {
    let profile = profile(Jurisdiction::Nrw);
    let mut segmenter =
        Segmenter::new(&profile, meta(Jurisdiction::Nrw)).with_timeout(Duration::ZERO);

    let err = segmenter.feed("Plenarprotokoll 17/85 11.03.2020").expect_err("timeout");
    assert!(matches!(
        err,
        PipelineError::SegmentationTimeout { lines: 1, .. }
    ));
}

#[test]
fn sanity_floors_raise_a_warning_but_keep_segments() {
    let profile = GrammarProfile::for_jurisdiction(Jurisdiction::Nrw, GEOMETRY)
        .expect("grammar compiles")
        .with_sanity(SanityFloors {
            min_interjections: 2,
            min_turns: 1,
        });
    let lines = nrw_session(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Kurz.",
        "Schluss: 17:16 Uhr",
    ]);
    let lines = lines.iter().map(String::as_str).collect::<Vec<&str>>();

    let outcome = segment(&profile, &lines).expect("segmentation");
    assert_eq!(outcome.segments.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::BelowSanityFloor);
    assert!(outcome.warnings[0].message.contains("0 interjections"));
}

#[test]
fn interjections_without_a_speaker_are_dropped() {
    let outcome = segment_nrw(&[
        "<interjection_begin>(Beifall)<interjection_end>",
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Guten Morgen.",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(outcome.dropped_interjections, 1);
    assert_eq!(outcome.interjection_count(), 0);
    assert!(outcome.segments.iter().all(|segment| !segment.is_interjection));
}

#[test]
fn multi_line_interjection_repairs_broken_words() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Bitte.",
        "<interjection_begin>(Zuruf von der SPD: Das ist unver-",
        "schämt!)<interjection_end>",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        outcome.segments[1].text,
        "Zuruf von der SPD: Das ist unverschämt!"
    );
    assert!(outcome.segments[1].is_interjection);
}

#[test]
fn interjection_keeps_compounds_broken_after_an_abbreviation() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Bitte.",
        "<interjection_begin>(Beifall bei der CDU-",
        "geführten Regierung)<interjection_end>",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        outcome.segments[1].text,
        "Beifall bei der CDU-geführten Regierung"
    );
}

#[test]
fn bold_words_inside_a_speech_stay_in_the_text() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Josef Hovenjürgen (CDU):<emphasis_end> Herr Präsident!",
        "<emphasis_begin>Erstens<emphasis_end> wollen wir das Gesetz ändern.",
        "Und zweitens nicht.",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![(
            "Josef Hovenjürgen",
            "Herr Präsident! Erstens wollen wir das Gesetz ändern. Und zweitens nicht.",
            0,
            0,
            false
        )]
    );
    assert_eq!(outcome.segments[0].issue, None);
}

#[test]
fn text_after_a_closing_heading_line_is_speech() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Ich rufe auf:",
        "<emphasis_begin>4 Gesetz über die",
        "Landesbauordnung<emphasis_end> Drucksache 17/1234",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("André Kuper", "Ich rufe auf:", 0, 0, false),
            ("André Kuper", "Drucksache 17/1234", 0, 1, false),
        ]
    );
    assert_eq!(outcome.segments[0].issue, None);
    assert_eq!(
        outcome.segments[1].issue.as_deref(),
        Some("4 Gesetz über die Landesbauordnung")
    );
}

#[test]
fn carried_headings_merge_and_stamp_following_segments() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>1 Aktuelle Stunde<emphasis_end>",
        "<emphasis_begin>auf Antrag der Fraktion der SPD<emphasis_end>",
        "",
        "Drucksache 17/8767",
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Ich eröffne die Aussprache.",
        "<emphasis_begin>2 Gesetz zur Stärkung<emphasis_end>",
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Wir kommen zu Punkt 2.",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(outcome.segments.len(), 2);
    assert_eq!(
        outcome.segments[0].issue.as_deref(),
        Some("1 Aktuelle Stunde auf Antrag der Fraktion der SPD")
    );
    assert_eq!(outcome.segments[1].issue.as_deref(), Some("2 Gesetz zur Stärkung"));
}

#[test]
fn speaker_lead_sharing_a_heading_emphasis_is_detected() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>3 Haushaltsgesetz 2021",
        "Präsident André Kuper:<emphasis_end> Ich rufe auf.",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![("André Kuper", "Ich rufe auf.", 0, 0, false)]
    );
    assert_eq!(outcome.segments[0].issue.as_deref(), Some("3 Haushaltsgesetz 2021"));
}

#[test]
fn executive_leads_resolve_to_executive_role() {
    let outcome = segment_nrw(&[
        "<emphasis_begin>Armin Laschet<emphasis_end>, Ministerpräsident: Herr Präsident!",
        "Schluss: 17:16 Uhr",
    ]);

    assert_eq!(outcome.segments[0].speaker, "Armin Laschet");
    assert_eq!(outcome.segments[0].role, Role::Executive);
}

const SN_SESSION: [&str; 16] = [
    "5. Wahlperiode 2019",
    "Dresden, 12. März 2020",
    "<indentation_begin>(Beginn der Sitzung: 10:00 Uhr)<indentation_end>",
    "<emphasis_begin>Präsident Dr. Matthias Rößler:<emphasis_end> Meine Damen und Herren!",
    "<emphasis_begin>Tagesordnungspunkt 2<emphasis_end>",
    "<emphasis_begin>Zweite Beratung des Entwurfs",
    "Gesetz über die Ände-",
    "rung des Schulgesetzes<emphasis_end>",
    "<emphasis_begin>Sarah Buddeberg, DIE LINKE:<emphasis_end> Vielen Dank.",
    "12",
    "Wir lehnen ab.",
    "<interjection_begin>(Beifall bei den LINKEN)<interjection_end>",
    "<interjection_begin><emphasis_begin>(Zuruf)<emphasis_end><interjection_end>",
    "<emphasis_begin>Martin Dulig, Staatsminister für Wirtschaft:<emphasis_end> Danke.",
    "<interjection_begin>(Schluss der Sitzung: 18:42 Uhr)<interjection_end>",
    "<emphasis_begin>Präsident Dr. Matthias Rößler:<emphasis_end> Nachspann",
];

#[test]
fn saxon_session_parses_german_months_and_normalizes_parties() {
    // emphasized margin notes are not interjections in Saxony
    let outcome = segment(&profile(Jurisdiction::Sn), &SN_SESSION).expect("segmentation");

    assert_eq!(outcome.date.to_string(), "2020-03-12");
    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("Dr. Matthias Rößler", "Meine Damen und Herren!", 0, 0, false),
            ("Sarah Buddeberg", "Vielen Dank. Wir lehnen ab.", 1, 0, false),
            ("Sarah Buddeberg", "Beifall bei den LINKEN", 1, 1, true),
            ("Sarah Buddeberg", "(Zuruf)", 1, 2, false),
            ("Martin Dulig", "Danke.", 2, 0, false),
        ]
    );
    assert_eq!(outcome.segments[1].party.as_deref(), Some("DIE LINKE"));
    assert_eq!(outcome.segments[4].role, Role::Executive);
    assert_gapless(&outcome.segments);
}

#[test]
fn saxon_headings_span_lines_until_emphasis_closes() {
    let outcome = segment(&profile(Jurisdiction::Sn), &SN_SESSION).expect("segmentation");

    assert_eq!(outcome.segments[0].issue, None);
    assert_eq!(
        outcome.segments[1].issue.as_deref(),
        Some("Zweite Beratung des Entwurfs Gesetz über die Änderung des Schulgesetzes")
    );
}

const HH_OPENING: [&str; 3] = [
    "Plenarprotokoll 22/5",
    "Sitzung vom 12. Februar 2020",
    "Beginn: 15.00 Uhr",
];

fn segment_hh(body: &[&str]) -> SegmentationOutcome {
    let lines = HH_OPENING
        .iter()
        .chain(body)
        .copied()
        .collect::<Vec<&str>>();
    segment(&profile(Jurisdiction::Hh), &lines).expect("segmentation")
}

#[test]
fn resumed_speaker_keeps_identity() {
    let outcome = segment_hh(&[
        "<emphasis_begin>Präsidentin Carola Veit<emphasis_end>: Das Wort hat Herr Kienscherf.",
        "<emphasis_begin>Dirk Kienscherf<emphasis_end> SPD: Frau Präsidentin!",
        "<emphasis_begin>Präsidentin Carola Veit<emphasis_end>: Ihre Redezeit.",
        "<emphasis_begin>Dirk Kienscherf<emphasis_end> (fortfahrend): Ein letzter Satz.",
        "Ende: 18.42 Uhr",
    ]);

    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("Carola Veit", "Das Wort hat Herr Kienscherf.", 0, 0, false),
            ("Dirk Kienscherf", "Frau Präsidentin!", 1, 0, false),
            ("Carola Veit", "Ihre Redezeit.", 2, 0, false),
            ("Dirk Kienscherf", "Ein letzter Satz.", 3, 0, false),
        ]
    );
    assert_eq!(outcome.segments[3], SpeechSegment {
        seq: 3,
        text: "Ein letzter Satz.".to_string(),
        ..outcome.segments[1].clone()
    });
}

#[test]
fn resume_with_unknown_name_returns_to_the_interrupted_speaker() {
    let outcome = segment_hh(&[
        "<emphasis_begin>Dirk Kienscherf<emphasis_end> SPD: Frau Präsidentin!",
        "<emphasis_begin>Präsidentin Carola Veit<emphasis_end>: Ruhe bitte.",
        "<emphasis_begin>Dirk Kien-scherf<emphasis_end> (fortfahrend): Danke.",
        "Ende: 18.42 Uhr",
    ]);

    let resumed = &outcome.segments[2];
    assert_eq!(resumed.speaker, "Dirk Kienscherf");
    assert_eq!(resumed.party.as_deref(), Some("SPD"));
    assert_eq!(resumed.seq, 2);
}

#[test]
fn party_is_remembered_for_later_leads_without_one() {
    let outcome = segment_hh(&[
        "<emphasis_begin>Dirk Kienscherf<emphasis_end> SPD: Frau Präsidentin!",
        "<emphasis_begin>Senator Dr. Andreas Dressel<emphasis_end>: Gerne.",
        "<emphasis_begin>Zwischenfrage von Dirk Kienscherf<emphasis_end>: Eine Frage.",
        "Ende: 18.42 Uhr",
    ]);

    assert_eq!(outcome.segments[1].speaker, "Dr. Andreas Dressel");
    assert_eq!(outcome.segments[1].role, Role::Executive);
    assert_eq!(outcome.segments[2].speaker, "Dirk Kienscherf");
    assert_eq!(outcome.segments[2].party.as_deref(), Some("SPD"));
}

#[test]
fn bracketed_headings_open_only_on_brackets() {
    let outcome = segment_hh(&[
        "<emphasis_begin>[Antrag der Fraktion der SPD:",
        "Klimaschutz stärken]<emphasis_end>",
        "<emphasis_begin>Dirk Kienscherf<emphasis_end> SPD: Frau Präsidentin!",
        "<emphasis_begin>Wichtig<emphasis_end> ist das.",
        "Ende: 18.42 Uhr",
    ]);

    assert_eq!(outcome.segments.len(), 1);
    assert_eq!(outcome.segments[0].text, "Frau Präsidentin! Wichtig ist das.");
    assert_eq!(
        outcome.segments[0].issue.as_deref(),
        Some("[Antrag der Fraktion der SPD: Klimaschutz stärken]")
    );
}

#[test]
fn segments_are_gapless_across_turns_and_interjections() {
    let outcome = segment_hh(&[
        "<emphasis_begin>Präsidentin Carola Veit<emphasis_end>: Wir beginnen.",
        "<interjection_begin>(Unruhe)<interjection_end>",
        "<emphasis_begin>Dirk Kienscherf<emphasis_end> SPD:",
        "<interjection_begin>(Beifall bei der SPD)<interjection_end>",
        "Frau Präsidentin!",
        "<interjection_begin>(Zuruf)<interjection_end>",
        "<interjection_begin>()<interjection_end>",
        "<emphasis_begin>Präsidentin Carola Veit<emphasis_end>:",
        "<emphasis_begin>Dennis Thering<emphasis_end> CDU: Danke.",
        "Ende: 18.42 Uhr",
    ]);

    assert_gapless(&outcome.segments);
    assert_eq!(outcome.turn_count(), 3);
    assert_eq!(outcome.interjection_count(), 3);
    for segment in &outcome.segments {
        assert!(!segment.text.is_empty());
        assert!(!segment.text.contains('<'), "markup left in {:?}", segment.text);
    }
}

#[test]
fn tagged_document_is_fed_line_by_line() {
    let profile = profile(Jurisdiction::Nrw);
    let lines = [
        "Plenarprotokoll 17/85\n11.03.2020",
        "<emphasis_begin>Beginn: 10:02 Uhr<emphasis_end>",
        "<emphasis_begin>Präsident André Kuper:<emphasis_end> Guten\nMorgen.",
        "Schluss: 17:16 Uhr",
    ]
    .iter()
    .map(|text| TaggedLine {
        page: 0,
        text: text.to_string(),
    })
    .collect::<Vec<TaggedLine>>();

    let outcome = segment_document(&profile, meta(Jurisdiction::Nrw), &lines, None)
        .expect("segmentation");
    assert_eq!(
        summary(&outcome.segments),
        vec![("André Kuper", "Guten Morgen.", 0, 0, false)]
    );
}

fn placed(left: f64, top: f64, text: &str, bold_chars: usize) -> PositionedFragment {
    PositionedFragment {
        bbox: Some(BoundingBox {
            left,
            top,
            right: left + 240.0,
            bottom: top - 12.0,
        }),
        text: text.to_string(),
        emphasis: (0..text.chars().count()).map(|index| index < bold_chars).collect(),
    }
}

#[test]
fn marginal_applause_fragment_splits_the_speech() {
    let profile = profile(Jurisdiction::Nrw);
    let document = Document {
        pages: vec![Page {
            fragments: vec![
                placed(57.0, 760.0, "Plenarprotokoll 17/85 11.03.2020", 0),
                placed(57.0, 740.0, "Beginn: 10:02 Uhr", 17),
                placed(120.0, 700.0, "(Beifall)", 0),
                placed(57.0, 720.0, "Präsident André Kuper: Meine Damen und Herren!", 22),
                placed(57.0, 680.0, "Wir beginnen.", 0),
                placed(57.0, 660.0, "Schluss: 17:16 Uhr", 0),
            ],
        }],
    };

    let tagged = tag_document(&document, &profile);
    assert_eq!(tagged.stats.interjection_spans, 1);

    let outcome = segment_document(&profile, meta(Jurisdiction::Nrw), &tagged.lines, None)
        .expect("segmentation");
    assert_eq!(
        summary(&outcome.segments),
        vec![
            ("André Kuper", "Meine Damen und Herren!", 0, 0, false),
            ("André Kuper", "Beifall", 0, 1, true),
            ("André Kuper", "Wir beginnen.", 0, 2, false),
        ]
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn render_segment_command_lists_overrides() {
    let args = SegmentArgs {
        cache_root: PathBuf::from(".cache/plenary"),
        jurisdiction: Jurisdiction::Sn,
        geometry_path: None,
        output_path: None,
        run_manifest_path: None,
        jobs: Some(4),
        timeout_ms: 5_000,
        min_interjections: Some(10),
        min_turns: None,
    };

    let command = render_segment_command(&args);
    assert!(command.starts_with("plenary segment --cache-root .cache/plenary --jurisdiction sn"));
    assert!(command.contains("--jobs 4"));
    assert!(command.contains("--timeout-ms 5000"));
    assert!(command.contains("--min-interjections 10"));
    assert!(!command.contains("--min-turns"));
}
