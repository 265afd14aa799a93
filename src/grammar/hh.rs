use super::{BannerMode, GrammarTables, RolePattern, RuleKind};
use crate::model::Role;

const ROLE_RULES: &[RolePattern] = &[
    RolePattern {
        kind: RuleKind::Assign(Role::Chair),
        pattern: r"^{E}(Alterspräsident(?:in)?|Präsident(?:in)?|Erster?\s+Vizepräsident(?:in)?|Vizepräsident(?:in)?)\s+(.+?){/E}",
        name_group: 2,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Executive),
        pattern: r"^{E}(Senator(?:in)?|Erster?\s+Bürgermeister(?:in)?|Zweiter?\s+Bürgermeister(?:in)?)\s+(.+)",
        name_group: 2,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Servant),
        pattern: r"^{E}(Staatsrat|Staatsrätin)\s+(.+?):",
        name_group: 2,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::MemberOfParliament),
        pattern: r"^{E}(?:Zwischenbemerkung|Zwischenfrage)\s+von\s+(.+?)\s*(?:{/E}\s*)?\(?(CDU|SPD|DIE\s+LINKE|GAL|GR(?:-|Ü(?:-|NE))|FDP|AfD|fraktionslos)?\)?\s*(?::|$)",
        name_group: 1,
        party_group: Some(2),
    },
    RolePattern {
        kind: RuleKind::Assign(Role::MemberOfParliament),
        pattern: r"^{E}(.+?)\s?{/E}\s*\(?(CDU|SPD|(?:DIE\s+)?LINKE|GAL|GR(?:-|Ü(?:-|NE))|FDP|A[fF]D|fraktionslos)[\]\)]?",
        name_group: 1,
        party_group: Some(2),
    },
    RolePattern {
        kind: RuleKind::Resume,
        pattern: r"^{E}(.+?)\s*{/E}\s*\((?:fortfahrend|unterbrechend)",
        name_group: 1,
        party_group: None,
    },
];

pub(super) const TABLES: GrammarTables = GrammarTables {
    session_begin: r"(?:Beginn der Sitzung|Beginn|Schluss|Ende):\s+\d\d[.:]\d\d\s+Uhr",
    session_end: r"Ende:\s+(?:Ende.?)?[0-9]{1,2}[.:][0-9]{1,2}\s+Uhr",
    interjection_start: r"{I}",
    interjection_rejects_emphasis: false,
    date_capture: r"([0-9]{1,2}\.\s*(?:[0-9]{1,2}\.|\p{L}+\s+)\s*[0-9]{4})",
    date_formats: &["%d. %B %Y", "%d.%m.%Y"],
    filename: r"(\d\d)-(\d{1,3})",
    role_rules: ROLE_RULES,
    party_aliases: &[
        ("AFD", "AfD"),
        ("GRÜ-", "GRÜNE"),
        ("GR-", "GRÜNE"),
        ("LINKE", "DIE LINKE"),
    ],
    speaker_repairs: &[("Stapel-", "Stapelfeldt")],
    banner_mode: BannerMode::Bracketed,
    skip_page_numbers: false,
};
