use super::{BannerMode, GrammarTables, RolePattern, RuleKind};
use crate::model::Role;

const ROLE_RULES: &[RolePattern] = &[
    RolePattern {
        kind: RuleKind::Assign(Role::Chair),
        pattern: r"^{E}(Alterspräsident(?:in)?|Präsident(?:in)?|(?:[0-9]\.\s*)?(?:Erste|Zweite|Dritte|Vierte)?\s*Vizepräsident(?:in)?)\s+(.+?):",
        name_group: 2,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Executive),
        pattern: r"^{E}(.+?),\s+(Staatsminister(?:in)?|Ministerpräsident(?:in)?).+$",
        name_group: 1,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Servant),
        pattern: r"^{E}(.+?),\s+(Staatssekretär(?:in)?)",
        name_group: 1,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Commissioner),
        pattern: r"^{E}(.+?),\s+(Sächsischer?\s+(?:Ausländer|Datenschutz).*$)",
        name_group: 1,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::MemberOfParliament),
        pattern: r"^{E}(.+?),\s+(CDU|SPD|BÜNDNISGRÜNE|BÜNDNIS\s+90/DIE\s+GRÜNEN|GRÜNE|Linksfraktion|(?:Die\s+)?Linke|DIE\s*LINKE|FDP|NPD|AfD|fraktionslos)(?:{/E})?:",
        name_group: 1,
        party_group: Some(2),
    },
];

pub(super) const TABLES: GrammarTables = GrammarTables {
    session_begin: r"^(?:{I})?\((?:Beginn|Fortsetzung)(?:\s+der\s+Sitzung)?:?\s+[0-9]{1,2}[.:][0-9]{1,2}",
    session_end: r"^(?:{I})?\((?:Schluss|Unterbrechung)\s+(?:des\s+ersten\s+Teils\s+)?der\s+Sitzung(?::?\s+)?[0-9]{1,2}[.:][0-9]{1,2}|^(?:{I})?\(Schluss\s+.?der\s+Sitzung:",
    interjection_start: r"^{I}\(",
    interjection_rejects_emphasis: true,
    date_capture: r"([0-9]{1,2}\.\s*(?:[0-9]{1,2}\.|\p{L}+\s+)\s*[0-9]{4})",
    date_formats: &["%d. %B %Y", "%d.%B %Y", "%d.%m.%Y"],
    filename: r"^(\d)_\D+_(\d{1,3})",
    role_rules: ROLE_RULES,
    party_aliases: &[
        ("BÜNDNISGRÜNE", "GRÜNE"),
        ("BÜNDNIS 90/DIE GRÜNEN", "GRÜNE"),
        ("Linksfraktion", "DIE LINKE"),
        ("Linke", "DIE LINKE"),
        ("Die Linke", "DIE LINKE"),
        ("DIELINKE", "DIE LINKE"),
    ],
    speaker_repairs: &[],
    banner_mode: BannerMode::SingleSpan,
    skip_page_numbers: true,
};
