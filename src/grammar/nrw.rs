use super::{BannerMode, GrammarTables, RolePattern, RuleKind};
use crate::model::Role;

const ROLE_RULES: &[RolePattern] = &[
    RolePattern {
        kind: RuleKind::Assign(Role::Chair),
        pattern: r"^{E}(Alterspräsident(?:in)?|(?:Geschäftsführender\s+)?Präsident(?:in)?|Erster?\s+Vizepräsident(?:in)?|Vizepräsident(?:in)?)\s+(.+)",
        name_group: 2,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Executive),
        pattern: r"^{E}(.+?)(?:{/E},(?:\*\))?\s+|,(?:\*\))?(?:\s+{/E}|{/E}\s+))(geschäftsführender|Minister(?:in)?\s+(?:für|der|des)\s+.+|Ministerpräsident(?:in)?|Finanzminis(?:-|ter(?:in)?)|Justizminister(?:in)?)",
        name_group: 1,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Executive),
        pattern: r"^{E}Ministerpräsident(?:in)?\s+(.+?){/E}",
        name_group: 1,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::Servant),
        pattern: r"^{E}(Staatssekretär(?:in)?)\s+(.+)",
        name_group: 2,
        party_group: None,
    },
    RolePattern {
        kind: RuleKind::Assign(Role::MemberOfParliament),
        pattern: r"^{E}(.+?)(?:\s+{/E}|{/E}\s+)?(?:\*\))?\((CDU|SPD|FDP|PIRATEN|GRÜNE|AfD|fraktionslos)",
        name_group: 1,
        party_group: Some(2),
    },
    RolePattern {
        kind: RuleKind::Assign(Role::ConstitutionalCourtPresident),
        pattern: r"^{E}(.+?),{/E}\s+Präsident(?:in)?\s+des\s+Verfas",
        name_group: 1,
        party_group: None,
    },
];

pub(super) const TABLES: GrammarTables = GrammarTables {
    session_begin: r"^{E}Beginn:?\s+(?:[0-9]{1,2}[.:][0-9]{1,2}|[0-9]{1,2})(?:\s+Uhr)?",
    session_end: r"^(?:Schluss|Ende):?\s+(?:[0-9]{1,2}[.:][0-9]{1,2}|[0-9]{1,2}\s*Uhr)",
    interjection_start: r"^(?:{E})?{I}\(",
    interjection_rejects_emphasis: false,
    date_capture: r"([0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4})",
    date_formats: &["%d.%m.%Y"],
    filename: r"(\d\d)-(\d{1,3})",
    role_rules: ROLE_RULES,
    party_aliases: &[("Grüne", "GRÜNE"), ("Piraten", "PIRATEN")],
    speaker_repairs: &[],
    banner_mode: BannerMode::CarryOver,
    skip_page_numbers: false,
};
