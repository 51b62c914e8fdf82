use std::fmt::Write;

use sklon_morph::{adjective_form, comparative_form, noun_form, pronoun_form, short_form};
use sklon_protocol::{AgreementSlot, Case, Gender, Lexeme, NounProperties, RussianAdjective, RussianNoun, RussianPronoun};

const SLOT_GENDERS: [(AgreementSlot, Gender); 4] = [
    (AgreementSlot::Masculine, Gender::Masculine),
    (AgreementSlot::Neuter, Gender::Neuter),
    (AgreementSlot::Feminine, Gender::Feminine),
    (AgreementSlot::Plural, Gender::Masculine),
];

/// Renders every form of a lexeme as a plain-text table.
pub fn render(lexeme: &Lexeme) -> String {
    match lexeme {
        Lexeme::Noun(noun) => render_noun(noun),
        Lexeme::Adjective(adj) => render_adjective(adj),
        Lexeme::Pronoun(pronoun) => render_pronoun(pronoun),
    }
}

fn render_noun(noun: &RussianNoun) -> String {
    let mut out = String::new();
    for case in Case::ALL {
        let singular = noun_form(noun, case, false);
        let plural = noun_form(noun, case, true);
        let _ = writeln!(out, "{:<4} {:<20} {}", case.abbreviation(), singular, plural);
    }
    out
}

fn render_adjective(adj: &RussianAdjective) -> String {
    let mut out = String::new();
    for case in Case::PRIMARY {
        let _ = write!(out, "{:<4}", case.abbreviation());
        for (slot, gender) in SLOT_GENDERS {
            let plural = slot == AgreementSlot::Plural;
            let form = adjective_form(adj, NounProperties::new(gender, false), case, plural);
            let _ = write!(out, " {:<18}", form);
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    let short: Vec<String> = SLOT_GENDERS
        .iter()
        .map(|&(slot, gender)| short_form(adj, gender, slot == AgreementSlot::Plural, true).unwrap_or_else(|| "-".into()))
        .collect();
    let _ = writeln!(out, "short {}", short.join(" "));
    if let Some(comparative) = comparative_form(adj) {
        let _ = writeln!(out, "comp  {comparative}");
    }
    out
}

fn render_pronoun(pronoun: &RussianPronoun) -> String {
    let mut out = String::new();
    for case in Case::PRIMARY {
        let singular = pronoun_form(pronoun, case, false);
        let plural = pronoun_form(pronoun, case, true);
        let _ = writeln!(out, "{:<4} {:<20} {}", case.abbreviation(), singular, plural);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use sklon_protocol::Lexicon;

    #[fixture]
    fn demo() -> Lexicon {
        serde_json::from_str(include_str!("../data/demo.json")).unwrap()
    }

    #[rstest]
    fn test_demo_lexicon_is_valid(demo: Lexicon) {
        assert_eq!(demo.entries.len(), 5);
        assert!(demo.validate().is_ok());
    }

    #[rstest]
    #[case(1, 9, "nom  собака", "собаки")]
    #[case(2, 9, "nom  лес", "леса")]
    #[case(4, 8, "nom  красивый", "красивые")]
    #[case(5, 6, "nom  мой", "мои")]
    fn test_table_shape(
        demo: Lexicon,
        #[case] id: u32,
        #[case] rows: usize,
        #[case] starts: &str,
        #[case] first_row_ends: &str,
    ) {
        let table = render(demo.find(id.into()).unwrap());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), rows);
        assert!(lines[0].starts_with(starts));
        assert!(lines[0].ends_with(first_row_ends));
    }

    #[rstest]
    fn test_noun_table(demo: Lexicon) {
        let table = render(demo.find(2.into()).unwrap());
        assert!(table.lines().nth(8).unwrap().starts_with("loc  лесу"));
    }

    #[rstest]
    fn test_adjective_table(demo: Lexicon) {
        let table = render(demo.find(4.into()).unwrap());
        assert!(table.contains("short красив красиво красива красивы"));
        assert!(table.contains("comp  красивее"));
    }
}
