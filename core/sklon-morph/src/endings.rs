//! Ending tables.
//!
//! Rows are authored as readable strings, one cell per form: `"ом"` when the
//! ending does not depend on stress, `"ем/ём"` for an unstressed/stressed
//! pair, and `"~"` for an accusative that borrows the nominative or genitive
//! ending. They are compiled into flat byte tables of [`ENDINGS`] indices;
//! each key holds the unstressed index, `key | 1` the stressed one.

use sklon_protocol::{AgreementSlot, Case, Gender, PreparedProperties};

/// Every ending that appears in a table. Index 0 is the "borrow from the
/// nominative or genitive" marker and is never emitted.
pub const ENDINGS: [&str; 49] = [
    "~", "", "а", "я", "о", "е", "ё", "у", "ю", "ы", "и", "ь", "й", "ом", "ем", "ём", "ой", "ей", "ёй", "ью", "ам",
    "ям", "ами", "ями", "ах", "ях", "ов", "ев", "ёв", "ый", "ий", "ого", "его", "ому", "ему", "ым", "им", "ую", "юю",
    "ая", "яя", "ое", "ее", "ые", "ие", "ых", "их", "ыми", "ими",
];

const DERIVED: u8 = 0;

/// Masculine types 1-8, neuter 1-8, feminine 1-8. Cells: singular N G D A I P,
/// then plural N G D A I P.
const NOUN_ROWS: [[&str; 12]; 24] = [
    ["", "а", "у", "~", "ом", "е", "ы", "ов", "ам", "~", "ами", "ах"],
    ["ь", "я", "ю", "~", "ем/ём", "е", "и", "ей", "ям", "~", "ями", "ях"],
    ["", "а", "у", "~", "ом", "е", "и", "ов", "ам", "~", "ами", "ах"],
    ["", "а", "у", "~", "ем/ом", "е", "и", "ей", "ам", "~", "ами", "ах"],
    ["", "а", "у", "~", "ем/ом", "е", "ы", "ев/ов", "ам", "~", "ами", "ах"],
    ["й", "я", "ю", "~", "ем/ём", "е", "и", "ев/ёв", "ям", "~", "ями", "ях"],
    ["й", "я", "ю", "~", "ем/ём", "и", "и", "ев/ёв", "ям", "~", "ями", "ях"],
    ["ь", "и", "и", "~", "ем/ём", "и", "и", "ей", "ям", "~", "ями", "ях"],
    // neuter
    ["о", "а", "у", "о", "ом", "е", "а", "", "ам", "~", "ами", "ах"],
    ["е/ё", "я", "ю", "е/ё", "ем/ём", "е", "я", "ей", "ям", "~", "ями", "ях"],
    ["о", "а", "у", "о", "ом", "е", "а", "", "ам", "~", "ами", "ах"],
    ["е/о", "а", "у", "е/о", "ем/ом", "е", "а", "", "ам", "~", "ами", "ах"],
    ["е/о", "а", "у", "е/о", "ем/ом", "е", "а", "", "ам", "~", "ами", "ах"],
    ["е/ё", "я", "ю", "е/ё", "ем/ём", "е", "я", "й", "ям", "~", "ями", "ях"],
    ["е/ё", "я", "ю", "е/ё", "ем/ём", "и", "я", "й", "ям", "~", "ями", "ях"],
    ["я", "и", "и", "я", "ем", "и", "а", "", "ам", "~", "ами", "ах"],
    // feminine
    ["а", "ы", "е", "у", "ой", "е", "ы", "", "ам", "~", "ами", "ах"],
    ["я", "и", "е", "ю", "ей/ёй", "е", "и", "ь/ей", "ям", "~", "ями", "ях"],
    ["а", "и", "е", "у", "ой", "е", "и", "", "ам", "~", "ами", "ах"],
    ["а", "и", "е", "у", "ей/ой", "е", "и", "", "ам", "~", "ами", "ах"],
    ["а", "ы", "е", "у", "ей/ой", "е", "ы", "", "ам", "~", "ами", "ах"],
    ["я", "и", "е", "ю", "ей/ёй", "е", "и", "й", "ям", "~", "ями", "ях"],
    ["я", "и", "и", "ю", "ей/ёй", "и", "и", "й", "ям", "~", "ями", "ях"],
    ["ь", "и", "и", "ь", "ью", "и", "и", "ей", "ям", "~", "ями", "ях"],
];

/// Types 1-7, each with masculine, neuter, feminine and plural rows. Cells:
/// N G D A I P, then the short form.
const ADJECTIVE_ROWS: [[&str; 7]; 28] = [
    ["ый/ой", "ого", "ому", "~", "ым", "ом", ""],
    ["ое", "ого", "ому", "ое", "ым", "ом", "о"],
    ["ая", "ой", "ой", "ую", "ой", "ой", "а"],
    ["ые", "ых", "ым", "~", "ыми", "ых", "ы"],
    // 2
    ["ий", "его", "ему", "~", "им", "ем", "ь"],
    ["ее", "его", "ему", "ее", "им", "ем", "е"],
    ["яя", "ей", "ей", "юю", "ей", "ей", "я"],
    ["ие", "их", "им", "~", "ими", "их", "и"],
    // 3
    ["ий/ой", "ого", "ому", "~", "им", "ом", ""],
    ["ое", "ого", "ому", "ое", "им", "ом", "о"],
    ["ая", "ой", "ой", "ую", "ой", "ой", "а"],
    ["ие", "их", "им", "~", "ими", "их", "и"],
    // 4
    ["ий/ой", "его/ого", "ему/ому", "~", "им", "ем/ом", ""],
    ["ее/ое", "его/ого", "ему/ому", "ее/ое", "им", "ем/ом", "е/о"],
    ["ая", "ей/ой", "ей/ой", "ую", "ей/ой", "ей/ой", "а"],
    ["ие", "их", "им", "~", "ими", "их", "и"],
    // 5
    ["ый/ой", "его/ого", "ему/ому", "~", "ым", "ем/ом", ""],
    ["ее/ое", "его/ого", "ему/ому", "ее/ое", "ым", "ем/ом", "е/о"],
    ["ая", "ей/ой", "ей/ой", "ую", "ей/ой", "ей/ой", "а"],
    ["ые", "ых", "ым", "~", "ыми", "ых", "ы"],
    // 6
    ["ий", "его", "ему", "~", "им", "ем", "й"],
    ["ее", "его", "ему", "ее", "им", "ем", "е/ё"],
    ["яя", "ей", "ей", "юю", "ей", "ей", "я"],
    ["ие", "их", "им", "~", "ими", "их", "и"],
    // 7
    ["ий", "его", "ему", "~", "им", "ем", "й"],
    ["ее", "его", "ему", "ее", "им", "ем", "е"],
    ["яя", "ей", "ей", "юю", "ей", "ей", "я"],
    ["ие", "их", "им", "~", "ими", "их", "и"],
];

/// Types 1-7 in the same layout as adjectives, without the short form.
const PRONOUN_ROWS: [[&str; 6]; 28] = [
    ["", "ого", "ому", "~", "им", "ом"],
    ["о", "ого", "ому", "о", "им", "ом"],
    ["а", "ой", "ой", "у", "ой", "ой"],
    ["и", "их", "им", "~", "ими", "их"],
    // 2
    ["ь", "его", "ему", "~", "им", "ем"],
    ["е", "его", "ему", "е", "им", "ем"],
    ["я", "ей", "ей", "ю", "ей", "ей"],
    ["и", "их", "им", "~", "ими", "их"],
    // 3
    ["", "ого", "ому", "~", "им", "ом"],
    ["о", "ого", "ому", "о", "им", "ом"],
    ["а", "ой", "ой", "у", "ой", "ой"],
    ["и", "их", "им", "~", "ими", "их"],
    // 4
    ["", "его", "ему", "~", "им", "ем"],
    ["е", "его", "ему", "е", "им", "ем"],
    ["а", "ей", "ей", "у", "ей", "ей"],
    ["и", "их", "им", "~", "ими", "их"],
    // 5
    ["", "его", "ему", "~", "ым", "ем"],
    ["е", "его", "ему", "е", "ым", "ем"],
    ["а", "ей", "ей", "у", "ей", "ей"],
    ["ы", "ых", "ым", "~", "ыми", "ых"],
    // 6
    ["й", "его", "ему", "~", "им", "ем/ём"],
    ["е/ё", "его", "ему", "е/ё", "им", "ем/ём"],
    ["я", "ей", "ей", "ю", "ей", "ей"],
    ["и", "их", "им", "~", "ими", "их"],
    // 7
    ["й", "его", "ему", "~", "им", "ем/ём"],
    ["е/ё", "его", "ему", "е/ё", "им", "ем/ём"],
    ["я", "ей", "ей", "ю", "ей", "ей"],
    ["и", "их", "им", "~", "ими", "их"],
];

/// Case index of the short form in the adjective table.
pub const SHORT_FORM: usize = 6;

const NOUN_TABLE_LEN: usize = 6 * 2 * 3 * 8 * 2;
const ADJECTIVE_TABLE_LEN: usize = 7 * 4 * 7 * 2;
const PRONOUN_TABLE_LEN: usize = 6 * 4 * 7 * 2;

const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn find_ending(bytes: &[u8]) -> u8 {
    let mut i = 0;
    while i < ENDINGS.len() {
        if bytes_eq(ENDINGS[i].as_bytes(), bytes) {
            return i as u8;
        }
        i += 1;
    }
    panic!("ending missing from ENDINGS");
}

/// Splits an "unstressed/stressed" cell into its two indices.
const fn parse_cell(cell: &str) -> (u8, u8) {
    let bytes = cell.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' {
            let (unstressed, rest) = bytes.split_at(i);
            let (_, stressed) = rest.split_at(1);
            return (find_ending(unstressed), find_ending(stressed));
        }
        i += 1;
    }
    let index = find_ending(bytes);
    (index, index)
}

const fn noun_key(case: usize, plural: usize, gender: usize, stem_type: usize) -> usize {
    (((case * 2 + plural) * 3 + gender) * 8 + (stem_type - 1)) << 1
}

const fn agreeing_key(case: usize, slot: usize, stem_type: usize) -> usize {
    ((case * 4 + slot) * 7 + (stem_type - 1)) << 1
}

const NOUN_TABLE: [u8; NOUN_TABLE_LEN] = {
    let mut table = [0u8; NOUN_TABLE_LEN];
    let mut row = 0;
    while row < NOUN_ROWS.len() {
        let (gender, stem_type) = (row / 8, row % 8 + 1);
        let mut cell = 0;
        while cell < 12 {
            let key = noun_key(cell % 6, cell / 6, gender, stem_type);
            let (unstressed, stressed) = parse_cell(NOUN_ROWS[row][cell]);
            table[key] = unstressed;
            table[key | 1] = stressed;
            cell += 1;
        }
        row += 1;
    }
    table
};

const ADJECTIVE_TABLE: [u8; ADJECTIVE_TABLE_LEN] = {
    let mut table = [0u8; ADJECTIVE_TABLE_LEN];
    let mut row = 0;
    while row < ADJECTIVE_ROWS.len() {
        let (stem_type, slot) = (row / 4 + 1, row % 4);
        let mut case = 0;
        while case < 7 {
            let key = agreeing_key(case, slot, stem_type);
            let (unstressed, stressed) = parse_cell(ADJECTIVE_ROWS[row][case]);
            table[key] = unstressed;
            table[key | 1] = stressed;
            case += 1;
        }
        row += 1;
    }
    table
};

const PRONOUN_TABLE: [u8; PRONOUN_TABLE_LEN] = {
    let mut table = [0u8; PRONOUN_TABLE_LEN];
    let mut row = 0;
    while row < PRONOUN_ROWS.len() {
        let (stem_type, slot) = (row / 4 + 1, row % 4);
        let mut case = 0;
        while case < 6 {
            let key = agreeing_key(case, slot, stem_type);
            let (unstressed, stressed) = parse_cell(PRONOUN_ROWS[row][case]);
            table[key] = unstressed;
            table[key | 1] = stressed;
            case += 1;
        }
        row += 1;
    }
    table
};

/// Table key of a noun form. Common gender is keyed as feminine.
pub fn compose_key(case: Case, plural: bool, gender: Gender, stem_type: u8) -> usize {
    assert!((1..=8).contains(&stem_type), "noun stem type {stem_type} has no endings");
    let gender = gender.declension_gender() as usize;
    noun_key(case.primary().index(), plural as usize, gender, stem_type as usize)
}

fn pick(table: &[u8], key: usize, stressed: bool) -> u8 {
    table[key | stressed as usize]
}

/// The (unstressed, stressed) ending indices of a noun form, with a borrowed
/// accusative already resolved.
pub fn noun_ending_indices(props: &PreparedProperties, stem_type: u8) -> (u8, u8) {
    let key = compose_key(props.case, props.plural, props.gender, stem_type);
    let mut indices = (NOUN_TABLE[key], NOUN_TABLE[key | 1]);
    if indices.0 == DERIVED {
        let key = compose_key(props.accusative_source(), props.plural, props.gender, stem_type);
        indices = (NOUN_TABLE[key], NOUN_TABLE[key | 1]);
    }
    indices
}

pub fn noun_ending(props: &PreparedProperties, stem_type: u8, stressed: bool) -> &'static str {
    let (unstressed, stressed_index) = noun_ending_indices(props, stem_type);
    ENDINGS[if stressed { stressed_index } else { unstressed } as usize]
}

/// Ending of an adjective form. `case` is a primary case index, or
/// [`SHORT_FORM`].
pub fn adjective_ending(case: usize, slot: AgreementSlot, animate: bool, stem_type: u8, stressed: bool) -> &'static str {
    assert!((1..=7).contains(&stem_type), "adjective stem type {stem_type} has no endings");
    let lookup = |case: usize| pick(&ADJECTIVE_TABLE, agreeing_key(case, slot as usize, stem_type as usize), stressed);
    let mut index = lookup(case);
    if index == DERIVED {
        index = lookup(if animate { Case::Genitive.index() } else { Case::Nominative.index() });
    }
    ENDINGS[index as usize]
}

pub fn pronoun_ending(props: &PreparedProperties, stem_type: u8, stressed: bool) -> &'static str {
    assert!((1..=7).contains(&stem_type), "pronoun stem type {stem_type} has no endings");
    let slot = props.slot() as usize;
    let lookup = |case: Case| pick(&PRONOUN_TABLE, agreeing_key(case.index(), slot, stem_type as usize), stressed);
    let mut index = lookup(props.case);
    if index == DERIVED {
        index = lookup(props.accusative_source());
    }
    ENDINGS[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sklon_protocol::NounProperties;

    fn props(gender: Gender, animate: bool, case: Case, plural: bool) -> PreparedProperties {
        NounProperties::new(gender, animate).prepare(case, plural)
    }

    #[test]
    fn test_every_cell_is_resolved() {
        // Only accusatives may borrow; everything else must be a real ending.
        for gender in [Gender::Masculine, Gender::Neuter, Gender::Feminine] {
            for stem_type in 1..=8 {
                for case in Case::PRIMARY {
                    for plural in [false, true] {
                        let key = compose_key(case, plural, gender, stem_type);
                        if case != Case::Accusative {
                            assert_ne!(NOUN_TABLE[key], DERIVED, "{gender:?} {stem_type} {case} {plural}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = alloc::vec::Vec::new();
        for case in Case::PRIMARY {
            for plural in [false, true] {
                for gender in [Gender::Masculine, Gender::Neuter, Gender::Feminine] {
                    for stem_type in 1..=8 {
                        seen.push(compose_key(case, plural, gender, stem_type));
                    }
                }
            }
        }
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), NOUN_TABLE_LEN / 2);
        assert!(seen.iter().all(|key| key & 1 == 0));
    }

    #[rstest]
    #[case(Gender::Feminine, 3, Case::Genitive, false, false, "и")]
    #[case(Gender::Masculine, 2, Case::Instrumental, false, true, "ём")]
    #[case(Gender::Masculine, 2, Case::Instrumental, false, false, "ем")]
    #[case(Gender::Neuter, 1, Case::Genitive, true, false, "")]
    #[case(Gender::Feminine, 8, Case::Instrumental, false, false, "ью")]
    #[case(Gender::Common, 1, Case::Dative, false, false, "е")]
    fn test_noun_endings(
        #[case] gender: Gender,
        #[case] stem_type: u8,
        #[case] case: Case,
        #[case] plural: bool,
        #[case] stressed: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(noun_ending(&props(gender, false, case, plural), stem_type, stressed), expected);
    }

    #[test]
    fn test_accusative_borrows_by_animacy() {
        let cat = props(Gender::Masculine, true, Case::Accusative, false);
        assert_eq!(noun_ending(&cat, 1, false), "а");
        let table = props(Gender::Masculine, false, Case::Accusative, false);
        assert_eq!(noun_ending(&table, 1, false), "");
        let dogs = props(Gender::Feminine, true, Case::Accusative, true);
        assert_eq!(noun_ending(&dogs, 3, false), "");
        // The feminine singular has its own accusative.
        let dog = props(Gender::Feminine, true, Case::Accusative, false);
        assert_eq!(noun_ending(&dog, 3, false), "у");
    }

    #[test]
    fn test_adjective_and_pronoun_endings() {
        assert_eq!(adjective_ending(0, AgreementSlot::Masculine, false, 1, true), "ой");
        assert_eq!(adjective_ending(3, AgreementSlot::Plural, true, 1, false), "ых");
        assert_eq!(adjective_ending(3, AgreementSlot::Masculine, false, 4, false), "ий");
        assert_eq!(adjective_ending(SHORT_FORM, AgreementSlot::Neuter, false, 6, true), "ё");

        let one = props(Gender::Feminine, false, Case::Accusative, false);
        assert_eq!(pronoun_ending(&one, 1, true), "у");
        let mine = props(Gender::Neuter, false, Case::Prepositional, false);
        assert_eq!(pronoun_ending(&mine, 6, true), "ём");
    }
}
