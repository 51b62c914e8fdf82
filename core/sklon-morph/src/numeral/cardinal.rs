use alloc::string::String;
use alloc::vec::Vec;

use sklon_protocol::{AnomalyKey, Case, CountAgreement, DeclensionFlags, Gender, NounProperties, RussianNoun, Stress};
use tracing::debug;

use super::agreement;
use crate::lexeme::noun_form;
use crate::{noun, pronoun, Paradigm};

const NOL: Paradigm = Paradigm::new(2, Stress::B, DeclensionFlags::empty());
const ODIN: Paradigm = Paradigm::new(1, Stress::B, DeclensionFlags::STAR);
const DECIMAL: Paradigm = Paradigm::new(8, Stress::B, DeclensionFlags::empty());
const DECIMAL_STAR: Paradigm = Paradigm::new(8, Stress::B, DeclensionFlags::STAR);
const TEEN: Paradigm = Paradigm::new(8, Stress::A, DeclensionFlags::empty());
const THOUSAND: Paradigm = Paradigm::new(4, Stress::A, DeclensionFlags::empty());
const MILLION: Paradigm = Paradigm::new(1, Stress::A, DeclensionFlags::empty());

pub(super) const INANIMATE: NounProperties = NounProperties::new(Gender::Masculine, false);
const NUMERAL_NOUN: NounProperties = NounProperties::new(Gender::Feminine, false);

/// Scale nouns, largest first: (value, stem, paradigm, gender).
pub(super) const SCALES: [(u64, &str, Paradigm, Gender); 6] = [
    (1_000_000_000_000_000_000, "квинтиллион", MILLION, Gender::Masculine),
    (1_000_000_000_000_000, "квадриллион", MILLION, Gender::Masculine),
    (1_000_000_000_000, "триллион", MILLION, Gender::Masculine),
    (1_000_000_000, "миллиард", MILLION, Gender::Masculine),
    (1_000_000, "миллион", MILLION, Gender::Masculine),
    (1_000, "тысяч", THOUSAND, Gender::Feminine),
];

const TEENS: [&str; 10] = [
    "десят",
    "одиннадцат",
    "двенадцат",
    "тринадцат",
    "четырнадцат",
    "пятнадцат",
    "шестнадцат",
    "семнадцат",
    "восемнадцат",
    "девятнадцат",
];

const fn is_direct(case: Case) -> bool {
    matches!(case, Case::Nominative | Case::Accusative)
}

/// 1-9 in `case`, agreeing with a counted noun of `counted` where the
/// numeral has gender (один, два).
pub(super) fn small(digit: u64, case: Case, counted: NounProperties) -> String {
    let forms = match digit {
        1 => return pronoun::inflect("один", &ODIN, &counted.prepare(case, false)),
        2 => ["два", "двух", "двум", "двумя"],
        3 => ["три", "трёх", "трём", "тремя"],
        4 => ["четыре", "четырёх", "четырём", "четырьмя"],
        5 => return decimal("пят", &DECIMAL, case),
        6 => return decimal("шест", &DECIMAL, case),
        7 => return decimal("сем", &DECIMAL, case),
        8 => return decimal("восем", &DECIMAL_STAR, case),
        9 => return decimal("девят", &DECIMAL, case),
        _ => panic!("{digit} is not a digit"),
    };
    let form = match case.primary() {
        Case::Nominative | Case::Accusative => {
            if digit == 2 && counted.gender.declension_gender() == Gender::Feminine {
                "две"
            } else {
                forms[0]
            }
        }
        Case::Dative => forms[2],
        Case::Instrumental => forms[3],
        _ => forms[1],
    };
    String::from(form)
}

/// Numerals that decline like "ночь".
fn decimal(stem: &str, paradigm: &Paradigm, case: Case) -> String {
    noun::inflect(stem, paradigm, &NUMERAL_NOUN.prepare(case, false))
}

/// 10-19.
pub(super) fn teen(n: u64, case: Case) -> String {
    let paradigm = if n == 10 { &DECIMAL } else { &TEEN };
    decimal(TEENS[(n - 10) as usize], paradigm, case)
}

/// Multiples of ten from 20 to 90, by their tens digit.
pub(super) fn tens(digit: u64, case: Case) -> String {
    match digit {
        2 => decimal("двадцат", &DECIMAL, case),
        3 => decimal("тридцат", &DECIMAL, case),
        4 => String::from(if is_direct(case) { "сорок" } else { "сорока" }),
        9 => String::from(if is_direct(case) { "девяносто" } else { "девяноста" }),
        5..=8 if is_direct(case) => format!("{}десят", small(digit, case, INANIMATE)),
        5..=8 => format!("{}{}", small(digit, case, INANIMATE), decimal("десят", &DECIMAL, case)),
        _ => panic!("{digit}0 is not a tens numeral"),
    }
}

/// Multiples of a hundred, by their hundreds digit.
pub(super) fn hundreds(digit: u64, case: Case) -> String {
    let direct = is_direct(case);
    match digit {
        1 => String::from(if direct { "сто" } else { "ста" }),
        2 if direct => String::from("двести"),
        3 if direct => String::from("триста"),
        4 if direct => String::from("четыреста"),
        _ => {
            let suffix = match case.primary() {
                Case::Nominative | Case::Accusative | Case::Genitive => "сот",
                Case::Dative => "стам",
                Case::Instrumental => "стами",
                _ => "стах",
            };
            format!("{}{}", small(digit, case, INANIMATE), suffix)
        }
    }
}

/// Words of a group of three digits (1-999).
fn group(n: u64, case: Case, counted: NounProperties, words: &mut Vec<String>) {
    let (h, t) = (n / 100, n % 100);
    if h > 0 {
        words.push(hundreds(h, case));
    }
    match t {
        0 => {}
        10..=19 => words.push(teen(t, case)),
        _ => {
            if t >= 20 {
                words.push(tens(t / 10, case));
            }
            if t % 10 > 0 {
                words.push(small(t % 10, case, counted));
            }
        }
    }
}

/// The (case, number) of a noun counted by `n` when the numeral stands in
/// `case`. Zero is a noun itself and always takes the genitive plural.
fn counted_form(n: u64, case: Case) -> (Case, bool) {
    if n == 0 {
        return (Case::Genitive, true);
    }
    match (is_direct(case), agreement(n as i64)) {
        (_, CountAgreement::Singular) => (case, false),
        (true, CountAgreement::Paucal) => (Case::Genitive, false),
        (true, CountAgreement::Plural) => (Case::Genitive, true),
        (false, _) => (case, true),
    }
}

/// The case the numeral itself takes: an animate accusative of 2-4 uses
/// the genitive ("вижу двух собак"), larger numbers keep the nominative
/// ("вижу двадцать две собаки").
fn numeral_case(n: u64, case: Case, counted: NounProperties) -> Case {
    let case = case.primary();
    if case == Case::Accusative && counted.animate && (2..=4).contains(&n) {
        Case::Genitive
    } else {
        case
    }
}

pub(super) fn compose(n: u64, case: Case, counted: NounProperties, words: &mut Vec<String>) {
    if n == 0 {
        words.push(noun::inflect("нол", &NOL, &INANIMATE.prepare(case, false)));
        return;
    }
    let mut rest = n;
    let mut leading = true;
    for (value, stem, paradigm, gender) in SCALES {
        let count = rest / value;
        rest %= value;
        if count == 0 {
            continue;
        }
        let scale = NounProperties::new(gender, false);
        if !(leading && count == 1) {
            group(count, case, scale, words);
        }
        let (scale_case, plural) = counted_form(count, case);
        words.push(noun::inflect(stem, &paradigm, &scale.prepare(scale_case, plural)));
        leading = false;
    }
    if rest > 0 {
        group(rest, case, counted, words);
    }
}

/// Spells out `number` in `case`, agreeing with a counted noun of
/// `counted` ("двадцать одна", "двух").
pub fn cardinal(number: i64, case: Case, counted: NounProperties) -> String {
    let n = number.unsigned_abs();
    let mut words = Vec::new();
    if number < 0 {
        words.push(String::from("минус"));
    }
    compose(n, numeral_case(n, case, counted), counted, &mut words);
    words.join(" ")
}

/// The form of `noun` after `number` in `case`: "собаки" after 2, "собак"
/// after 5. A registered count anomaly replaces a genitive count form.
pub fn count_form(noun: &RussianNoun, number: i64, case: Case) -> String {
    let n = number.unsigned_abs();
    let (noun_case, plural) = counted_form(n, numeral_case(n, case, noun.properties));
    // "в одном лесу": a secondary case survives when the noun follows the numeral's case.
    let noun_case = if noun_case == case.primary() { case } else { noun_case };
    let agreement = agreement(number);
    if noun_case == Case::Genitive && agreement != CountAgreement::Singular {
        if let Some(form) = noun.count_anomalies.get(AnomalyKey::count(agreement)) {
            debug!(stem = %noun.stem, number, ?case, form, "count anomaly");
            return String::from(form);
        }
    }
    noun_form(noun, noun_case, plural)
}

/// `number` followed by `noun` in agreement: "двадцать две собаки".
pub fn count_phrase(noun: &RussianNoun, number: i64, case: Case) -> String {
    format!("{} {}", cardinal(number, case, noun.properties), count_form(noun, number, case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sklon_protocol::NounDeclension;

    fn dog() -> RussianNoun {
        RussianNoun::new(
            "собак",
            NounDeclension::new(3, Stress::A, DeclensionFlags::empty()).unwrap(),
            NounProperties::new(Gender::Feminine, true),
        )
    }

    fn person() -> RussianNoun {
        let mut noun = RussianNoun::new(
            "человек",
            NounDeclension::new(3, Stress::A, DeclensionFlags::empty()).unwrap(),
            NounProperties::new(Gender::Masculine, true),
        );
        noun.count_anomalies.set(AnomalyKey::count(CountAgreement::Plural), Some("человек".into()));
        noun
    }

    #[rstest]
    #[case(0, "ноль собак")]
    #[case(1, "одна собака")]
    #[case(2, "две собаки")]
    #[case(5, "пять собак")]
    #[case(11, "одиннадцать собак")]
    #[case(22, "двадцать две собаки")]
    #[case(101, "сто одна собака")]
    #[case(1000, "тысяча собак")]
    #[case(2000, "две тысячи собак")]
    #[case(5_000_000, "пять миллионов собак")]
    #[case(1_001_001, "миллион одна тысяча одна собака")]
    #[case(-5, "минус пять собак")]
    fn test_nominative_phrases(#[case] number: i64, #[case] expected: &str) {
        assert_eq!(count_phrase(&dog(), number, Case::Nominative), expected);
    }

    #[rstest]
    #[case(1, "одну собаку")]
    #[case(2, "двух собак")]
    #[case(4, "четырёх собак")]
    #[case(5, "пять собак")]
    #[case(21, "двадцать одну собаку")]
    #[case(22, "двадцать две собаки")]
    #[case(1000, "тысячу собак")]
    fn test_animate_accusative(#[case] number: i64, #[case] expected: &str) {
        assert_eq!(count_phrase(&dog(), number, Case::Accusative), expected);
    }

    #[rstest]
    #[case(Case::Genitive, 3567, "трёх тысяч пятисот шестидесяти семи собак")]
    #[case(Case::Dative, 22, "двадцати двум собакам")]
    #[case(Case::Instrumental, 5, "пятью собаками")]
    #[case(Case::Instrumental, 80, "восемьюдесятью собаками")]
    #[case(Case::Instrumental, 200, "двумястами собаками")]
    #[case(Case::Prepositional, 41, "сорока одной собаке")]
    #[case(Case::Genitive, 800, "восьмисот собак")]
    #[case(Case::Dative, 90, "девяноста собакам")]
    #[case(Case::Instrumental, 0, "нолём собак")]
    fn test_oblique_phrases(#[case] case: Case, #[case] number: i64, #[case] expected: &str) {
        assert_eq!(count_phrase(&dog(), number, case), expected);
    }

    #[test]
    fn test_direct_forms_of_tens_and_hundreds() {
        assert_eq!(cardinal(50, Case::Nominative, INANIMATE), "пятьдесят");
        assert_eq!(cardinal(80, Case::Genitive, INANIMATE), "восьмидесяти");
        assert_eq!(cardinal(300, Case::Nominative, INANIMATE), "триста");
        assert_eq!(cardinal(500, Case::Dative, INANIMATE), "пятистам");
        assert_eq!(cardinal(400, Case::Prepositional, INANIMATE), "четырёхстах");
        assert_eq!(cardinal(18, Case::Instrumental, INANIMATE), "восемнадцатью");
        assert_eq!(cardinal(8, Case::Genitive, INANIMATE), "восьми");
    }

    #[test]
    fn test_secondary_case_reaches_the_noun() {
        let mut forest = RussianNoun::new(
            "лес",
            NounDeclension::new(1, Stress::C, DeclensionFlags::CIRCLED_ONE).unwrap(),
            INANIMATE,
        );
        forest.anomalies.set(AnomalyKey::noun(Case::Locative, false), Some("лесу".into()));
        assert_eq!(count_phrase(&forest, 1, Case::Locative), "одном лесу");
        assert_eq!(count_phrase(&forest, 5, Case::Locative), "пяти лесах");
    }

    #[test]
    fn test_count_anomaly_replaces_genitive_plural() {
        assert_eq!(count_phrase(&person(), 5, Case::Nominative), "пять человек");
        assert_eq!(count_phrase(&person(), 2, Case::Nominative), "два человека");
        assert_eq!(count_phrase(&person(), 5, Case::Dative), "пяти человекам");
    }
}
